use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;

use super::get_profile::ProfileResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::ProfileFields;
use crate::domain::profile::models::UpsertProfileCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    let Json(body) = payload?;

    let command = UpsertProfileCommand::try_new(body.into(), Utc::now().date_naive())
        .map_err(ProfileError::from)?;

    state
        .profile_service
        .upsert_profile(&caller.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

/// HTTP request body for creating or replacing a profile (raw JSON).
///
/// Dates use the `YYYY-MM-DD` form.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    date_of_birth: Option<NaiveDate>,
    sex: String,
    height_cm: f64,
    weight_kg: f64,
    #[serde(default)]
    neck_cm: Option<f64>,
    #[serde(default)]
    waist_cm: Option<f64>,
    #[serde(default)]
    hips_cm: Option<f64>,
    #[serde(default)]
    activity_level: Option<String>,
    #[serde(default)]
    preferred_units: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileFields {
    fn from(body: UpdateProfileRequest) -> Self {
        ProfileFields {
            date_of_birth: body.date_of_birth,
            sex: body.sex,
            height_cm: body.height_cm,
            weight_kg: body.weight_kg,
            neck_cm: body.neck_cm,
            waist_cm: body.waist_cm,
            hips_cm: body.hips_cm,
            activity_level: body.activity_level,
            preferred_units: body.preferred_units,
        }
    }
}
