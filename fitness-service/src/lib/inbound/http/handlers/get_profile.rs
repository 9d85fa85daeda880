use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::profile::models::ActivityLevel;
use crate::domain::profile::models::HealthProfile;
use crate::domain::profile::models::Sex;
use crate::domain::profile::models::Units;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    state
        .profile_service
        .get_profile(&caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

/// Profile as returned to clients; shared with the update handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileResponseData {
    pub user_id: i64,
    pub date_of_birth: Option<NaiveDate>,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub neck_cm: Option<f64>,
    pub waist_cm: Option<f64>,
    pub hips_cm: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub preferred_units: Units,
    pub updated_at: DateTime<Utc>,
}

impl From<&HealthProfile> for ProfileResponseData {
    fn from(profile: &HealthProfile) -> Self {
        Self {
            user_id: profile.user_id.0,
            date_of_birth: profile.date_of_birth,
            sex: profile.sex,
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            neck_cm: profile.neck_cm,
            waist_cm: profile.waist_cm,
            hips_cm: profile.hips_cm,
            activity_level: profile.activity_level,
            preferred_units: profile.preferred_units,
            updated_at: profile.updated_at,
        }
    }
}
