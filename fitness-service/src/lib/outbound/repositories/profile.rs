use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::ActivityLevel;
use crate::domain::profile::models::HealthProfile;
use crate::domain::profile::models::Sex;
use crate::domain::profile::models::Units;
use crate::domain::profile::ports::ProfileRepository;
use crate::domain::user::models::UserId;

pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: i64,
    date_of_birth: Option<NaiveDate>,
    sex: String,
    height_cm: f64,
    weight_kg: f64,
    neck_cm: Option<f64>,
    waist_cm: Option<f64>,
    hips_cm: Option<f64>,
    activity_level: Option<String>,
    preferred_units: String,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for HealthProfile {
    fn from(row: ProfileRow) -> Self {
        HealthProfile {
            user_id: UserId(row.user_id),
            date_of_birth: row.date_of_birth,
            sex: Sex::from_stored(&row.sex),
            height_cm: row.height_cm,
            weight_kg: row.weight_kg,
            neck_cm: row.neck_cm,
            waist_cm: row.waist_cm,
            hips_cm: row.hips_cm,
            // Unrecognised stored levels read back as unset.
            activity_level: row
                .activity_level
                .and_then(|level| level.parse::<ActivityLevel>().ok()),
            preferred_units: row.preferred_units.parse::<Units>().unwrap_or_default(),
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<HealthProfile>, ProfileError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT user_id, date_of_birth, sex, height_cm, weight_kg,
                   neck_cm, waist_cm, hips_cm, activity_level,
                   preferred_units, updated_at
            FROM health_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProfileError::DatabaseError(e.to_string()))?;

        Ok(row.map(HealthProfile::from))
    }

    async fn upsert(&self, profile: HealthProfile) -> Result<HealthProfile, ProfileError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO health_profiles (
                user_id, date_of_birth, sex, height_cm, weight_kg,
                neck_cm, waist_cm, hips_cm, activity_level,
                preferred_units, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_id) DO UPDATE SET
                date_of_birth = EXCLUDED.date_of_birth,
                sex = EXCLUDED.sex,
                height_cm = EXCLUDED.height_cm,
                weight_kg = EXCLUDED.weight_kg,
                neck_cm = EXCLUDED.neck_cm,
                waist_cm = EXCLUDED.waist_cm,
                hips_cm = EXCLUDED.hips_cm,
                activity_level = EXCLUDED.activity_level,
                preferred_units = EXCLUDED.preferred_units,
                updated_at = EXCLUDED.updated_at
            RETURNING user_id, date_of_birth, sex, height_cm, weight_kg,
                      neck_cm, waist_cm, hips_cm, activity_level,
                      preferred_units, updated_at
            "#,
        )
        .bind(profile.user_id.0)
        .bind(profile.date_of_birth)
        .bind(profile.sex.as_str())
        .bind(profile.height_cm)
        .bind(profile.weight_kg)
        .bind(profile.neck_cm)
        .bind(profile.waist_cm)
        .bind(profile.hips_cm)
        .bind(profile.activity_level.map(|level| level.as_str()))
        .bind(profile.preferred_units.as_str())
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ProfileError::DatabaseError(e.to_string()))?;

        Ok(HealthProfile::from(row))
    }
}
