use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Serialize;

use crate::domain::profile::errors::ProfileValidationError;
use crate::domain::user::models::UserId;

/// Biological sex category used by the metric formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Read a stored value. Anything other than `male` counts as female.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "male" => Sex::Male,
            _ => Sex::Female,
        }
    }
}

impl FromStr for Sex {
    type Err = ProfileValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => Err(ProfileValidationError::InvalidSex),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or a physical job
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// TDEE multiplier applied to the basal metabolic rate.
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = ProfileValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            _ => Err(ProfileValidationError::InvalidActivityLevel),
        }
    }
}

/// Units the client prefers for display. Storage is always metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl FromStr for Units {
    type Err = ProfileValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(ProfileValidationError::InvalidUnits),
        }
    }
}

/// A user's health profile.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthProfile {
    pub user_id: UserId,
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

impl HealthProfile {
    /// Build the stored profile for a user from a validated command.
    pub fn from_command(
        user_id: UserId,
        command: UpsertProfileCommand,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            date_of_birth: command.date_of_birth,
            sex: command.sex,
            height_cm: command.height_cm,
            weight_kg: command.weight_kg,
            neck_cm: command.neck_cm,
            waist_cm: command.waist_cm,
            hips_cm: command.hips_cm,
            activity_level: command.activity_level,
            preferred_units: command.preferred_units,
            updated_at,
        }
    }
}

/// Raw profile input as received from a client.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub date_of_birth: Option<NaiveDate>,
    pub sex: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub neck_cm: Option<f64>,
    pub waist_cm: Option<f64>,
    pub hips_cm: Option<f64>,
    pub activity_level: Option<String>,
    pub preferred_units: Option<String>,
}

/// Command to create or replace the caller's profile with validated fields.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertProfileCommand {
    pub date_of_birth: Option<NaiveDate>,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub neck_cm: Option<f64>,
    pub waist_cm: Option<f64>,
    pub hips_cm: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub preferred_units: Units,
}

impl UpsertProfileCommand {
    /// Validate raw input against the profile rules.
    ///
    /// Checks run in a fixed order and the first failure is returned.
    /// An empty or absent activity level means "unset"; empty or absent
    /// units default to metric.
    ///
    /// # Arguments
    /// * `fields` - Raw client input
    /// * `today` - Reference date for the date-of-birth check
    ///
    /// # Errors
    /// * `NonPositiveMeasurements` - Height or weight is not strictly positive
    /// * `InvalidSex` - Sex is neither `male` nor `female`
    /// * `FutureDateOfBirth` - Date of birth is after `today`
    /// * `InvalidActivityLevel` - Activity level is not one of the five values
    /// * `InvalidUnits` - Units are neither `metric` nor `imperial`
    pub fn try_new(
        fields: ProfileFields,
        today: NaiveDate,
    ) -> Result<Self, ProfileValidationError> {
        let positive = |value: f64| value > 0.0;
        if !positive(fields.height_cm) || !positive(fields.weight_kg) {
            return Err(ProfileValidationError::NonPositiveMeasurements);
        }

        let sex = fields.sex.parse::<Sex>()?;

        if fields.date_of_birth.is_some_and(|dob| dob > today) {
            return Err(ProfileValidationError::FutureDateOfBirth);
        }

        let activity_level = match fields.activity_level.as_deref() {
            None | Some("") => None,
            Some(level) => Some(level.parse::<ActivityLevel>()?),
        };

        let preferred_units = match fields.preferred_units.as_deref() {
            None | Some("") => Units::default(),
            Some(units) => units.parse::<Units>()?,
        };

        Ok(Self {
            date_of_birth: fields.date_of_birth,
            sex,
            height_cm: fields.height_cm,
            weight_kg: fields.weight_kg,
            neck_cm: fields.neck_cm,
            waist_cm: fields.waist_cm,
            hips_cm: fields.hips_cm,
            activity_level,
            preferred_units,
        })
    }
}
