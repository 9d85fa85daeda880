use thiserror::Error;

/// Error for health profile validation failures.
///
/// Variants are listed in the order the checks run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileValidationError {
    #[error("Height and weight must be positive")]
    NonPositiveMeasurements,

    #[error("Sex must be 'male' or 'female'")]
    InvalidSex,

    #[error("Date of birth cannot be in the future")]
    FutureDateOfBirth,

    #[error("Invalid activity level")]
    InvalidActivityLevel,

    #[error("Preferred units must be 'metric' or 'imperial'")]
    InvalidUnits,
}

/// Top-level error for all profile operations
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    #[error("{0}")]
    Invalid(#[from] ProfileValidationError),

    #[error("Profile not found")]
    NotFound,

    #[error("Profile not found. Please create a profile first.")]
    StatsUnavailable,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
