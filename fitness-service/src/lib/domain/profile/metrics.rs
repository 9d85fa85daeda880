//! Derived health metrics.
//!
//! Pure functions over a profile snapshot. Degenerate input is normalised to
//! sentinel values rather than rejected; profile validation runs upstream.

use chrono::Datelike;
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::profile::models::ActivityLevel;
use crate::domain::profile::models::HealthProfile;
use crate::domain::profile::models::Sex;

/// Metrics derived from a health profile. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileStats {
    pub age: i32,
    pub bmi: f64,
    pub bfp: f64,
    pub bmr: f64,
    pub tdee: f64,
}

/// Age in whole years on `today`; 0 when the date of birth is unknown.
pub fn calculate_age(date_of_birth: Option<NaiveDate>, today: NaiveDate) -> i32 {
    let Some(dob) = date_of_birth else {
        return 0;
    };

    let age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age - 1
    } else {
        age
    }
}

/// Body Mass Index: weight (kg) / height (m)².
///
/// Returns 0 when either input is not positive.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 || weight_kg <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    round_to_two(weight_kg / (height_m * height_m))
}

/// Body fat percentage (Deurenberg):
/// 1.20 × BMI + 0.23 × age − 10.8 × sex − 5.4, with sex = 1 for male, 0 otherwise.
pub fn calculate_bfp(bmi: f64, age: i32, sex: Sex) -> f64 {
    let sex_factor = match sex {
        Sex::Male => 1.0,
        Sex::Female => 0.0,
    };
    round_to_two(1.20 * bmi + 0.23 * f64::from(age) - 10.8 * sex_factor - 5.4)
}

/// Basal metabolic rate (Mifflin-St Jeor).
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: i32, sex: Sex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match sex {
        Sex::Male => round_to_two(base + 5.0),
        Sex::Female => round_to_two(base - 161.0),
    }
}

/// Total daily energy expenditure; an unset activity level counts as sedentary.
pub fn calculate_tdee(bmr: f64, activity_level: Option<ActivityLevel>) -> f64 {
    let multiplier = activity_level
        .unwrap_or(ActivityLevel::Sedentary)
        .multiplier();
    round_to_two(bmr * multiplier)
}

/// Compute every metric for a profile as of `today`.
///
/// BFP consumes the rounded BMI, so BMI is computed first.
pub fn calculate_stats(profile: &HealthProfile, today: NaiveDate) -> ProfileStats {
    let age = calculate_age(profile.date_of_birth, today);
    let bmi = calculate_bmi(profile.weight_kg, profile.height_cm);
    let bfp = calculate_bfp(bmi, age, profile.sex);
    let bmr = calculate_bmr(profile.weight_kg, profile.height_cm, age, profile.sex);
    let tdee = calculate_tdee(bmr, profile.activity_level);

    ProfileStats {
        age,
        bmi,
        bfp,
        bmr,
        tdee,
    }
}

// Half-up on the value scaled by 100, truncating toward zero. Inputs are
// non-negative after validation, where this matches conventional rounding.
fn round_to_two(value: f64) -> f64 {
    ((value * 100.0 + 0.5) as i64) as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::profile::models::Units;
    use crate::domain::user::models::UserId;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_age_before_birthday() {
        assert_eq!(
            calculate_age(Some(date(1994, 5, 15)), date(2024, 1, 1)),
            29
        );
    }

    #[test]
    fn test_age_on_and_after_birthday() {
        assert_eq!(
            calculate_age(Some(date(1994, 5, 15)), date(2024, 5, 15)),
            30
        );
        assert_eq!(
            calculate_age(Some(date(1994, 5, 15)), date(2024, 5, 16)),
            30
        );
        assert_eq!(
            calculate_age(Some(date(1994, 5, 15)), date(2024, 5, 14)),
            29
        );
    }

    #[test]
    fn test_age_unknown_is_zero() {
        assert_eq!(calculate_age(None, date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_bmi() {
        assert_eq!(calculate_bmi(75.0, 175.0), 24.49);
        assert_eq!(calculate_bmi(70.0, 170.0), 24.22);
    }

    #[test]
    fn test_bmi_degenerate_input() {
        assert_eq!(calculate_bmi(0.0, 170.0), 0.0);
        assert_eq!(calculate_bmi(70.0, 0.0), 0.0);
        assert_eq!(calculate_bmi(-70.0, 170.0), 0.0);
    }

    #[test]
    fn test_bfp() {
        // 1.2 * 24.49 + 0.23 * 29 - 10.8 - 5.4 = 19.858
        assert_eq!(calculate_bfp(24.49, 29, Sex::Male), 19.86);
        // 1.2 * 24.49 + 0.23 * 29 - 5.4 = 30.658
        assert_eq!(calculate_bfp(24.49, 29, Sex::Female), 30.66);
    }

    #[test]
    fn test_bmr() {
        // 750 + 1093.75 - 145 + 5
        assert_eq!(calculate_bmr(75.0, 175.0, 29, Sex::Male), 1703.75);
        // 750 + 1093.75 - 145 - 161
        assert_eq!(calculate_bmr(75.0, 175.0, 29, Sex::Female), 1537.75);
    }

    #[test]
    fn test_tdee_multipliers() {
        assert_eq!(calculate_tdee(1000.0, Some(ActivityLevel::Sedentary)), 1200.0);
        assert_eq!(calculate_tdee(1000.0, Some(ActivityLevel::Light)), 1375.0);
        assert_eq!(calculate_tdee(1000.0, Some(ActivityLevel::Moderate)), 1550.0);
        assert_eq!(calculate_tdee(1000.0, Some(ActivityLevel::Active)), 1725.0);
        assert_eq!(calculate_tdee(1000.0, Some(ActivityLevel::VeryActive)), 1900.0);
    }

    #[test]
    fn test_tdee_unknown_level_is_sedentary() {
        let unknown = "unknown_level".parse::<ActivityLevel>().ok();
        assert_eq!(
            calculate_tdee(1703.75, unknown),
            calculate_tdee(1703.75, Some(ActivityLevel::Sedentary))
        );
        assert_eq!(calculate_tdee(1703.75, None), 2044.5);
    }

    #[test]
    fn test_round_to_two_half_up() {
        assert_eq!(round_to_two(2.675), 2.68);
        assert_eq!(round_to_two(0.125), 0.13);
        assert_eq!(round_to_two(19.858), 19.86);
    }

    #[test]
    fn test_calculate_stats_pipeline() {
        let profile = HealthProfile {
            user_id: UserId(1),
            date_of_birth: Some(date(1994, 5, 15)),
            sex: Sex::Male,
            height_cm: 175.0,
            weight_kg: 75.0,
            neck_cm: None,
            waist_cm: None,
            hips_cm: None,
            activity_level: Some(ActivityLevel::Moderate),
            preferred_units: Units::Metric,
            updated_at: Utc::now(),
        };

        let stats = calculate_stats(&profile, date(2024, 1, 1));

        assert_eq!(
            stats,
            ProfileStats {
                age: 29,
                bmi: 24.49,
                bfp: 19.86,
                bmr: 1703.75,
                // 1703.75 * 1.55 = 2640.8125
                tdee: 2640.81,
            }
        );
    }
}
