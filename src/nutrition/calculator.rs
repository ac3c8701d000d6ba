//! Nutrition & goal calculations: BMR, maintenance calories, goal-adjusted
//! targets, macro splits, daily intake aggregation and pantry expiry status.
//!
//! This is the single authoritative implementation; every handler that needs
//! one of these numbers calls in here. All functions are pure and validate
//! their inputs — out-of-range values are rejected with [`NutritionError`]
//! instead of being collapsed to zero.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;

// === Constants ===

/// Energy density of protein (kcal per gram).
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;

/// Energy density of carbohydrate (kcal per gram).
pub const KCAL_PER_G_CARBS: f64 = 4.0;

/// Energy density of fat (kcal per gram).
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Daily fiber target in grams, independent of goal.
pub const FIBER_TARGET_G: u32 = 25;

/// Items expiring within this many days (inclusive) are "expiring".
pub const EXPIRING_WINDOW_DAYS: i64 = 3;

/// Items expiring within this many days (inclusive) are a "warning".
pub const WARNING_WINDOW_DAYS: i64 = 7;

// === Input enums ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "sex", rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "activity_level", rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtremelyActive,
}

impl ActivityLevel {
    /// Standard TDEE multiplier for the tier.
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "goal", rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    GainMuscle,
    MaintainWeight,
    EatHealthy,
}

impl Goal {
    /// Deficit/surplus factor applied to maintenance calories.
    fn calorie_factor(self) -> f64 {
        match self {
            Goal::LoseWeight => 0.85,
            Goal::GainMuscle => 1.10,
            Goal::MaintainWeight | Goal::EatHealthy => 1.0,
        }
    }

    /// Fraction of total calories allocated to (protein, carbs, fat).
    fn macro_ratios(self) -> (f64, f64, f64) {
        match self {
            Goal::LoseWeight => (0.35, 0.40, 0.25),
            Goal::GainMuscle => (0.30, 0.45, 0.25),
            Goal::MaintainWeight | Goal::EatHealthy => (0.25, 0.45, 0.30),
        }
    }
}

// === Errors ===

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NutritionError {
    #[error("{field} must be a positive number, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("inputs produce a non-positive BMR ({kcal:.0} kcal)")]
    ImplausibleBmr { kcal: f64 },
}

fn require_positive(field: &'static str, value: f64) -> Result<f64, NutritionError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(NutritionError::NonPositive { field, value })
    }
}

// === Energy pipeline ===

/// Basal metabolic rate in kcal/day via Mifflin-St Jeor.
///
/// Male: `10w + 6.25h − 5a + 5`; female: `10w + 6.25h − 5a − 161`.
/// The fractional part is truncated, which keeps the male−female delta at
/// exactly 166 kcal for identical inputs.
pub fn estimate_bmr(
    sex: Sex,
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
) -> Result<u32, NutritionError> {
    let weight = require_positive("weight_kg", weight_kg)?;
    let height = require_positive("height_cm", height_cm)?;
    let age = require_positive("age_years", age_years as f64)?;

    let offset = match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    let bmr = 10.0 * weight + 6.25 * height - 5.0 * age + offset;
    if bmr <= 0.0 {
        return Err(NutritionError::ImplausibleBmr { kcal: bmr });
    }
    Ok(bmr.trunc() as u32)
}

/// Maintenance calories: BMR scaled by the activity tier multiplier.
pub fn maintenance_calories(bmr_kcal: u32, activity: ActivityLevel) -> u32 {
    (bmr_kcal as f64 * activity.multiplier()).round() as u32
}

/// Applies the goal deficit/surplus to maintenance calories.
pub fn adjust_for_goal(maintenance_kcal: u32, goal: Goal) -> u32 {
    (maintenance_kcal as f64 * goal.calorie_factor()).round() as u32
}

/// Daily macro targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
    pub fiber_g: u32,
}

/// Allocates target calories into protein/carbs/fat grams using the
/// goal-dependent ratio table and 4/4/9 kcal-per-gram conversion.
pub fn split_macros(target_kcal: u32, goal: Goal) -> MacroSplit {
    let kcal = target_kcal as f64;
    let (protein, carbs, fat) = goal.macro_ratios();
    MacroSplit {
        protein_g: (kcal * protein / KCAL_PER_G_PROTEIN).round() as u32,
        carbs_g: (kcal * carbs / KCAL_PER_G_CARBS).round() as u32,
        fat_g: (kcal * fat / KCAL_PER_G_FAT).round() as u32,
        fiber_g: FIBER_TARGET_G,
    }
}

/// Full set of daily targets for one user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NutritionTargets {
    pub bmr_kcal: u32,
    pub maintenance_kcal: u32,
    pub target_kcal: u32,
    pub macros: MacroSplit,
}

/// Runs the whole pipeline: estimator → multiplier → adjuster → splitter.
pub fn daily_targets(
    sex: Sex,
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    activity: ActivityLevel,
    goal: Goal,
) -> Result<NutritionTargets, NutritionError> {
    let bmr_kcal = estimate_bmr(sex, weight_kg, height_cm, age_years)?;
    let maintenance_kcal = maintenance_calories(bmr_kcal, activity);
    let target_kcal = adjust_for_goal(maintenance_kcal, goal);
    Ok(NutritionTargets {
        bmr_kcal,
        maintenance_kcal,
        target_kcal,
        macros: split_macros(target_kcal, goal),
    })
}

// === Daily aggregation ===

/// One logged meal's nutrition, as the aggregator sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedMacros {
    pub entry_date: Date,
    pub calories: f64,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
}

/// Summed intake for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DailyTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
}

/// Sums entries whose `entry_date` equals `date`; a missing macro field
/// counts as 0 g. Entries carry a civil date, so bucketing is exact date
/// equality with no timezone arithmetic.
pub fn aggregate_daily(entries: &[LoggedMacros], date: Date) -> DailyTotals {
    let mut totals = DailyTotals::default();
    for entry in entries.iter().filter(|e| e.entry_date == date) {
        totals.calories += entry.calories;
        totals.protein_g += entry.protein_g.unwrap_or(0.0);
        totals.carbs_g += entry.carbs_g.unwrap_or(0.0);
        totals.fat_g += entry.fat_g.unwrap_or(0.0);
        totals.fiber_g += entry.fiber_g.unwrap_or(0.0);
    }
    totals
}

// === Expiry classification ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    NoDate,
    Expired,
    Expiring,
    Warning,
    Fresh,
}

/// Whole days from `today` to `expiry`; negative when already expired.
pub fn days_until_expiry(expiry: Date, today: Date) -> i64 {
    (expiry - today).whole_days()
}

/// Buckets a pantry item by days until expiry: negative ⇒ expired,
/// 0..=3 ⇒ expiring, 4..=7 ⇒ warning, otherwise fresh.
pub fn classify_expiry(expiry: Option<Date>, today: Date) -> ExpiryStatus {
    let Some(expiry) = expiry else {
        return ExpiryStatus::NoDate;
    };
    let days = days_until_expiry(expiry, today);
    if days < 0 {
        ExpiryStatus::Expired
    } else if days <= EXPIRING_WINDOW_DAYS {
        ExpiryStatus::Expiring
    } else if days <= WARNING_WINDOW_DAYS {
        ExpiryStatus::Warning
    } else {
        ExpiryStatus::Fresh
    }
}

// === Unit Tests ===

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn entry(d: Date, calories: f64) -> LoggedMacros {
        LoggedMacros {
            entry_date: d,
            calories,
            protein_g: Some(30.0),
            carbs_g: Some(40.0),
            fat_g: Some(10.0),
            fiber_g: Some(5.0),
        }
    }

    // === BMR ===

    #[test]
    fn bmr_male_reference_value() {
        let bmr = estimate_bmr(Sex::Male, 70.0, 175.0, 30).unwrap();
        assert_eq!(bmr, 1648);
    }

    #[test]
    fn bmr_female_reference_value() {
        let bmr = estimate_bmr(Sex::Female, 70.0, 175.0, 30).unwrap();
        assert_eq!(bmr, 1482);
    }

    #[test]
    fn bmr_sex_delta_is_always_166() {
        // The two formulas differ only in the constant term (+5 vs −161),
        // so the delta is exact for any shared inputs.
        for (w, h, a) in [(50.0, 150.0, 20), (70.0, 175.0, 30), (120.0, 200.0, 75)] {
            let male = estimate_bmr(Sex::Male, w, h, a).unwrap();
            let female = estimate_bmr(Sex::Female, w, h, a).unwrap();
            assert_eq!(male - female, 166, "inputs ({w}, {h}, {a})");
        }
    }

    #[test]
    fn bmr_rejects_non_positive_inputs() {
        assert_eq!(
            estimate_bmr(Sex::Male, 0.0, 175.0, 30),
            Err(NutritionError::NonPositive {
                field: "weight_kg",
                value: 0.0
            })
        );
        assert_eq!(
            estimate_bmr(Sex::Male, 70.0, -5.0, 30),
            Err(NutritionError::NonPositive {
                field: "height_cm",
                value: -5.0
            })
        );
        assert_eq!(
            estimate_bmr(Sex::Male, 70.0, 175.0, 0),
            Err(NutritionError::NonPositive {
                field: "age_years",
                value: 0.0
            })
        );
    }

    #[test]
    fn bmr_rejects_non_finite_inputs() {
        assert!(estimate_bmr(Sex::Male, f64::NAN, 175.0, 30).is_err());
        assert!(estimate_bmr(Sex::Male, 70.0, f64::INFINITY, 30).is_err());
    }

    #[test]
    fn bmr_rejects_implausible_result() {
        // Positive inputs can still drive the female formula negative.
        let err = estimate_bmr(Sex::Female, 1.0, 1.0, 80).unwrap_err();
        assert!(matches!(err, NutritionError::ImplausibleBmr { .. }));
    }

    // === Maintenance ===

    #[test]
    fn maintenance_sedentary_is_exactly_bmr_times_1_2() {
        assert_eq!(maintenance_calories(2000, ActivityLevel::Sedentary), 2400);
        assert_eq!(maintenance_calories(1648, ActivityLevel::Sedentary), 1978);
    }

    #[test]
    fn maintenance_increases_with_activity_tier() {
        let tiers = [
            ActivityLevel::Sedentary,
            ActivityLevel::LightlyActive,
            ActivityLevel::ModeratelyActive,
            ActivityLevel::VeryActive,
            ActivityLevel::ExtremelyActive,
        ];
        let results: Vec<u32> = tiers
            .iter()
            .map(|t| maintenance_calories(1648, *t))
            .collect();
        for pair in results.windows(2) {
            assert!(pair[0] < pair[1], "tiers must be strictly increasing");
        }
    }

    // === Goal adjustment ===

    #[test]
    fn adjust_lose_weight_is_15_percent_deficit() {
        assert_eq!(adjust_for_goal(2000, Goal::LoseWeight), 1700);
        assert_eq!(adjust_for_goal(1978, Goal::LoseWeight), 1681);
    }

    #[test]
    fn adjust_gain_muscle_is_10_percent_surplus() {
        assert_eq!(adjust_for_goal(2000, Goal::GainMuscle), 2200);
    }

    #[test]
    fn adjust_maintain_and_eat_healthy_are_identity() {
        assert_eq!(adjust_for_goal(1978, Goal::MaintainWeight), 1978);
        assert_eq!(adjust_for_goal(1978, Goal::EatHealthy), 1978);
    }

    // === Macro split ===

    #[test]
    fn split_lose_weight_reference_values() {
        let m = split_macros(1681, Goal::LoseWeight);
        assert_eq!(m.protein_g, 147);
        assert_eq!(m.carbs_g, 168);
        assert_eq!(m.fat_g, 47);
        assert_eq!(m.fiber_g, FIBER_TARGET_G);
    }

    #[test]
    fn split_energy_adds_back_up_within_rounding() {
        // Each gram figure is rounded, so the reconstructed energy can be
        // off by up to 2+2+4.5 kcal.
        for goal in [
            Goal::LoseWeight,
            Goal::GainMuscle,
            Goal::MaintainWeight,
            Goal::EatHealthy,
        ] {
            for kcal in [1200u32, 1681, 2000, 2500, 3400] {
                let m = split_macros(kcal, goal);
                let back = m.protein_g as f64 * KCAL_PER_G_PROTEIN
                    + m.carbs_g as f64 * KCAL_PER_G_CARBS
                    + m.fat_g as f64 * KCAL_PER_G_FAT;
                assert!(
                    (back - kcal as f64).abs() <= 9.0,
                    "{goal:?} at {kcal} kcal reconstructed {back}"
                );
            }
        }
    }

    #[test]
    fn split_fiber_is_constant_across_goals() {
        for goal in [
            Goal::LoseWeight,
            Goal::GainMuscle,
            Goal::MaintainWeight,
            Goal::EatHealthy,
        ] {
            assert_eq!(split_macros(2000, goal).fiber_g, 25);
        }
    }

    // === Pipeline ===

    #[test]
    fn pipeline_end_to_end_reference_profile() {
        let t = daily_targets(
            Sex::Male,
            70.0,
            175.0,
            30,
            ActivityLevel::Sedentary,
            Goal::LoseWeight,
        )
        .unwrap();
        assert_eq!(t.bmr_kcal, 1648);
        assert_eq!(t.maintenance_kcal, 1978);
        assert_eq!(t.target_kcal, 1681);
        assert_eq!(t.macros.protein_g, 147);
        assert_eq!(t.macros.carbs_g, 168);
        assert_eq!(t.macros.fat_g, 47);
    }

    #[test]
    fn pipeline_propagates_validation_errors() {
        let err = daily_targets(
            Sex::Male,
            -70.0,
            175.0,
            30,
            ActivityLevel::Sedentary,
            Goal::LoseWeight,
        )
        .unwrap_err();
        assert!(matches!(err, NutritionError::NonPositive { field: "weight_kg", .. }));
    }

    // === Daily aggregation ===

    #[test]
    fn aggregate_empty_is_all_zero() {
        let totals = aggregate_daily(&[], date!(2024 - 06 - 01));
        assert_eq!(totals, DailyTotals::default());
    }

    #[test]
    fn aggregate_n_identical_entries_scales_linearly() {
        let d = date!(2024 - 06 - 01);
        let entries = vec![entry(d, 500.0); 3];
        let totals = aggregate_daily(&entries, d);
        assert_eq!(totals.calories, 1500.0);
        assert_eq!(totals.protein_g, 90.0);
        assert_eq!(totals.carbs_g, 120.0);
        assert_eq!(totals.fat_g, 30.0);
        assert_eq!(totals.fiber_g, 15.0);
    }

    #[test]
    fn aggregate_ignores_other_dates() {
        let d = date!(2024 - 06 - 01);
        let entries = vec![
            entry(d, 400.0),
            entry(date!(2024 - 06 - 02), 9000.0),
            entry(date!(2024 - 05 - 31), 9000.0),
        ];
        let totals = aggregate_daily(&entries, d);
        assert_eq!(totals.calories, 400.0);
    }

    #[test]
    fn aggregate_treats_missing_macros_as_zero() {
        let d = date!(2024 - 06 - 01);
        let sparse = LoggedMacros {
            entry_date: d,
            calories: 250.0,
            protein_g: None,
            carbs_g: Some(20.0),
            fat_g: None,
            fiber_g: None,
        };
        let totals = aggregate_daily(&[sparse], d);
        assert_eq!(totals.calories, 250.0);
        assert_eq!(totals.protein_g, 0.0);
        assert_eq!(totals.carbs_g, 20.0);
        assert_eq!(totals.fat_g, 0.0);
    }

    // === Expiry classification ===

    #[test]
    fn expiry_boundaries() {
        let today = date!(2024 - 06 - 10);
        let plus = |d: i64| today.checked_add(time::Duration::days(d)).unwrap();

        assert_eq!(classify_expiry(Some(plus(-1)), today), ExpiryStatus::Expired);
        assert_eq!(classify_expiry(Some(today), today), ExpiryStatus::Expiring);
        assert_eq!(classify_expiry(Some(plus(3)), today), ExpiryStatus::Expiring);
        assert_eq!(classify_expiry(Some(plus(4)), today), ExpiryStatus::Warning);
        assert_eq!(classify_expiry(Some(plus(7)), today), ExpiryStatus::Warning);
        assert_eq!(classify_expiry(Some(plus(8)), today), ExpiryStatus::Fresh);
    }

    #[test]
    fn expiry_without_date() {
        assert_eq!(
            classify_expiry(None, date!(2024 - 06 - 10)),
            ExpiryStatus::NoDate
        );
    }

    #[test]
    fn expiry_across_month_boundary() {
        let today = date!(2024 - 01 - 30);
        assert_eq!(
            classify_expiry(Some(date!(2024 - 02 - 02)), today),
            ExpiryStatus::Expiring
        );
        assert_eq!(
            classify_expiry(Some(date!(2024 - 02 - 06)), today),
            ExpiryStatus::Warning
        );
    }

    // === Enum boundaries ===

    #[test]
    fn unknown_enum_strings_fail_deserialization() {
        assert!(serde_json::from_str::<ActivityLevel>("\"super_active\"").is_err());
        assert!(serde_json::from_str::<Goal>("\"bulk\"").is_err());
    }

    #[test]
    fn enums_use_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&ActivityLevel::LightlyActive).unwrap(),
            "\"lightly_active\""
        );
        assert_eq!(serde_json::to_string(&Goal::LoseWeight).unwrap(), "\"lose_weight\"");
        assert_eq!(
            serde_json::to_string(&ExpiryStatus::NoDate).unwrap(),
            "\"no_date\""
        );
    }
}
