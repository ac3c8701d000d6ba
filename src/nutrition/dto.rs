use serde::Deserialize;

use crate::nutrition::calculator::{ActivityLevel, Goal, Sex};

/// Explicit inputs for a target computation that does not rely on a saved
/// profile (the onboarding preview).
#[derive(Debug, Deserialize)]
pub struct TargetsRequest {
    pub sex: Sex,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}
