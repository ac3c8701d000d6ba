use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::calculator::{ActivityLevel, Goal, Sex};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub sex: Option<Sex>,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
    pub dietary_restrictions: Vec<String>,
    pub subscription_tier: String,
    pub created_at: OffsetDateTime,
}

/// Full replacement of the mutable profile fields. Subscription tier is
/// billing-driven and not writable here.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub sex: Option<Sex>,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_defaults_restrictions_to_empty() {
        let req: UpdateProfileRequest = serde_json::from_str(r#"{"name": "Cook"}"#).unwrap();
        assert!(req.dietary_restrictions.is_empty());
        assert!(req.goal.is_none());
    }
}
