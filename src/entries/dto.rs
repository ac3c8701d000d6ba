use serde::{Deserialize, Serialize};
use time::Date;

use crate::entries::repo::EntrySource;
use crate::nutrition::calculator::{DailyTotals, NutritionTargets};

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub entry_date: Date,
    pub meal_type: String,
    pub food_name: String,
    pub calories: f64,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    #[serde(default = "default_source")]
    pub source: EntrySource,
    pub image_url: Option<String>,
}

fn default_source() -> EntrySource {
    EntrySource::Manual
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Date,
}

/// One day's intake against the caller's targets. `targets` is absent when
/// the profile is incomplete; the totals are still valid on their own.
#[derive(Debug, Serialize)]
pub struct DailySummary {
    pub date: Date,
    pub totals: DailyTotals,
    pub targets: Option<NutritionTargets>,
    pub remaining_kcal: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_defaults_source_to_manual() {
        let req: CreateEntryRequest = serde_json::from_str(
            r#"{
                "entry_date": "2024-06-01",
                "meal_type": "lunch",
                "food_name": "oats",
                "calories": 350
            }"#,
        )
        .unwrap();
        assert_eq!(req.source, EntrySource::Manual);
        assert!(req.protein_g.is_none());
    }

    #[test]
    fn create_request_rejects_unknown_source() {
        let res = serde_json::from_str::<CreateEntryRequest>(
            r#"{
                "entry_date": "2024-06-01",
                "meal_type": "lunch",
                "food_name": "oats",
                "calories": 350,
                "source": "imported"
            }"#,
        );
        assert!(res.is_err());
    }
}
