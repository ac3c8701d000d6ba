use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::nutrition::calculator::ExpiryStatus;
use crate::pantry::repo::PantryItem;

#[derive(Debug, Deserialize)]
pub struct UpsertPantryItemRequest {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub expiry_date: Option<Date>,
}

fn default_quantity() -> f64 {
    1.0
}

/// A pantry item annotated with its freshness classification.
#[derive(Debug, Serialize)]
pub struct PantryItemResponse {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub expiry_date: Option<Date>,
    pub added_at: OffsetDateTime,
    pub expiry_status: ExpiryStatus,
    pub days_until_expiry: Option<i64>,
}

impl PantryItemResponse {
    pub fn annotate(item: PantryItem, today: Date) -> Self {
        use crate::nutrition::calculator::{classify_expiry, days_until_expiry};

        let status = classify_expiry(item.expiry_date, today);
        let days = item.expiry_date.map(|d| days_until_expiry(d, today));
        Self {
            id: item.id,
            name: item.name,
            quantity: item.quantity,
            unit: item.unit,
            category: item.category,
            expiry_date: item.expiry_date,
            added_at: item.added_at,
            expiry_status: status,
            days_until_expiry: days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn item(expiry: Option<Date>) -> PantryItem {
        PantryItem {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "milk".into(),
            quantity: 1.0,
            unit: Some("l".into()),
            category: Some("dairy".into()),
            expiry_date: expiry,
            added_at: datetime!(2024-06-01 09:00 UTC),
        }
    }

    #[test]
    fn annotate_marks_soon_to_expire_items() {
        let today = date!(2024 - 06 - 10);
        let resp = PantryItemResponse::annotate(item(Some(date!(2024 - 06 - 12))), today);
        assert_eq!(resp.expiry_status, ExpiryStatus::Expiring);
        assert_eq!(resp.days_until_expiry, Some(2));
    }

    #[test]
    fn dates_serialize_as_iso_strings() {
        let today = date!(2024 - 06 - 10);
        let resp = PantryItemResponse::annotate(item(Some(date!(2024 - 06 - 12))), today);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(
            json.contains(r#""expiry_date":"2024-06-12""#),
            "expiry_date must be the calendar form, got: {json}"
        );
    }

    #[test]
    fn dates_deserialize_from_iso_strings() {
        let parsed: Date = serde_json::from_str(r#""2024-06-01""#).unwrap();
        assert_eq!(parsed, date!(2024 - 06 - 01));
    }

    #[test]
    fn annotate_handles_missing_expiry() {
        let resp = PantryItemResponse::annotate(item(None), date!(2024 - 06 - 10));
        assert_eq!(resp.expiry_status, ExpiryStatus::NoDate);
        assert_eq!(resp.days_until_expiry, None);
    }
}
