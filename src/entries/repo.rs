use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::nutrition::calculator::LoggedMacros;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "entry_source", rename_all = "snake_case")]
pub enum EntrySource {
    Manual,
    Photo,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CalorieEntry {
    pub id: Uuid,
    pub user_id: Uuid,
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
    pub source: EntrySource,
    pub image_url: Option<String>,
    pub created_at: OffsetDateTime,
}

impl CalorieEntry {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        entry_date: Date,
        meal_type: &str,
        food_name: &str,
        calories: f64,
        macros: [Option<f64>; 4],
        quantity: Option<f64>,
        unit: Option<&str>,
        source: EntrySource,
        image_url: Option<&str>,
    ) -> anyhow::Result<CalorieEntry> {
        let [protein_g, carbs_g, fat_g, fiber_g] = macros;
        let entry = sqlx::query_as::<_, CalorieEntry>(
            r#"
            INSERT INTO calorie_entries
                (user_id, entry_date, meal_type, food_name, calories,
                 protein_g, carbs_g, fat_g, fiber_g, quantity, unit, source, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id, user_id, entry_date, meal_type, food_name, calories,
                      protein_g, carbs_g, fat_g, fiber_g, quantity, unit, source,
                      image_url, created_at
            "#,
        )
        .bind(user_id)
        .bind(entry_date)
        .bind(meal_type)
        .bind(food_name)
        .bind(calories)
        .bind(protein_g)
        .bind(carbs_g)
        .bind(fat_g)
        .bind(fiber_g)
        .bind(quantity)
        .bind(unit)
        .bind(source)
        .bind(image_url)
        .fetch_one(db)
        .await?;
        Ok(entry)
    }

    pub async fn list_by_date(
        db: &PgPool,
        user_id: Uuid,
        date: Date,
    ) -> anyhow::Result<Vec<CalorieEntry>> {
        let rows = sqlx::query_as::<_, CalorieEntry>(
            r#"
            SELECT id, user_id, entry_date, meal_type, food_name, calories,
                   protein_g, carbs_g, fat_g, fiber_g, quantity, unit, source,
                   image_url, created_at
            FROM calorie_entries
            WHERE user_id = $1 AND entry_date = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Deletes one entry; `Ok(false)` when it does not exist or is not ours.
    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"DELETE FROM calorie_entries WHERE id = $1 AND user_id = $2"#,
        )
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub fn logged_macros(&self) -> LoggedMacros {
        LoggedMacros {
            entry_date: self.entry_date,
            calories: self.calories,
            protein_g: self.protein_g,
            carbs_g: self.carbs_g,
            fat_g: self.fat_g,
            fiber_g: self.fiber_g,
        }
    }
}
