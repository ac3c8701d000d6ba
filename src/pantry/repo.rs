use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PantryItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub expiry_date: Option<Date>,
    pub added_at: OffsetDateTime,
}

impl PantryItem {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
        quantity: f64,
        unit: Option<&str>,
        category: Option<&str>,
        expiry_date: Option<Date>,
    ) -> anyhow::Result<PantryItem> {
        let item = sqlx::query_as::<_, PantryItem>(
            r#"
            INSERT INTO pantry_items (user_id, name, quantity, unit, category, expiry_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, name, quantity, unit, category, expiry_date, added_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(quantity)
        .bind(unit)
        .bind(category)
        .bind(expiry_date)
        .fetch_one(db)
        .await?;
        Ok(item)
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<PantryItem>> {
        let rows = sqlx::query_as::<_, PantryItem>(
            r#"
            SELECT id, user_id, name, quantity, unit, category, expiry_date, added_at
            FROM pantry_items
            WHERE user_id = $1
            ORDER BY expiry_date ASC NULLS LAST, added_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        name: &str,
        quantity: f64,
        unit: Option<&str>,
        category: Option<&str>,
        expiry_date: Option<Date>,
    ) -> anyhow::Result<Option<PantryItem>> {
        let item = sqlx::query_as::<_, PantryItem>(
            r#"
            UPDATE pantry_items
            SET name = $3, quantity = $4, unit = $5, category = $6, expiry_date = $7
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, quantity, unit, category, expiry_date, added_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(quantity)
        .bind(unit)
        .bind(category)
        .bind(expiry_date)
        .fetch_optional(db)
        .await?;
        Ok(item)
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM pantry_items WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
