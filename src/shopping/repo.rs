use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShoppingList {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub items: Vec<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl ShoppingList {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
        items: &[String],
    ) -> anyhow::Result<ShoppingList> {
        let list = sqlx::query_as::<_, ShoppingList>(
            r#"
            INSERT INTO shopping_lists (user_id, name, items)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, items, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(items)
        .fetch_one(db)
        .await?;
        Ok(list)
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<ShoppingList>> {
        let rows = sqlx::query_as::<_, ShoppingList>(
            r#"
            SELECT id, user_id, name, items, created_at, updated_at
            FROM shopping_lists
            WHERE user_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_owned(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<ShoppingList>> {
        let list = sqlx::query_as::<_, ShoppingList>(
            r#"
            SELECT id, user_id, name, items, created_at, updated_at
            FROM shopping_lists
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(list)
    }

    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        name: &str,
        items: &[String],
    ) -> anyhow::Result<Option<ShoppingList>> {
        let list = sqlx::query_as::<_, ShoppingList>(
            r#"
            UPDATE shopping_lists
            SET name = $3, items = $4, updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, items, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(items)
        .fetch_optional(db)
        .await?;
        Ok(list)
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM shopping_lists WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
