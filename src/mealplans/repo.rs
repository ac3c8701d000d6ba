use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::nutrition::calculator::Goal;

/// One planned meal slot; the recipe payload comes from the generation flow
/// and is stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedMeal {
    pub meal_type: String,
    pub recipe: serde_json::Value,
}

/// One day of the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDay {
    pub date: Date,
    pub meals: Vec<PlannedMeal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MealPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub goal: Option<Goal>,
    pub dietary_restrictions: Vec<String>,
    pub meals: Json<Vec<PlanDay>>,
    pub shopping_list: Vec<String>,
    pub created_at: OffsetDateTime,
}

const PLAN_COLUMNS: &str = "id, user_id, name, start_date, end_date, goal, \
     dietary_restrictions, meals, shopping_list, created_at";

impl MealPlan {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
        start_date: Date,
        end_date: Date,
        goal: Option<Goal>,
        dietary_restrictions: &[String],
        meals: &[PlanDay],
        shopping_list: &[String],
    ) -> anyhow::Result<MealPlan> {
        let sql = format!(
            r#"
            INSERT INTO meal_plans
                (user_id, name, start_date, end_date, goal,
                 dietary_restrictions, meals, shopping_list)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PLAN_COLUMNS}
            "#
        );
        let plan = sqlx::query_as::<_, MealPlan>(&sql)
        .bind(user_id)
        .bind(name)
        .bind(start_date)
        .bind(end_date)
        .bind(goal)
        .bind(dietary_restrictions)
        .bind(Json(meals))
        .bind(shopping_list)
        .fetch_one(db)
        .await?;
        Ok(plan)
    }

    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<MealPlan>> {
        let sql = format!(
            r#"
            SELECT {PLAN_COLUMNS}
            FROM meal_plans
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        );
        let rows = sqlx::query_as::<_, MealPlan>(&sql)
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_owned(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<MealPlan>> {
        let sql =
            format!(r#"SELECT {PLAN_COLUMNS} FROM meal_plans WHERE id = $1 AND user_id = $2"#);
        let plan = sqlx::query_as::<_, MealPlan>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(plan)
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM meal_plans WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
