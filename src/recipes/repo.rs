use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Which generation flow produced the recipe. Descriptive metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "chef_mode", rename_all = "snake_case")]
pub enum ChefMode {
    Pantry,
    Master,
    Macros,
    Mixology,
    MealPlan,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time_min: Option<i32>,
    pub cook_time_min: Option<i32>,
    pub servings: Option<i32>,
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub chef_mode: ChefMode,
    pub difficulty: Option<String>,
    pub cuisine: Option<String>,
    pub meal_type: Option<String>,
    pub created_at: OffsetDateTime,
}

/// A saved (favorited) recipe with its collection label. Saving is
/// independent of who owns the recipe.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SavedRecipe {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub recipe: Recipe,
    pub collection_name: String,
}

const RECIPE_COLUMNS: &str = "id, user_id, title, description, ingredients, instructions, \
     prep_time_min, cook_time_min, servings, calories, protein_g, carbs_g, fat_g, fiber_g, \
     chef_mode, difficulty, cuisine, meal_type, created_at";

impl Recipe {
    pub async fn create(db: &PgPool, user_id: Uuid, new: &NewRecipe<'_>) -> anyhow::Result<Recipe> {
        let sql = format!(
            r#"
            INSERT INTO recipes
                (user_id, title, description, ingredients, instructions,
                 prep_time_min, cook_time_min, servings, calories,
                 protein_g, carbs_g, fat_g, fiber_g,
                 chef_mode, difficulty, cuisine, meal_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING {RECIPE_COLUMNS}
            "#
        );
        let recipe = sqlx::query_as::<_, Recipe>(&sql)
        .bind(user_id)
        .bind(new.title)
        .bind(new.description)
        .bind(new.ingredients)
        .bind(new.instructions)
        .bind(new.prep_time_min)
        .bind(new.cook_time_min)
        .bind(new.servings)
        .bind(new.calories)
        .bind(new.protein_g)
        .bind(new.carbs_g)
        .bind(new.fat_g)
        .bind(new.fiber_g)
        .bind(new.chef_mode)
        .bind(new.difficulty)
        .bind(new.cuisine)
        .bind(new.meal_type)
        .fetch_one(db)
        .await?;
        Ok(recipe)
    }

    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        chef_mode: Option<ChefMode>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Recipe>> {
        let sql = format!(
            r#"
            SELECT {RECIPE_COLUMNS}
            FROM recipes
            WHERE user_id = $1 AND ($2::chef_mode IS NULL OR chef_mode = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        );
        let rows = sqlx::query_as::<_, Recipe>(&sql)
        .bind(user_id)
        .bind(chef_mode)
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
    ) -> anyhow::Result<Option<Recipe>> {
        let sql =
            format!(r#"SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1 AND user_id = $2"#);
        let recipe = sqlx::query_as::<_, Recipe>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(recipe)
    }

    /// Owner delete. Saved-recipe rows referencing it go with it via the
    /// FK cascade.
    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM recipes WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn save(
        db: &PgPool,
        user_id: Uuid,
        recipe_id: Uuid,
        collection_name: &str,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO saved_recipes (user_id, recipe_id, collection_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, recipe_id)
            DO UPDATE SET collection_name = EXCLUDED.collection_name
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .bind(collection_name)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn unsave(db: &PgPool, user_id: Uuid, recipe_id: Uuid) -> anyhow::Result<bool> {
        let result =
            sqlx::query(r#"DELETE FROM saved_recipes WHERE user_id = $1 AND recipe_id = $2"#)
                .bind(user_id)
                .bind(recipe_id)
                .execute(db)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_saved(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<SavedRecipe>> {
        let rows = sqlx::query_as::<_, SavedRecipe>(
            r#"
            SELECT r.id, r.user_id, r.title, r.description, r.ingredients, r.instructions,
                   r.prep_time_min, r.cook_time_min, r.servings, r.calories,
                   r.protein_g, r.carbs_g, r.fat_g, r.fiber_g,
                   r.chef_mode, r.difficulty, r.cuisine, r.meal_type, r.created_at,
                   s.collection_name
            FROM saved_recipes s
            JOIN recipes r ON r.id = s.recipe_id
            WHERE s.user_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

/// Borrowed insert payload, built by the handler from the generation output.
#[derive(Debug)]
pub struct NewRecipe<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub ingredients: &'a [String],
    pub instructions: &'a [String],
    pub prep_time_min: Option<i32>,
    pub cook_time_min: Option<i32>,
    pub servings: Option<i32>,
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub chef_mode: ChefMode,
    pub difficulty: Option<&'a str>,
    pub cuisine: Option<&'a str>,
    pub meal_type: Option<&'a str>,
}
