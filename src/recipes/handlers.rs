use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::AuthUser;
use crate::errors::{internal, not_found, ApiError};
use crate::recipes::dto::{CreateRecipeRequest, RecipeListQuery, SaveRecipeRequest};
use crate::recipes::repo::{NewRecipe, Recipe, SavedRecipe};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", post(create_recipe))
        .route("/recipes", get(list_recipes))
        .route("/recipes/saved", get(list_saved))
        .route("/recipes/:id", get(get_recipe))
        .route("/recipes/:id", delete(delete_recipe))
        .route("/recipes/:id/save", post(save_recipe))
        .route("/recipes/:id/save", delete(unsave_recipe))
}

#[instrument(skip(state, body))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    if body.title.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "title is required".to_string()));
    }

    let recipe = Recipe::create(
        &state.db,
        user_id,
        &NewRecipe {
            title: body.title.trim(),
            description: body.description.as_deref(),
            ingredients: &body.ingredients,
            instructions: &body.instructions,
            prep_time_min: body.prep_time_min,
            cook_time_min: body.cook_time_min,
            servings: body.servings,
            calories: body.calories,
            protein_g: body.protein_g,
            carbs_g: body.carbs_g,
            fat_g: body.fat_g,
            fiber_g: body.fiber_g,
            chef_mode: body.chef_mode,
            difficulty: body.difficulty.as_deref(),
            cuisine: body.cuisine.as_deref(),
            meal_type: body.meal_type.as_deref(),
        },
    )
    .await
    .map_err(internal)?;

    info!(%user_id, recipe_id = %recipe.id, mode = ?recipe.chef_mode, "recipe stored");
    Ok((StatusCode::CREATED, Json(recipe)))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<RecipeListQuery>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = Recipe::list_by_user(&state.db, user_id, q.chef_mode, q.limit, q.offset)
        .await
        .map_err(internal)?;
    Ok(Json(recipes))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = Recipe::find_owned(&state.db, user_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found("Recipe"))?;
    Ok(Json(recipe))
}

#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = Recipe::delete(&state.db, user_id, id)
        .await
        .map_err(internal)?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Recipe"))
    }
}

#[instrument(skip(state, body))]
pub async fn save_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<SaveRecipeRequest>,
) -> Result<StatusCode, ApiError> {
    // Foreign key violation means the recipe id does not exist.
    match Recipe::save(&state.db, user_id, id, &body.collection_name).await {
        Ok(_) => Ok(StatusCode::CREATED),
        Err(e) => {
            if e.downcast_ref::<sqlx::Error>()
                .and_then(|e| e.as_database_error())
                .map(|db| db.is_foreign_key_violation())
                .unwrap_or(false)
            {
                Err(not_found("Recipe"))
            } else {
                Err(internal(e))
            }
        }
    }
}

#[instrument(skip(state))]
pub async fn unsave_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let removed = Recipe::unsave(&state.db, user_id, id)
        .await
        .map_err(internal)?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Saved recipe"))
    }
}

#[instrument(skip(state))]
pub async fn list_saved(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<SavedRecipe>>, ApiError> {
    let saved = Recipe::list_saved(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(saved))
}
