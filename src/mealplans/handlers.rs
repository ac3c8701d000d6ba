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
use crate::mealplans::dto::{CreateMealPlanRequest, Pagination};
use crate::mealplans::repo::MealPlan;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/mealplans", post(create_plan))
        .route("/mealplans", get(list_plans))
        .route("/mealplans/:id", get(get_plan))
        .route("/mealplans/:id", delete(delete_plan))
}

#[instrument(skip(state, body))]
pub async fn create_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateMealPlanRequest>,
) -> Result<(StatusCode, Json<MealPlan>), ApiError> {
    if body.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "name is required".to_string()));
    }
    if body.end_date < body.start_date {
        return Err((
            StatusCode::BAD_REQUEST,
            "end_date must not precede start_date".to_string(),
        ));
    }

    let plan = MealPlan::create(
        &state.db,
        user_id,
        body.name.trim(),
        body.start_date,
        body.end_date,
        body.goal,
        &body.dietary_restrictions,
        &body.meals,
        &body.shopping_list,
    )
    .await
    .map_err(internal)?;

    info!(%user_id, plan_id = %plan.id, days = plan.meals.0.len(), "meal plan stored");
    Ok((StatusCode::CREATED, Json(plan)))
}

#[instrument(skip(state))]
pub async fn list_plans(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<MealPlan>>, ApiError> {
    let plans = MealPlan::list_by_user(&state.db, user_id, p.limit, p.offset)
        .await
        .map_err(internal)?;
    Ok(Json(plans))
}

#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MealPlan>, ApiError> {
    let plan = MealPlan::find_owned(&state.db, user_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found("Meal plan"))?;
    Ok(Json(plan))
}

#[instrument(skip(state))]
pub async fn delete_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = MealPlan::delete(&state.db, user_id, id)
        .await
        .map_err(internal)?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Meal plan"))
    }
}
