use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::AuthUser;
use crate::errors::{internal, not_found, ApiError};
use crate::shopping::dto::UpsertShoppingListRequest;
use crate::shopping::repo::ShoppingList;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shopping-lists", post(create_list))
        .route("/shopping-lists", get(list_lists))
        .route("/shopping-lists/:id", get(get_list))
        .route("/shopping-lists/:id", put(update_list))
        .route("/shopping-lists/:id", delete(delete_list))
}

#[instrument(skip(state, body))]
pub async fn create_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<UpsertShoppingListRequest>,
) -> Result<(StatusCode, Json<ShoppingList>), ApiError> {
    if body.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "name is required".to_string()));
    }
    let list = ShoppingList::create(&state.db, user_id, body.name.trim(), &body.items)
        .await
        .map_err(internal)?;
    info!(%user_id, list_id = %list.id, "shopping list created");
    Ok((StatusCode::CREATED, Json(list)))
}

#[instrument(skip(state))]
pub async fn list_lists(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ShoppingList>>, ApiError> {
    let lists = ShoppingList::list_by_user(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(lists))
}

#[instrument(skip(state))]
pub async fn get_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ShoppingList>, ApiError> {
    let list = ShoppingList::find_owned(&state.db, user_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found("Shopping list"))?;
    Ok(Json(list))
}

#[instrument(skip(state, body))]
pub async fn update_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpsertShoppingListRequest>,
) -> Result<Json<ShoppingList>, ApiError> {
    if body.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "name is required".to_string()));
    }
    let list = ShoppingList::update(&state.db, user_id, id, body.name.trim(), &body.items)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found("Shopping list"))?;
    Ok(Json(list))
}

#[instrument(skip(state))]
pub async fn delete_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = ShoppingList::delete(&state.db, user_id, id)
        .await
        .map_err(internal)?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Shopping list"))
    }
}
