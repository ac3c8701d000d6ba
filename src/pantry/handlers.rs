use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::AuthUser;
use crate::errors::{internal, not_found, ApiError};
use crate::pantry::dto::{PantryItemResponse, UpsertPantryItemRequest};
use crate::pantry::repo::PantryItem;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pantry", post(create_item))
        .route("/pantry", get(list_items))
        .route("/pantry/:id", put(update_item))
        .route("/pantry/:id", delete(delete_item))
}

fn validate(body: &UpsertPantryItemRequest) -> Result<(), ApiError> {
    if body.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "name is required".to_string()));
    }
    if !(body.quantity.is_finite() && body.quantity > 0.0) {
        return Err((
            StatusCode::BAD_REQUEST,
            "quantity must be positive".to_string(),
        ));
    }
    Ok(())
}

#[instrument(skip(state, body))]
pub async fn create_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<UpsertPantryItemRequest>,
) -> Result<(StatusCode, Json<PantryItemResponse>), ApiError> {
    validate(&body)?;

    let item = PantryItem::create(
        &state.db,
        user_id,
        body.name.trim(),
        body.quantity,
        body.unit.as_deref(),
        body.category.as_deref(),
        body.expiry_date,
    )
    .await
    .map_err(internal)?;

    info!(%user_id, item_id = %item.id, "pantry item added");
    let today = OffsetDateTime::now_utc().date();
    Ok((
        StatusCode::CREATED,
        Json(PantryItemResponse::annotate(item, today)),
    ))
}

#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<PantryItemResponse>>, ApiError> {
    let items = PantryItem::list_by_user(&state.db, user_id)
        .await
        .map_err(internal)?;
    let today = OffsetDateTime::now_utc().date();
    let annotated = items
        .into_iter()
        .map(|i| PantryItemResponse::annotate(i, today))
        .collect();
    Ok(Json(annotated))
}

#[instrument(skip(state, body))]
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpsertPantryItemRequest>,
) -> Result<Json<PantryItemResponse>, ApiError> {
    validate(&body)?;

    let item = PantryItem::update(
        &state.db,
        user_id,
        id,
        body.name.trim(),
        body.quantity,
        body.unit.as_deref(),
        body.category.as_deref(),
        body.expiry_date,
    )
    .await
    .map_err(internal)?
    .ok_or_else(|| not_found("Pantry item"))?;

    let today = OffsetDateTime::now_utc().date();
    Ok(Json(PantryItemResponse::annotate(item, today)))
}

#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = PantryItem::delete(&state.db, user_id, id)
        .await
        .map_err(internal)?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Pantry item"))
    }
}
