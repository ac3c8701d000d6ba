use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::extractors::AuthUser;
use crate::errors::{internal, ApiError};
use crate::state::AppState;
use crate::users::dto::{ProfileResponse, UpdateProfileRequest};
use crate::users::repo::User;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/me", put(update_me))
}

fn to_response(user: User) -> ProfileResponse {
    ProfileResponse {
        id: user.id,
        email: user.email,
        name: user.name,
        sex: user.sex,
        age: user.age,
        height_cm: user.height_cm,
        weight_kg: user.weight_kg,
        activity_level: user.activity_level,
        goal: user.goal,
        dietary_restrictions: user.dietary_restrictions,
        subscription_tier: user.subscription_tier,
        created_at: user.created_at,
    }
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;
    Ok(Json(to_response(user)))
}

#[instrument(skip(state, body))]
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    // Reject out-of-range demographics at the boundary instead of letting
    // them surface later as a calculator error.
    if let Some(age) = body.age {
        if age <= 0 {
            warn!(%user_id, age, "rejecting non-positive age");
            return Err((StatusCode::BAD_REQUEST, "age must be positive".to_string()));
        }
    }
    if let Some(h) = body.height_cm {
        if !(h.is_finite() && h > 0.0) {
            return Err((StatusCode::BAD_REQUEST, "height_cm must be positive".to_string()));
        }
    }
    if let Some(w) = body.weight_kg {
        if !(w.is_finite() && w > 0.0) {
            return Err((StatusCode::BAD_REQUEST, "weight_kg must be positive".to_string()));
        }
    }

    let user = User::update_profile(
        &state.db,
        user_id,
        body.name.as_deref(),
        body.sex,
        body.age,
        body.height_cm,
        body.weight_kg,
        body.activity_level,
        body.goal,
        &body.dietary_restrictions,
    )
    .await
    .map_err(internal)?;

    info!(%user_id, "profile updated");
    Ok(Json(to_response(user)))
}
