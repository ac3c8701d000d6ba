use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use crate::auth::extractors::AuthUser;
use crate::errors::{internal, unprocessable, ApiError};
use crate::nutrition::calculator::{daily_targets, NutritionTargets};
use crate::nutrition::dto::TargetsRequest;
use crate::state::AppState;
use crate::users::repo::User;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/nutrition/targets", get(profile_targets))
        .route("/nutrition/targets", post(explicit_targets))
}

/// Targets computed from the caller's stored profile. An incomplete profile
/// is an explicit 422, never a zero-calorie answer.
#[instrument(skip(state))]
pub async fn profile_targets(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<NutritionTargets>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;

    let profile = user.nutrition_profile().map_err(|missing| {
        warn!(%user_id, ?missing, "profile incomplete for targets");
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("profile incomplete, missing: {}", missing.join(", ")),
        )
    })?;

    let targets = daily_targets(
        profile.sex,
        profile.weight_kg,
        profile.height_cm,
        profile.age_years,
        profile.activity_level,
        profile.goal,
    )
    .map_err(unprocessable)?;

    Ok(Json(targets))
}

/// Targets from explicit inputs, for callers with nothing saved yet.
/// Authenticated like everything else, but touches no stored state.
#[instrument(skip(body))]
pub async fn explicit_targets(
    AuthUser(_user_id): AuthUser,
    Json(body): Json<TargetsRequest>,
) -> Result<Json<NutritionTargets>, ApiError> {
    let targets = daily_targets(
        body.sex,
        body.weight_kg,
        body.height_cm,
        body.age_years,
        body.activity_level,
        body.goal,
    )
    .map_err(unprocessable)?;

    Ok(Json(targets))
}
