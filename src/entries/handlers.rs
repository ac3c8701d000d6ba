use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::AuthUser;
use crate::entries::dto::{CreateEntryRequest, DailySummary, DateQuery};
use crate::entries::repo::CalorieEntry;
use crate::errors::{internal, not_found, unprocessable, ApiError};
use crate::nutrition::calculator::{
    aggregate_daily, daily_targets, NutritionError, NutritionTargets,
};
use crate::state::AppState;
use crate::users::repo::User;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/entries", post(create_entry))
        .route("/entries", get(list_entries))
        .route("/entries/:id", delete(delete_entry))
        .route("/entries/summary", get(daily_summary))
}

#[instrument(skip(state, body))]
pub async fn create_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<CalorieEntry>), ApiError> {
    if !(body.calories.is_finite() && body.calories >= 0.0) {
        return Err((
            StatusCode::BAD_REQUEST,
            "calories must be a non-negative number".to_string(),
        ));
    }
    for (field, value) in [
        ("protein_g", body.protein_g),
        ("carbs_g", body.carbs_g),
        ("fat_g", body.fat_g),
        ("fiber_g", body.fiber_g),
        ("quantity", body.quantity),
    ] {
        if let Some(v) = value {
            if !(v.is_finite() && v >= 0.0) {
                return Err((
                    StatusCode::BAD_REQUEST,
                    format!("{} must be a non-negative number", field),
                ));
            }
        }
    }

    let entry = CalorieEntry::create(
        &state.db,
        user_id,
        body.entry_date,
        &body.meal_type,
        &body.food_name,
        body.calories,
        [body.protein_g, body.carbs_g, body.fat_g, body.fiber_g],
        body.quantity,
        body.unit.as_deref(),
        body.source,
        body.image_url.as_deref(),
    )
    .await
    .map_err(internal)?;

    info!(%user_id, entry_id = %entry.id, date = %entry.entry_date, "entry logged");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DateQuery>,
) -> Result<Json<Vec<CalorieEntry>>, ApiError> {
    let entries = CalorieEntry::list_by_date(&state.db, user_id, q.date)
        .await
        .map_err(internal)?;
    Ok(Json(entries))
}

#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = CalorieEntry::delete(&state.db, user_id, id)
        .await
        .map_err(internal)?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Entry"))
    }
}

/// Totals for the day, with targets and remaining budget when the profile
/// is complete enough to compute them.
#[instrument(skip(state))]
pub async fn daily_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DateQuery>,
) -> Result<Json<DailySummary>, ApiError> {
    let entries = CalorieEntry::list_by_date(&state.db, user_id, q.date)
        .await
        .map_err(internal)?;
    let logged: Vec<_> = entries.iter().map(CalorieEntry::logged_macros).collect();
    let totals = aggregate_daily(&logged, q.date);

    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;

    let targets = targets_for(&user).map_err(unprocessable)?;
    let remaining_kcal = targets.map(|t| t.target_kcal as i64 - totals.calories.round() as i64);

    Ok(Json(DailySummary {
        date: q.date,
        totals,
        targets,
        remaining_kcal,
    }))
}

/// An incomplete profile simply has no targets; a complete profile that the
/// calculator rejects is a real error and must not be folded into `None`.
fn targets_for(user: &User) -> Result<Option<NutritionTargets>, NutritionError> {
    match user.nutrition_profile() {
        Ok(p) => daily_targets(
            p.sex,
            p.weight_kg,
            p.height_cm,
            p.age_years,
            p.activity_level,
            p.goal,
        )
        .map(Some),
        Err(_) => Ok(None),
    }
}
