use axum::http::StatusCode;

pub type ApiError = (StatusCode, String);

pub fn internal<E: std::fmt::Display>(e: E) -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

pub fn not_found(what: &str) -> ApiError {
    (StatusCode::NOT_FOUND, format!("{} not found", what))
}

pub fn unprocessable<E: std::fmt::Display>(e: E) -> ApiError {
    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}
