use axum::http::Uri;
use axum::{http::StatusCode, Json};

use crate::models::GenericResponse;

/// Fallback for every route the router does not know
pub async fn global_404_handler(uri: Uri) -> (StatusCode, Json<GenericResponse>) {
    let message = format!("Route `{}` does not exist", uri.path());
    tracing::debug!(message);
    let res = GenericResponse {
        success: false,
        message,
    };
    (StatusCode::NOT_FOUND, Json(res))
}
