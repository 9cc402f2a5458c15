use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    routing::post,
    BoxError, Json, Router,
};
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    constants::*, handlers::*, models::GenericResponse, services::AppState, swagger::ApiDoc,
};

/// Build the API router with all routes and middlewares
pub fn build_app(state: Arc<AppState>) -> Router {
    tracing::debug!("Initializing the app");
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());
    let middlewares = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(HandleErrorLayer::new(handle_timeout_error))
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));

    Router::new()
        .route("/send-notif", post(send_notif_handler))
        .merge(swagger_ui)
        .fallback(global_404_handler)
        .layer(middlewares)
        .with_state(state)
}

async fn handle_timeout_error(err: BoxError) -> (StatusCode, Json<GenericResponse>) {
    let (status, message) = if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {err}"),
        )
    };
    tracing::debug!("{message}");
    let response = GenericResponse {
        success: false,
        message,
    };
    (status, Json(response))
}
