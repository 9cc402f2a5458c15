use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::GenericResponse;

#[derive(Debug)]
pub enum AppError {
    BadRequestErr(String),
    NotFound(String),
    AnyError(anyhow::Error),
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self::AnyError(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            Self::BadRequestErr(msg) => {
                tracing::debug!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            Self::NotFound(msg) => {
                tracing::debug!("Not Found: {}", msg);
                (StatusCode::NOT_FOUND, msg)
            }
            Self::AnyError(err) => {
                let msg = format!("Something went wrong: {err}");
                tracing::error!("{err:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        let response = GenericResponse {
            success: false,
            message: msg,
        };
        (status, Json(response)).into_response()
    }
}
