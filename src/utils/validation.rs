use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest},
    http::Request,
    Json,
};
use validator::{Validate, ValidationErrors};

use super::AppError;

/// JSON body extractor which also runs the `validator` rules of `T`
pub struct ValidatedBody<T>(pub T);

#[async_trait]
impl<S, B, T> FromRequest<S, B> for ValidatedBody<T>
where
    B: Send + 'static,
    S: Send + Sync,
    T: Validate + 'static,
    Json<T>: FromRequest<S, B, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| AppError::BadRequestErr(format!("Invalid JSON body: {}", err.body_text())))?;
        data.validate()
            .map_err(|errors| AppError::BadRequestErr(validation_message(&errors)))?;
        Ok(Self(data))
    }
}

/// Flatten validation errors into a single message.
/// Custom messages are preferred over the bare error code.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match err.message.as_ref() {
                Some(msg) => msg.to_string(),
                None => format!("{field}: {}", err.code),
            })
        })
        .collect::<Vec<_>>();
    messages.sort();
    messages.join(", ")
}
