use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::{
    models::*,
    push::{send_to_tokens, DeliveryPolicy, PushContent},
    services::AppState,
    utils::{AppError, ValidatedBody},
};

/// Send a friend request notification
///
/// Stores the notification for the receiver and pushes it to every device
/// the receiver has registered. An unknown sender or receiver uid is a client
/// fault and answers 404 instead of a server error.
#[utoipa::path(
    post,
    path = "/send-notif",
    request_body = SendNotifReq,
    responses(
        (status = 200, description = "Notification sent", body = SendNotifResponse),
        (status = 400, description = "Invalid request body", body = GenericResponse),
        (status = 404, description = "Sender or receiver uid does not belong to any user", body = GenericResponse),
        (status = 500, description = "Storage or delivery failure", body = GenericResponse),
    ),
    tag = "Notification API"
)]
pub async fn send_notif_handler(
    State(state): State<Arc<AppState>>,
    ValidatedBody(body): ValidatedBody<SendNotifReq>,
) -> Result<Json<SendNotifResponse>, AppError> {
    let sender = get_user(&state, &body.sender_uid, "sender").await?;
    let receiver = get_user(&state, &body.receiver_uid, "receiver").await?;
    let now = Utc::now().with_timezone(&state.reminder_zone);
    let notification = NotificationRecord::friend_request(&sender, &receiver.id, &now);
    state.notifications.create_notification(&notification).await?;
    let content = PushContent::from(&notification);
    send_to_tokens(
        state.push.as_ref(),
        &receiver.fcm_tokens,
        &content,
        DeliveryPolicy::FailFast,
    )
    .await?;
    tracing::debug!("notification sent from {} to {}", sender.id, receiver.id);
    Ok(Json(SendNotifResponse { notification: body }))
}

async fn get_user(state: &AppState, uid: &str, role: &str) -> Result<User, AppError> {
    state
        .users
        .find_user(uid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{role} {uid} not found")))
}
