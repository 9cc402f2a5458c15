use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::SendNotifReq;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenericResponse {
    pub success: bool,
    pub message: String,
}

/// response schema for send notification, echoes the request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendNotifResponse {
    pub notification: SendNotifReq,
}
