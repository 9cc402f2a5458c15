use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// request body schema for send notification
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_distinct_uids"))]
pub struct SendNotifReq {
    #[serde(default)]
    #[validate(length(min = 1, message = "senderUid can't be empty"))]
    pub sender_uid: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "receiverUid can't be empty"))]
    pub receiver_uid: String,
}

/// a user can not send a notification to themself
fn validate_distinct_uids(req: &SendNotifReq) -> Result<(), ValidationError> {
    if req.sender_uid == req.receiver_uid {
        let mut err = ValidationError::new("uids");
        err.message = Some("Can't send a notification to yourself".into());
        return Err(err);
    }
    Ok(())
}
