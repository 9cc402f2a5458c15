use async_trait::async_trait;
use lazy_static::lazy_static;
use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;

use crate::models::NotificationRecord;

mod fcm;
mod google_auth_token;
mod service_account;

pub use fcm::FcmClient;
pub use google_auth_token::GoogleAuthToken;
pub use service_account::ServiceAccountKey;

lazy_static! {
    static ref HTTP_CLIENT: reqwest::Client = reqwest::Client::new();
}

/// One push message addressed to a single device token
#[derive(Debug, Clone, PartialEq)]
pub struct PushMessage {
    pub token: String,
    pub title: String,
    pub body: String,
    pub data: Option<HashMap<String, String>>,
}

/// Title, body and payload shared by every device of one notification event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PushContent {
    pub title: String,
    pub body: String,
    pub data: Option<HashMap<String, String>>,
}

impl PushContent {
    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.data
            .get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    fn to_message(&self, token: &str) -> PushMessage {
        PushMessage {
            token: token.to_string(),
            title: self.title.to_owned(),
            body: self.body.to_owned(),
            data: self.data.clone(),
        }
    }
}

impl From<&NotificationRecord> for PushContent {
    fn from(noti: &NotificationRecord) -> Self {
        Self {
            title: noti.title.to_owned(),
            body: noti.body.to_owned(),
            data: None,
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send(&self, msg: &PushMessage) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Try every token, fail only when no token could be reached
    BestEffort,
    /// Stop at the first token that fails
    FailFast,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DeliveryReport {
    pub attempted: usize,
    pub delivered: usize,
    pub failed_tokens: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("no push tokens registered")]
    NoTokens,
    #[error("failed sending notification, all {attempted} push tokens failed")]
    AllFailed { attempted: usize },
    #[error("failed sending notification to {token}: {reason}")]
    Send { token: String, reason: String },
}

/// Deliver `content` to every token according to `policy`.
///
/// With [`DeliveryPolicy::BestEffort`] an empty token list is an error since
/// nothing reached the user. With [`DeliveryPolicy::FailFast`] it is not,
/// there was simply nothing to fail.
pub async fn send_to_tokens(
    sender: &dyn PushSender,
    tokens: &[String],
    content: &PushContent,
    policy: DeliveryPolicy,
) -> Result<DeliveryReport, DeliveryError> {
    let mut report = DeliveryReport::default();
    for token in tokens {
        report.attempted += 1;
        match sender.send(&content.to_message(token)).await {
            Ok(()) => report.delivered += 1,
            Err(err) => {
                tracing::warn!("push to token {token} failed: {err:?}");
                if policy == DeliveryPolicy::FailFast {
                    return Err(DeliveryError::Send {
                        token: token.to_owned(),
                        reason: err.to_string(),
                    });
                }
                report.failed_tokens.push(token.to_owned());
            }
        }
    }
    if policy == DeliveryPolicy::BestEffort {
        if tokens.is_empty() {
            return Err(DeliveryError::NoTokens);
        }
        if report.delivered == 0 {
            return Err(DeliveryError::AllFailed {
                attempted: report.attempted,
            });
        }
    }
    Ok(report)
}
