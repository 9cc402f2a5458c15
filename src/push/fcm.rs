use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::{GoogleAuthToken, PushMessage, PushSender, ServiceAccountKey, HTTP_CLIENT};
use crate::constants::*;

#[derive(Debug, Serialize)]
struct PushMessageNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct FcmMessage<'a> {
    token: &'a str,
    notification: PushMessageNotification<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a HashMap<String, String>>,
}

#[derive(Debug, Serialize)]
struct PushPayload<'a> {
    message: FcmMessage<'a>,
}

impl<'a> PushPayload<'a> {
    fn new(msg: &'a PushMessage) -> Self {
        let notification = PushMessageNotification {
            title: &msg.title,
            body: &msg.body,
        };
        let message = FcmMessage {
            token: &msg.token,
            notification,
            data: msg.data.as_ref().filter(|data| !data.is_empty()),
        };
        Self { message }
    }
}

/// Firebase Cloud Messaging HTTP v1 client
pub struct FcmClient {
    endpoint: String,
    auth: Mutex<GoogleAuthToken>,
}

impl FcmClient {
    pub fn new(key: ServiceAccountKey) -> Self {
        let endpoint = format!("{}/{}/messages:send", FCM_BASE_URL, key.project_id);
        Self {
            endpoint,
            auth: Mutex::new(GoogleAuthToken::new(key)),
        }
    }
}

#[async_trait]
impl PushSender for FcmClient {
    async fn send(&self, msg: &PushMessage) -> anyhow::Result<()> {
        let access_token = self.auth.lock().await.get_access_token().await?;
        let bearer_token = format!("Bearer {}", access_token);
        let payload = PushPayload::new(msg);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer_token.as_str().parse()?);
        headers.insert(CONTENT_TYPE, "application/json".parse()?);
        let res = HTTP_CLIENT
            .post(&self.endpoint)
            .headers(headers)
            .json(&payload)
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            anyhow::bail!("fcm responded with {status}: {body}");
        }
        Ok(())
    }
}
