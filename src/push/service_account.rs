use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use crate::constants::GOOGLE_TOKEN_URL;

/// The fields of a Google service account key file used for FCM
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URL.to_string()
}

impl ServiceAccountKey {
    pub async fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read(path)
            .await
            .with_context(|| format!("reading service account key {}", path.display()))?;
        let key = serde_json::from_slice::<Self>(&raw)
            .with_context(|| format!("parsing service account key {}", path.display()))?;
        tracing::debug!("loaded service account {} for project {}", key.client_email, key.project_id);
        Ok(key)
    }
}
