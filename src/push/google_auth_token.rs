use anyhow::Context;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use super::{ServiceAccountKey, HTTP_CLIENT};
use crate::{constants::*, utils::get_epoch_ts};

#[derive(Debug, Serialize, Deserialize)]
struct GoogleTokenClaims {
    iss: String,
    iat: u64,
    exp: u64,
    aud: String,
    scope: String,
}

impl GoogleTokenClaims {
    fn new(key: &ServiceAccountKey, ts: u64) -> Self {
        Self {
            iss: key.client_email.to_owned(),
            iat: ts,
            exp: ts + 3600,
            aud: key.token_uri.to_owned(),
            scope: FIREBASE_MESSAGE_SCOPE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
    expires_in: u64,
}

/// OAuth2 access token for FCM, minted from the service account key
/// and reused until shortly before it expires
pub struct GoogleAuthToken {
    key: ServiceAccountKey,
    access_token: Option<String>,
    valid_till: Option<u64>,
    signing_key: Option<EncodingKey>,
}

impl GoogleAuthToken {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self {
            key,
            access_token: None,
            valid_till: None,
            signing_key: None,
        }
    }

    pub async fn get_access_token(&mut self) -> anyhow::Result<String> {
        if self.is_new_token_required(get_epoch_ts()) {
            self.new_access_token().await?;
        }
        self.access_token
            .clone()
            .ok_or_else(|| anyhow::anyhow!("access_token not found"))
    }

    fn get_signing_key(&mut self) -> anyhow::Result<&EncodingKey> {
        if self.signing_key.is_none() {
            let key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
                .context("invalid service account private key")?;
            self.signing_key = Some(key);
        }
        let signing_key = self
            .signing_key
            .as_ref()
            .ok_or(anyhow::anyhow!("signing_key not found"))?;
        Ok(signing_key)
    }

    fn is_new_token_required(&self, ts: u64) -> bool {
        match (&self.access_token, self.valid_till) {
            (Some(_), Some(valid_till)) => ts >= valid_till,
            _ => true,
        }
    }

    async fn new_access_token(&mut self) -> anyhow::Result<()> {
        tracing::debug!("requesting new google access token");
        let signed_jwt = self.new_jwt()?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, "application/x-www-form-urlencoded".parse()?);
        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", signed_jwt.as_str()),
        ];
        let response = HTTP_CLIENT
            .post(&self.key.token_uri)
            .headers(headers)
            .form(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<GoogleTokenResponse>()
            .await?;
        let ts = get_epoch_ts();
        let valid_till = (ts + response.expires_in).saturating_sub(ACCESS_TOKEN_EXPIRY_MARGIN);
        self.access_token = Some(response.access_token);
        self.valid_till = Some(valid_till);

        Ok(())
    }

    fn new_jwt(&mut self) -> anyhow::Result<String> {
        let claims = GoogleTokenClaims::new(&self.key, get_epoch_ts());
        let key = self.get_signing_key()?;
        let header = Header::new(Algorithm::RS256);
        let jwt = encode(&header, &claims, key)?;
        Ok(jwt)
    }
}
