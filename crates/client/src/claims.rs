use base64::Engine;
use serde::Deserialize;

use crate::error::{ClientError, Result};

/// Payload claims of the backend's JWT. Only what the client reads;
/// signature verification stays on the server.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// User id, under `id` or the standard `sub`.
    #[serde(alias = "sub")]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry as a unix timestamp. The client does not refresh tokens;
    /// an expired one just starts failing with 401s.
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Decodes the payload segment of a bearer token without verifying it.
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let payload = token.split('.').nth(1).ok_or(ClientError::InvalidToken)?;
    let bytes = base64::prelude::BASE64_URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| ClientError::InvalidToken)?;
    serde_json::from_slice(&bytes).map_err(|_| ClientError::InvalidToken)
}
