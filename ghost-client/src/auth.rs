//! Admin API key handling and token minting.
//!
//! Ghost Admin API keys are `<id>:<secret>` pairs where the secret is
//! hex-encoded. Each request is authenticated with a short-lived HS256 JWT
//! signed by the decoded secret, carrying the key id in the `kid` header and
//! `/admin/` as the audience.

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

use crate::error::{ClientError, ClientResult};

/// Token lifetime in seconds. The Admin API rejects anything over five minutes.
const TOKEN_TTL_SECS: i64 = 5 * 60;

const ADMIN_AUDIENCE: &str = "/admin/";

#[derive(Debug, Serialize)]
struct AdminClaims<'a> {
    iat: i64,
    exp: i64,
    aud: &'a str,
}

/// A parsed Admin API key.
#[derive(Debug, Clone)]
pub struct AdminKey {
    id: String,
    secret: Vec<u8>,
}

impl AdminKey {
    /// Parse a raw `<id>:<secret>` key string.
    pub fn parse(raw: &str) -> ClientResult<Self> {
        let (id, secret_hex) = raw.split_once(':').ok_or_else(|| {
            ClientError::config_error("admin API key must be in '<id>:<secret>' format")
        })?;

        if id.is_empty() || secret_hex.is_empty() {
            return Err(ClientError::config_error(
                "admin API key must be in '<id>:<secret>' format",
            ));
        }

        let secret = hex::decode(secret_hex).map_err(|e| {
            ClientError::config_error(format!("admin API key secret is not valid hex: {e}"))
        })?;

        Ok(Self {
            id: id.to_string(),
            secret,
        })
    }

    /// Key id half, sent as the JWT `kid` header.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Mint a fresh authentication token for one request.
    pub fn token(&self) -> ClientResult<String> {
        let iat = Utc::now().timestamp();
        let claims = AdminClaims {
            iat,
            exp: iat + TOKEN_TTL_SECS,
            aud: ADMIN_AUDIENCE,
        };

        let header = Header {
            alg: Algorithm::HS256,
            kid: Some(self.id.clone()),
            ..Header::default()
        };

        encode(&header, &claims, &EncodingKey::from_secret(&self.secret))
            .map_err(|e| ClientError::Auth(e.to_string()))
    }
}
