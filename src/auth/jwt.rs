use axum::http::{header::AUTHORIZATION, HeaderMap};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use super::claims::Claims;
use crate::{config::JwtConfig, users::repo_types::User};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Issues and checks the signed identity tokens carried as bearer
/// credentials.
pub trait TokenAuthority: Send + Sync {
    fn issue(&self, user: &User) -> Result<String, TokenError>;

    fn verify(&self, token: &str) -> Result<Claims, TokenError>;

    /// Resolves the user id asserted by the request's bearer token.
    fn identify_caller(&self, headers: &HeaderMap) -> Result<i64, TokenError> {
        let token = bearer_token(headers);
        let claims = self.verify(&token)?;
        Ok(claims.id)
    }
}

/// Credential from the `Authorization` header: a leading `"Bearer "` is
/// stripped when present, then surrounding whitespace. A missing or
/// non-ASCII header yields an empty string.
pub fn bearer_token(headers: &HeaderMap) -> String {
    let raw = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();
    raw.strip_prefix("Bearer ").unwrap_or(raw).trim().to_string()
}

/// HMAC-SHA256 keys derived from the process-wide shared secret.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: TimeDuration,
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: TimeDuration::hours(cfg.ttl_hours),
        }
    }
}

impl TokenAuthority for JwtKeys {
    fn issue(&self, user: &User) -> Result<String, TokenError> {
        let exp = OffsetDateTime::now_utc() + self.ttl;
        let claims = Claims {
            id: user.id,
            username: user.username.clone(),
            exp: exp.unix_timestamp() as usize,
        };
        let token =
            encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Signing)?;
        debug!(user_id = user.id, "jwt signed");
        Ok(token)
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(TokenError::Invalid)?;
        debug!(user_id = data.claims.id, "jwt verified");
        Ok(data.claims)
    }
}
