use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::{auth::claims::Claims, config::JwtConfig, state::AppState};

/// A signed session token and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: OffsetDateTime,
}

/// HS256 signing and verification keys.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl JwtKeys {
    pub fn new(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: Duration::hours(cfg.ttl_hours),
        }
    }

    pub fn sign(&self, user_id: Uuid) -> anyhow::Result<SessionToken> {
        self.sign_at(user_id, OffsetDateTime::now_utc())
    }

    pub fn sign_at(&self, user_id: Uuid, now: OffsetDateTime) -> anyhow::Result<SessionToken> {
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: expires_at.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "jwt signed");
        Ok(SessionToken { token, expires_at })
    }

    /// Signature and expiry only; no server-side session lookup.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        JwtKeys::new(&state.config.jwt)
    }
}
