use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::auth::{
    cookie::{extract_cookie, SESSION_COOKIE},
    error::AccountError,
};

/// Raw session token from the `token` cookie, or an `Authorization: Bearer` header.
pub struct AuthToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AuthToken
where
    S: Send + Sync,
{
    type Rejection = AccountError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookie = extract_cookie(&parts.headers, SESSION_COOKIE).filter(|t| !t.is_empty());
        if let Some(token) = cookie {
            return Ok(AuthToken(token));
        }

        parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer ").or_else(|| h.strip_prefix("bearer ")))
            .map(|t| AuthToken(t.trim().to_string()))
            .ok_or(AccountError::Unauthenticated)
    }
}
