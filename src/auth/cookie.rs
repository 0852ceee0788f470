use anyhow::Context;
use axum::http::{header, HeaderMap, HeaderValue};
use time::{macros::format_description, OffsetDateTime, UtcOffset};

use crate::config::CookieConfig;

pub const SESSION_COOKIE: &str = "token";

fn http_date(at: OffsetDateTime) -> anyhow::Result<String> {
    let fmt = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    at.to_offset(UtcOffset::UTC)
        .format(fmt)
        .context("format cookie expiry")
}

fn build(
    cfg: &CookieConfig,
    value: &str,
    expires: OffsetDateTime,
    max_age: i64,
) -> anyhow::Result<HeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE}={value}; HttpOnly");
    if cfg.secure {
        cookie.push_str("; Secure");
    }
    cookie.push_str("; SameSite=None; Path=/");
    if !cfg.domain.is_empty() {
        cookie.push_str(&format!("; Domain={}", cfg.domain));
    }
    cookie.push_str(&format!(
        "; Max-Age={}; Expires={}",
        max_age.max(0),
        http_date(expires)?
    ));
    HeaderValue::from_str(&cookie).context("session cookie is not a valid header value")
}

/// `Set-Cookie` carrying the session token; it expires together with the token.
pub fn session_cookie(
    cfg: &CookieConfig,
    token: &str,
    expires_at: OffsetDateTime,
) -> anyhow::Result<HeaderValue> {
    let max_age = (expires_at - OffsetDateTime::now_utc()).whole_seconds();
    build(cfg, token, expires_at, max_age)
}

/// `Set-Cookie` that makes the client drop the session cookie immediately.
pub fn cleared_cookie(cfg: &CookieConfig) -> anyhow::Result<HeaderValue> {
    build(cfg, "", OffsetDateTime::UNIX_EPOCH, 0)
}

pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}
