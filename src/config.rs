use anyhow::{anyhow, Context};
use serde::Deserialize;

/// One year.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

/// Attributes of the `token` session cookie.
#[derive(Debug, Clone, Deserialize)]
pub struct CookieConfig {
    pub domain: String,
    pub secure: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ValidationLimits {
    pub email_max_len: usize,
    pub password_max_len: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            email_max_len: 30,
            password_max_len: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cookie: CookieConfig,
    pub limits: ValidationLimits,
    pub cors_origin: Option<String>,
}

impl AppConfig {
    /// Loads `.env` first when `APP_ENV=dev`, then reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        if std::env::var("APP_ENV").as_deref() == Ok("dev") {
            dotenvy::dotenv().context("load .env for APP_ENV=dev")?;
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{key} must be set"));
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                required("POSTGRES_USER")?,
                required("POSTGRES_PW")?,
                required("POSTGRES_HOST")?,
                or_default("POSTGRES_PORT", "5432"),
                required("POSTGRES_DB")?,
            ),
        };

        let database = DatabaseConfig {
            url: database_url,
            max_connections: or_default("DATABASE_MAX_CONNECTIONS", "10")
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
        };

        let jwt = JwtConfig {
            secret: required("SECRET")?,
            ttl_hours: or_default("SESSION_TTL_HOURS", "12")
                .parse()
                .context("SESSION_TTL_HOURS must be an integer")?,
        };
        anyhow::ensure!(!jwt.secret.is_empty(), "SECRET must not be empty");
        anyhow::ensure!(
            (1..=MAX_SESSION_TTL_HOURS).contains(&jwt.ttl_hours),
            "SESSION_TTL_HOURS must be between 1 and {MAX_SESSION_TTL_HOURS}"
        );

        let cookie = CookieConfig {
            domain: required("API_DOMAIN")?,
            secure: or_default("COOKIE_SECURE", "true")
                .parse()
                .context("COOKIE_SECURE must be true or false")?,
        };

        let defaults = ValidationLimits::default();
        let limits = ValidationLimits {
            email_max_len: match lookup("EMAIL_MAX_LEN") {
                Some(v) => v.parse().context("EMAIL_MAX_LEN must be an integer")?,
                None => defaults.email_max_len,
            },
            password_max_len: match lookup("PASSWORD_MAX_LEN") {
                Some(v) => v.parse().context("PASSWORD_MAX_LEN must be an integer")?,
                None => defaults.password_max_len,
            },
        };

        Ok(Self {
            host: or_default("APP_HOST", "0.0.0.0"),
            port: or_default("APP_PORT", "8080")
                .parse()
                .context("APP_PORT must be a port number")?,
            database,
            jwt,
            cookie,
            limits,
            cors_origin: lookup("CORS_ORIGIN").filter(|v| !v.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn assembles_database_url_from_postgres_parts() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("POSTGRES_USER", "app"),
            ("POSTGRES_PW", "pw"),
            ("POSTGRES_HOST", "db"),
            ("POSTGRES_PORT", "5434"),
            ("POSTGRES_DB", "accounts"),
            ("SECRET", "s3cret"),
            ("API_DOMAIN", "localhost"),
        ]))
        .expect("config should load");

        assert_eq!(cfg.database.url, "postgres://app:pw@db:5434/accounts");
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.jwt.ttl_hours, 12);
        assert_eq!(cfg.cookie.domain, "localhost");
        assert!(cfg.cookie.secure);
        assert_eq!(cfg.limits.email_max_len, 30);
        assert_eq!(cfg.limits.password_max_len, 30);
        assert_eq!(cfg.port, 8080);
        assert!(cfg.cors_origin.is_none());
    }

    #[test]
    fn database_url_takes_precedence() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x@y/z"),
            ("SECRET", "s"),
            ("API_DOMAIN", "api.example.com"),
            ("SESSION_TTL_HOURS", "2"),
            ("PASSWORD_MAX_LEN", "64"),
            ("CORS_ORIGIN", "https://app.example.com"),
        ]))
        .expect("config should load");

        assert_eq!(cfg.database.url, "postgres://x@y/z");
        assert_eq!(cfg.jwt.ttl_hours, 2);
        assert_eq!(cfg.limits.password_max_len, 64);
        assert_eq!(cfg.cors_origin.as_deref(), Some("https://app.example.com"));
    }

    #[test]
    fn missing_secret_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x@y/z"),
            ("API_DOMAIN", "localhost"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SECRET"));
    }

    #[test]
    fn rejects_non_positive_ttl() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x@y/z"),
            ("SECRET", "s"),
            ("API_DOMAIN", "localhost"),
            ("SESSION_TTL_HOURS", "0"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SESSION_TTL_HOURS"));
    }

    #[test]
    fn rejects_oversized_ttl() {
        let base = [
            ("DATABASE_URL", "postgres://x@y/z"),
            ("SECRET", "s"),
            ("API_DOMAIN", "localhost"),
        ];
        let with_ttl = |ttl: &'static str| {
            let mut pairs = base.to_vec();
            pairs.push(("SESSION_TTL_HOURS", ttl));
            AppConfig::from_lookup(lookup_from(&pairs))
        };

        assert_eq!(with_ttl("8760").unwrap().jwt.ttl_hours, MAX_SESSION_TTL_HOURS);
        let err = with_ttl("8761").unwrap_err();
        assert!(err.to_string().contains("SESSION_TTL_HOURS"));
        assert!(with_ttl("9223372036854775807").is_err());
    }

    #[test]
    fn cookie_secure_can_be_disabled() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x@y/z"),
            ("SECRET", "s"),
            ("API_DOMAIN", "localhost"),
            ("COOKIE_SECURE", "false"),
        ]))
        .expect("config should load");
        assert!(!cfg.cookie.secure);

        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x@y/z"),
            ("SECRET", "s"),
            ("API_DOMAIN", "localhost"),
            ("COOKIE_SECURE", "maybe"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("COOKIE_SECURE"));
    }
}
