use std::sync::Arc;

use axum::extract::FromRef;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{Credential, PublicUser},
        error::AccountError,
        jwt::{JwtKeys, SessionToken},
        password::{hash_password, verify_password, DUMMY_HASH},
        repo::UserRepository,
        validator::validate,
    },
    config::ValidationLimits,
    state::AppState,
};

/// Sign-up and log-in orchestration. Holds no per-request state.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    keys: JwtKeys,
    limits: ValidationLimits,
}

async fn check_password(password: String, hash: String) -> Result<bool, AccountError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AccountError::Crypto(e.to_string()))?
        .map_err(|e| AccountError::Crypto(e.to_string()))
}

impl FromRef<AppState> for AccountService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(
            state.users.clone(),
            JwtKeys::from_ref(state),
            state.config.limits,
        )
    }
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, keys: JwtKeys, limits: ValidationLimits) -> Self {
        Self {
            users,
            keys,
            limits,
        }
    }

    #[instrument(skip(self, cred), fields(email = %cred.email))]
    pub async fn sign_up(&self, cred: Credential) -> Result<PublicUser, AccountError> {
        validate(&cred, &self.limits)?;

        let Credential { email, password } = cred;
        let hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AccountError::Crypto(e.to_string()))?
            .map_err(|e| AccountError::Crypto(e.to_string()))?;

        let user = self.users.create(&email, &hash).await?;
        info!(user_id = %user.id, "user registered");
        Ok(user.into())
    }

    #[instrument(skip(self, cred), fields(email = %cred.email))]
    pub async fn log_in(&self, cred: Credential) -> Result<SessionToken, AccountError> {
        validate(&cred, &self.limits)?;

        let Some(user) = self.users.find_by_email(&cred.email).await? else {
            // same Argon2 work as a wrong password
            let _ = check_password(cred.password, DUMMY_HASH.to_string()).await;
            warn!("login unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        let ok = check_password(cred.password, user.password_hash.clone()).await?;
        if !ok {
            warn!(user_id = %user.id, "login invalid password");
            return Err(AccountError::InvalidCredentials);
        }

        let session = self
            .keys
            .sign(user.id)
            .map_err(|e| AccountError::Crypto(e.to_string()))?;
        info!(user_id = %user.id, "user logged in");
        Ok(session)
    }

    /// Resolves a session token to the account it was issued for.
    pub async fn current_user(&self, token: &str) -> Result<PublicUser, AccountError> {
        let claims = self.keys.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            AccountError::Unauthenticated
        })?;
        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or(AccountError::Unauthenticated)?;
        Ok(user.into())
    }
}
