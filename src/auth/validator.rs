use thiserror::Error;

use crate::{auth::dto::Credential, config::ValidationLimits};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("email is required")]
    EmailRequired,
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("password is required")]
    PasswordRequired,
    #[error("password must be at most {max} characters")]
    PasswordTooLong { max: usize },
}

/// Structural checks only; the email format is not inspected.
pub fn validate(cred: &Credential, limits: &ValidationLimits) -> Result<(), ValidationError> {
    if cred.email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if cred.email.chars().count() > limits.email_max_len {
        return Err(ValidationError::EmailTooLong {
            max: limits.email_max_len,
        });
    }
    if cred.password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if cred.password.chars().count() > limits.password_max_len {
        return Err(ValidationError::PasswordTooLong {
            max: limits.password_max_len,
        });
    }
    Ok(())
}
