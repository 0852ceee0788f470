use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::repo_types::User;

/// Request body for sign-up and log-in. Missing fields bind as empty strings.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

// Keeps the plaintext password out of `{:?}` output and tracing fields.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Public part of the user returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn public_user_never_carries_the_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };

        let json = serde_json::to_value(PublicUser::from(user.clone())).unwrap();
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json.as_object().unwrap().len(), 2);

        let row_json = serde_json::to_string(&user).unwrap();
        assert!(!row_json.contains("password"));
        assert!(!row_json.contains("argon2"));
    }

    #[test]
    fn missing_fields_bind_as_empty() {
        let cred: Credential = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(cred.email, "a@x.com");
        assert_eq!(cred.password, "");

        let cred: Credential = serde_json::from_str("{}").unwrap();
        assert!(cred.email.is_empty() && cred.password.is_empty());
    }

    #[test]
    fn credential_debug_redacts_password() {
        let cred = Credential {
            email: "a@x.com".into(),
            password: "secret123".into(),
        };
        let dbg = format!("{cred:?}");
        assert!(dbg.contains("a@x.com"));
        assert!(!dbg.contains("secret123"));
    }
}
