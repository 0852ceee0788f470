use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                     // unique user ID
    pub email: String,                // unique login email
    #[serde(skip_serializing)]
    pub password_hash: String,        // Argon2 PHC string, never the plaintext
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
