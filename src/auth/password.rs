use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Well-formed hash with default Argon2 parameters that matches no password.
/// Log-in verifies against it for unknown emails so both failure paths cost the same.
pub const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$08KDy53gmlCkCuFPzSLNEA$SGSz25rO4rzd98TSFW5UdATdJk+K/dqP3g5eVf1+tcQ";

/// Argon2id with a fresh random salt per call.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash cannot be parsed.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("secret123").expect("hashing should succeed");
        assert_ne!(hash, "secret123");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secret123", &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("correct-horse").expect("hashing should succeed");
        assert!(!verify_password("wrong", &hash).expect("verify should not error"));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("secret123").unwrap();
        let b = hash_password("secret123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn dummy_hash_parses_and_matches_nothing() {
        assert!(!verify_password("secret123", DUMMY_HASH).expect("dummy hash must parse"));
        assert!(!verify_password("", DUMMY_HASH).expect("dummy hash must parse"));

        let real = PasswordHash::new(&hash_password("x").unwrap())
            .unwrap()
            .params
            .to_string();
        let dummy = PasswordHash::new(DUMMY_HASH).unwrap().params.to_string();
        assert_eq!(real, dummy);
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
