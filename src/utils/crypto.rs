use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use subtle::ConstantTimeEq;

use crate::error::{Error, Result};

pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();
    Ok(password_hash)
}

/// A malformed stored hash counts as a mismatch.
pub fn verify_password(plain: &str, hashed: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hashed) else {
        tracing::warn!("Stored password hash could not be parsed");
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok()
}

pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_only_the_original_password() {
        let hash = hash_password("Secret123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Secret123", &hash));
        assert!(!verify_password("secret123", &hash));
        assert!(!verify_password("Secret123", "not-a-hash"));
    }

    #[test]
    fn constant_time_comparison() {
        assert!(constant_time_eq("adminPass", "adminPass"));
        assert!(!constant_time_eq("adminPass", "adminpass"));
        assert!(!constant_time_eq("admin", "adminPass"));
    }
}
