//! Password hashing
//!
//! Argon2id with a random per-user salt. Hash and salt are stored as
//! separate base64 strings, and verification recomputes the hash and
//! compares in constant time.

use crate::error::{AppError, Result};
use argon2::password_hash::{Output, SaltString};
use argon2::{Argon2, PasswordHasher};
use rand::rngs::OsRng;
use rand::RngCore;

const SALT_SIZE: usize = 16; // 128 bits

/// Hash a password with a fresh random salt.
///
/// Returns `(hash, salt)`, both base64-encoded.
pub fn hash_password(password: &str) -> Result<(String, String)> {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);

    let salt_string = SaltString::encode_b64(&salt)
        .map_err(|e| AppError::PasswordHash(format!("Salt encoding failed: {}", e)))?;

    let output = derive(password, &salt_string)?;

    Ok((output.to_string(), salt_string.as_str().to_string()))
}

/// Check a password against a stored hash and salt.
pub fn verify_password(password: &str, stored_hash: &str, stored_salt: &str) -> Result<bool> {
    let salt_string = SaltString::from_b64(stored_salt)
        .map_err(|e| AppError::PasswordHash(format!("Stored salt invalid: {}", e)))?;

    let expected = Output::b64_decode(stored_hash)
        .map_err(|e| AppError::PasswordHash(format!("Stored hash invalid: {}", e)))?;

    let actual = derive(password, &salt_string)?;

    // Output's equality is constant-time
    Ok(actual == expected)
}

fn derive(password: &str, salt: &SaltString) -> Result<Output> {
    let hashed = Argon2::default()
        .hash_password(password.as_bytes(), salt)
        .map_err(|e| AppError::PasswordHash(format!("Hashing failed: {}", e)))?;

    hashed
        .hash
        .ok_or_else(|| AppError::PasswordHash("No hash generated".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let (hash, salt) = hash_password("test_password_123").unwrap();

        assert!(verify_password("test_password_123", &hash, &salt).unwrap());
    }

    #[test]
    fn test_wrong_password() {
        let (hash, salt) = hash_password("correct_password").unwrap();

        assert!(!verify_password("wrong_password", &hash, &salt).unwrap());
    }

    #[test]
    fn test_different_salts() {
        let (hash1, salt1) = hash_password("same_password").unwrap();
        let (hash2, salt2) = hash_password("same_password").unwrap();

        // Different salts should produce different hashes
        assert_ne!(salt1, salt2);
        assert_ne!(hash1, hash2);

        // But both should verify
        assert!(verify_password("same_password", &hash1, &salt1).unwrap());
        assert!(verify_password("same_password", &hash2, &salt2).unwrap());
    }

    #[test]
    fn test_mismatched_salt() {
        let (hash, _) = hash_password("password").unwrap();
        let (_, other_salt) = hash_password("password").unwrap();

        // Right password, wrong salt
        assert!(!verify_password("password", &hash, &other_salt).unwrap());
    }

    #[test]
    fn test_special_characters_in_password() {
        let password = "p@ssw0rd!#$%^&*()_+-=[]{}|;':\",./<>?";
        let (hash, salt) = hash_password(password).unwrap();

        assert!(verify_password(password, &hash, &salt).unwrap());
    }

    #[test]
    fn test_unicode_password() {
        let password = "пароль密码🔐";
        let (hash, salt) = hash_password(password).unwrap();

        assert!(verify_password(password, &hash, &salt).unwrap());
        assert!(!verify_password("ascii", &hash, &salt).unwrap());
    }

    #[test]
    fn test_corrupted_stored_hash() {
        let (_, salt) = hash_password("password").unwrap();

        let result = verify_password("password", "not!valid!b64!", &salt);
        assert!(result.is_err());
    }
}
