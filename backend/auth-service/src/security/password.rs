/// Password hashing and verification using Argon2id
use argon2::{
    password_hash::{PasswordHasher as _, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};

use crate::error::{AuthError, AuthResult};

/// Special characters accepted in passwords
const PASSWORD_SPECIALS: &str = "~!@#$%^&*()+|=";

/// One-way hashing seam consumed by the orchestrator.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, raw: &str) -> AuthResult<String>;
    fn verify(&self, raw: &str, hash: &str) -> AuthResult<bool>;
}

pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, raw: &str) -> AuthResult<String> {
        let salt = SaltString::generate(rand::thread_rng());

        let password_hash = Argon2::default()
            .hash_password(raw.as_bytes(), &salt)
            .map_err(|_| AuthError::Internal("failed to hash password".to_string()))?
            .to_string();

        Ok(password_hash)
    }

    fn verify(&self, raw: &str, hash: &str) -> AuthResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AuthError::Internal("invalid password hash format".to_string()))?;

        Ok(Argon2::default()
            .verify_password(raw.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Validate password strength
/// Requirements:
/// - 8 to 16 characters, from letters, digits and `~!@#$%^&*()+|=`
/// - At least one letter
/// - At least one digit
/// - At least one special character
pub fn validate_strength(password: &str) -> AuthResult<()> {
    if password.len() < 8 || password.len() > 16 {
        return Err(AuthError::WeakPassword);
    }

    let mut has_letter = false;
    let mut has_digit = false;
    let mut has_special = false;

    for c in password.chars() {
        if c.is_ascii_alphabetic() {
            has_letter = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        } else if PASSWORD_SPECIALS.contains(c) {
            has_special = true;
        } else {
            return Err(AuthError::WeakPassword);
        }
    }

    if has_letter && has_digit && has_special {
        Ok(())
    } else {
        Err(AuthError::WeakPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "Abcd1234!";
        let hash = Argon2Hasher.hash(password).unwrap();
        assert!(Argon2Hasher.verify(password, &hash).unwrap());
    }

    #[test]
    fn test_wrong_password() {
        let hash = Argon2Hasher.hash("Abcd1234!").unwrap();
        assert!(!Argon2Hasher.verify("Wxyz9876!", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = Argon2Hasher.hash("Abcd1234!").unwrap();
        let second = Argon2Hasher.hash("Abcd1234!").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_strength_accepts_valid_password() {
        assert!(validate_strength("Abcd1234!").is_ok());
        assert!(validate_strength("abcd1234~").is_ok());
    }

    #[test]
    fn test_strength_too_short() {
        assert!(validate_strength("Ab1!").is_err());
    }

    #[test]
    fn test_strength_too_long() {
        assert!(validate_strength("Abcdefgh12345678!").is_err());
    }

    #[test]
    fn test_strength_no_digit() {
        assert!(validate_strength("Abcdefgh!").is_err());
    }

    #[test]
    fn test_strength_no_special() {
        assert!(validate_strength("Abcd1234").is_err());
    }

    #[test]
    fn test_strength_no_letter() {
        assert!(validate_strength("12345678!").is_err());
    }

    #[test]
    fn test_strength_rejects_disallowed_character() {
        assert!(validate_strength("Abcd 1234!").is_err());
    }
}
