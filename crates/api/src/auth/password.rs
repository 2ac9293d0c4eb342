//! Password hashing with argon2.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use super::AuthError;

/// Hash a password for storage.
///
/// # Errors
///
/// Returns [`AuthError::Internal`] if hashing fails (the cause is logged;
/// it is never a function of the password content).
pub fn hash(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hashed| hashed.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            AuthError::Internal
        })
}

/// Check a candidate password against a stored hash.
///
/// A stored hash that fails to parse counts as a non-match (and is logged);
/// login must not turn corrupt rows into 500s.
#[must_use]
pub fn verify(stored_hash: &str, candidate: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "stored password hash failed to parse");
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hashed = hash("correct horse battery staple").unwrap();
        assert!(verify(&hashed, "correct horse battery staple"));
        assert!(!verify(&hashed, "wrong password"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash("same password").unwrap();
        let b = hash("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_stored_hash_is_non_match() {
        assert!(!verify("not-a-phc-string", "anything"));
    }
}
