/// Password hashing module using Argon2id
///
/// # Security
///
/// - **Algorithm**: Argon2id
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Output**: 32-byte hash, 16-byte random salt
///
/// # Example
///
/// ```
/// use taskdesk_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("x123")?;
///
/// assert!(verify_password("x123", &hash)?);
/// assert!(!verify_password("wrong", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};
use subtle::ConstantTimeEq;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

fn argon2() -> Result<Argon2<'static>, PasswordError> {
    let params = ParamsBuilder::new()
        .m_cost(65536)
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    Ok(Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password into a PHC string
///
/// ```text
/// $argon2id$v=19$m=65536,t=3,p=4$<salt>$<hash>
/// ```
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored PHC hash
///
/// Returns `Ok(false)` on mismatch. Parameters are read from the hash itself.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}

/// Spends the same work as a verification without a stored hash
///
/// Used when the username is unknown, so the response time of a failed
/// login does not reveal whether the account exists.
pub fn simulate_verification(password: &str) {
    let _ = hash_password(password);
}

/// Result of checking a login password against a `users.password` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredMatch {
    /// Matched an Argon2 hash
    Hashed,

    /// Matched a plaintext value written by the legacy service; `rehashed`
    /// should replace it
    Legacy { rehashed: String },

    /// No match
    Mismatch,
}

/// Checks `password` against whatever the `password` column holds
///
/// Values that are not Argon2 PHC strings are legacy plaintext. Those are
/// compared in constant time, and the password is hashed either way so
/// both outcomes cost one Argon2 computation. An empty stored value never
/// matches.
///
/// # Errors
///
/// Returns `PasswordError` if hashing or Argon2 verification fails for a
/// reason other than a wrong password.
pub fn check_stored_password(password: &str, stored: &str) -> Result<StoredMatch, PasswordError> {
    let parsed = PasswordHash::new(stored)
        .ok()
        .filter(|hash| hash.algorithm.as_str().starts_with("argon2"));

    if let Some(parsed) = parsed {
        return match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(StoredMatch::Hashed),
            Err(argon2::password_hash::Error::Password) => Ok(StoredMatch::Mismatch),
            Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
        };
    }

    let rehashed = hash_password(password)?;
    let equal: bool = stored.as_bytes().ct_eq(password.as_bytes()).into();

    if equal && !stored.is_empty() {
        Ok(StoredMatch::Legacy { rehashed })
    } else {
        Ok(StoredMatch::Mismatch)
    }
}
