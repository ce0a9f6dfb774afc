/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
///
/// Credentials are never stored or compared in plaintext. Verification goes
/// through Argon2's constant-time comparison.

pub mod password;
