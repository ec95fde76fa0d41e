/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
///
/// Passwords only ever leave this module as PHC hash strings. Verification
/// reads the cost parameters back out of the stored hash, so raising the cost
/// in [`password::PasswordConfig`] does not invalidate existing accounts.

pub mod password;
