//! Short code generation and alias validation.
//!
//! Codes are fixed-length strings drawn uniformly from a 62-symbol
//! alphabet. Generation carries no uniqueness guarantee by itself; the
//! store's conditional insert is what enforces uniqueness.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Fixed length of every code and caller-supplied alias.
pub const CODE_LENGTH: usize = 7;

/// Digits, uppercase, then lowercase: 62 symbols.
const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Generates a random short code.
///
/// Draws [`CODE_LENGTH`] symbols uniformly from the alphabet using the
/// thread-local generator.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Validates a caller-supplied alias.
///
/// An alias is held to the same shape as a generated code: exactly
/// [`CODE_LENGTH`] characters, all from the alphabet.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the length or character set is off.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.len() != CODE_LENGTH {
        return Err(AppError::bad_request(
            format!("Alias must be exactly {} characters", CODE_LENGTH),
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !alias.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::bad_request(
            "Alias can only contain digits and ASCII letters",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
