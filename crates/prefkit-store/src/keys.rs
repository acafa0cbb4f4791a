//! Preference key validation.
//!
//! Valid keys:
//! - Must be non-empty
//! - Must not contain control characters (including `\0`, `\n`, `\t`)
//! - Must be at most [`MAX_KEY_LEN`] bytes

use crate::error::{StoreError, StoreResult};

/// Maximum length of a preference key in bytes.
pub const MAX_KEY_LEN: usize = 1024;

/// Validate a preference key, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use prefkit_store::keys::validate_key;
///
/// assert!(validate_key("theme").is_ok());
/// assert!(validate_key("onboarding.completed").is_ok());
/// assert!(validate_key("").is_err());
/// assert!(validate_key("bad\nkey").is_err());
/// ```
pub fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: "key must not be empty".into(),
        });
    }

    if key.len() > MAX_KEY_LEN {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: format!("key exceeds {MAX_KEY_LEN} bytes"),
        });
    }

    if let Some(ch) = key.chars().find(|c| c.is_control()) {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: format!("contains control character: {ch:?}"),
        });
    }

    Ok(())
}
