//! Shared syntactic rules for entity keys.
//!
//! Every keyed entity (environment, flag, project at the boundary) uses the
//! same key format and length limit. Entity validators call [`validate_key`]
//! and map the returned [`KeyError`] into their own error type, so the error
//! messages stay entity-specific while the rules stay in one place.

/// Maximum length of an entity key.
pub const MAX_KEY_LENGTH: usize = 100;

/// Maximum length of an entity name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Why a key failed the shared syntactic rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    /// Key was missing or empty.
    Missing,
    /// Key exceeded [`MAX_KEY_LENGTH`].
    TooLong,
    /// Key did not match the required format.
    InvalidFormat,
}

/// Check a key against the shared syntactic rules.
///
/// A valid key is 2 to 100 characters, starts and ends with a lowercase
/// alphanumeric character, and contains only lowercase letters, digits,
/// hyphens, and underscores (the equivalent of `^[a-z0-9][a-z0-9_-]*[a-z0-9]$`).
pub fn validate_key(key: Option<&str>) -> Result<(), KeyError> {
    let key = match key {
        Some(k) if !k.is_empty() => k,
        _ => return Err(KeyError::Missing),
    };

    if key.chars().count() > MAX_KEY_LENGTH {
        return Err(KeyError::TooLong);
    }

    if !is_valid_key_format(key) {
        return Err(KeyError::InvalidFormat);
    }

    Ok(())
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'
}

fn is_key_edge_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

/// A single character is rejected: the first and last character must both be
/// alphanumeric and occupy distinct positions.
fn is_valid_key_format(key: &str) -> bool {
    let mut chars = key.chars();
    let (first, last) = match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) => (first, last),
        _ => return false,
    };

    is_key_edge_char(first) && is_key_edge_char(last) && chars.all(is_key_char)
}
