//! User handle validation.
//!
//! Generated handles end up as URL path segments (`/<handle>`), so they are
//! restricted to a conservative character set.
//!
//! # Validation Rules
//!
//! - Length between 3 and 32 characters
//! - Lowercase ASCII letters, digits, and underscores only
//! - Must start with a letter

/// Minimum allowed length for a user handle.
pub const USER_HANDLE_MIN: usize = 3;

/// Maximum allowed length for a user handle.
pub const USER_HANDLE_MAX: usize = 32;

/// Validates a user handle.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_user_handle;
///
/// assert!(is_valid_user_handle("ada_lovelace"));
/// assert!(!is_valid_user_handle("ab"));          // Too short
/// assert!(!is_valid_user_handle("Ada"));         // Uppercase
/// assert!(!is_valid_user_handle("9lives"));      // Leading digit
/// assert!(!is_valid_user_handle("o/brien"));     // Path separator
/// ```
#[must_use]
pub fn is_valid_user_handle(handle: &str) -> bool {
    let length = handle.chars().count();
    if !(USER_HANDLE_MIN..=USER_HANDLE_MAX).contains(&length) {
        return false;
    }
    if !handle.starts_with(|c: char| c.is_ascii_lowercase()) {
        return false;
    }
    handle.chars().all(is_valid_user_handle_char)
}

const fn is_valid_user_handle_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

/// Lowercases a raw name and replaces every disallowed character with an
/// underscore. Length is not enforced.
#[must_use]
pub(crate) fn sanitize_user_handle(name: &str) -> String {
    name.chars()
        .map(|c| c.to_ascii_lowercase())
        .map(|c| if is_valid_user_handle_char(c) { c } else { '_' })
        .collect()
}
