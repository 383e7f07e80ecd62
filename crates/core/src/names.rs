//! Display-name normalization shared by projects, statuses and tickets.

use crate::error::CoreError;

/// Maximum length (in characters) of any user-supplied name.
pub const MAX_NAME_LEN: usize = 255;

/// Trim a user-supplied name and check it is non-empty and within
/// [`MAX_NAME_LEN`]. Returns the trimmed value.
///
/// `field` is only used to build the error message.
pub fn normalize_name(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
