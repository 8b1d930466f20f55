//! Result type alias for piiguard

use super::errors::PiiError;

/// Result type alias for piiguard operations
///
/// # Examples
///
/// ```
/// use piiguard::domain::result::Result;
/// use piiguard::domain::errors::PiiError;
///
/// fn failing_function() -> Result<()> {
///     Err(PiiError::UnknownStrategy("scramble".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PiiError>;
