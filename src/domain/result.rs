//! Result type alias for Lexanon

use super::errors::LexanonError;

/// Result type alias for Lexanon operations
///
/// # Examples
///
/// ```
/// use lexanon::domain::result::Result;
/// use lexanon::domain::errors::LexanonError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(LexanonError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, LexanonError>;
