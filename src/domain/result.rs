//! Result type alias for Prospect

use super::errors::EtlError;

/// Result type alias for Prospect operations
///
/// This is a convenience type alias that uses `EtlError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use prospect::domain::result::Result;
/// use prospect::domain::errors::EtlError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(EtlError::MalformedInput("not a record".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, EtlError>;
