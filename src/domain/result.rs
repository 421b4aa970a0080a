//! Result type alias for sheetforge

use super::errors::SheetforgeError;

/// Result type alias for sheetforge operations
///
/// # Examples
///
/// ```
/// use sheetforge::domain::result::Result;
/// use sheetforge::domain::errors::SheetforgeError;
///
/// fn failing_function() -> Result<()> {
///     Err(SheetforgeError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, SheetforgeError>;
