//! Result type alias for EDI processing
//!
//! This module provides a convenient Result type alias that uses EdiError
//! as the error type.

use super::errors::EdiError;

/// Result type alias for EDI operations
///
/// # Examples
///
/// ```
/// use edi::domain::result::Result;
/// use edi::domain::errors::EdiError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(EdiError::DataValidation("Invalid input message".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, EdiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::EdiError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(EdiError::DataValidation("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
