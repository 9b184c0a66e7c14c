//! Helpers used by generated accessor dispatch.

use super::Reflect;

/// Boxed error type carried by accessor and hydration failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of invoking a zero-argument accessor.
pub type AccessorResult = Result<Box<dyn Reflect>, BoxError>;

/// Wraps the return value of an infallible accessor.
///
/// ```
/// use fieldmerge::reflect::infallible_accessor;
///
/// let result = infallible_accessor(String::from("method value"));
/// assert!(result.is_ok());
/// ```
///
/// # Errors
///
/// Never fails; the `Result` mirrors [`fallible_accessor`].
pub fn infallible_accessor<T: Reflect>(value: T) -> AccessorResult {
    Ok(Box::new(value))
}

/// Wraps the return value of a fallible accessor.
///
/// # Errors
///
/// Returns the accessor's own error, boxed.
pub fn fallible_accessor<T, E>(result: Result<T, E>) -> AccessorResult
where
    T: Reflect,
    E: Into<BoxError>,
{
    match result {
        Ok(value) => Ok(Box::new(value)),
        Err(err) => Err(err.into()),
    }
}
