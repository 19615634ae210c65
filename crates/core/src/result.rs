//! Result type definition and extension traits.

use crate::error::Error;

/// The standard Result type for boundary operations.
///
/// Use the `?` operator, `match`, or combinator methods to handle results.
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait providing side-effect combinators for Results.
pub trait ResultExt<T> {
    /// Inspect the error without consuming the Result.
    #[must_use]
    fn inspect_error<F: FnOnce(&Error)>(self, f: F) -> Self;

    /// Log the error at `warn` level and pass the Result through.
    #[must_use]
    fn warn_on_error(self, context: &str) -> Self;
}

impl<T> ResultExt<T> for Result<T> {
    fn inspect_error<F: FnOnce(&Error)>(self, f: F) -> Self {
        if let Err(ref e) = self {
            f(e);
        }
        self
    }

    fn warn_on_error(self, context: &str) -> Self {
        self.inspect_error(|e| tracing::warn!(error = %e, "{}", context))
    }
}
