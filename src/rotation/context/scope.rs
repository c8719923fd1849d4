//! Logging scopes.

use super::DomainContext;
use crate::rotation::error::{RotationError, RotationResult};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use tracing::Span;

/// Key/value fields attached to a logging scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogContext(BTreeMap<&'static str, String>);

impl LogContext {
    /// Creates an empty log context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.0.insert(key, value.to_string());
        self
    }

    /// Returns the value recorded for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        for (key, value) in &self.0 {
            write!(f, "{separator}{key}={value}")?;
            separator = " ";
        }
        Ok(())
    }
}

/// Guard over a [`DomainContext`] with one logging scope pushed.
///
/// Dereferences to the context; dropping the guard pops the scope on every
/// exit path, including early returns through `?`.
#[derive(Debug)]
pub struct ScopedContext<'a> {
    context: &'a mut DomainContext,
}

impl<'a> ScopedContext<'a> {
    pub(super) const fn new(context: &'a mut DomainContext) -> Self {
        Self { context }
    }

    /// Logs how the operation ended, then leaves the scope.
    ///
    /// # Errors
    ///
    /// Returns `result` unchanged.
    pub fn finish<T>(self, result: RotationResult<T>) -> RotationResult<T> {
        let logger = self.context.logger();
        match &result {
            Ok(_) => tracing::info!(parent: logger, "operation succeeded"),
            Err(err) => log_failure(logger, err),
        }
        result
    }
}

/// Logs a failed operation at `warn` for user errors and `error` otherwise.
pub(super) fn log_failure(logger: &Span, err: &RotationError) {
    if err.is_user_error() {
        tracing::warn!(parent: logger, error = %err, kind = ?err.kind(), "operation rejected");
    } else {
        tracing::error!(parent: logger, error = %err, "operation failed");
    }
}

impl Deref for ScopedContext<'_> {
    type Target = DomainContext;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl DerefMut for ScopedContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl Drop for ScopedContext<'_> {
    fn drop(&mut self) {
        self.context.pop_logging_scope();
    }
}
