//! Error types for the language service analysis core.
//!
//! This crate defines the one error enum crossed by every fallible boundary
//! in the workflow: FileStore → Parser → Pruner → Compiler Facade → Check →
//! Completion engine. Per the error handling design, most failure kinds are
//! recovered locally (logged and converted to an empty or partial result) and
//! never reach a caller as `Err`; [`LangSvcError::Io`] is the one kind that
//! does.

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

use std::path::PathBuf;

/// Errors that can cross a public API boundary in this crate family.
///
/// Most variants are recovered at the point they occur and never escape as
/// `Err` — see the module documentation and `docs/error-handling` in the
/// service crate. Only [`LangSvcError::Io`] is expected to reach a caller.
#[derive(Debug, thiserror::Error)]
pub enum LangSvcError {
    /// A filesystem read/write failed. Fatal: the FileStore does not update
    /// its index with partial data when this occurs.
    #[error("io error reading {path}: {source}")]
    Io {
        /// The path that could not be read or written.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// A change event arrived with a version not greater than the stored
    /// version. Never fatal: logged and the event is dropped.
    #[error("stale version for {uri}: got {got}, current {current}")]
    StaleVersion {
        /// The document URI the change targeted.
        uri: String,
        /// The version carried by the rejected change.
        got: i32,
        /// The version already stored for that URI.
        current: i32,
    },

    /// The Compiler Facade raised an internal error for a single operation.
    /// Never fatal: caught at the call site, the query continues with an
    /// empty result for that step.
    #[error("compiler facade error in {operation}: {message}")]
    FacadeError {
        /// Name of the facade operation that failed (for logging).
        operation: &'static str,
        /// Facade-supplied diagnostic message.
        message: String,
    },

    /// The query's cancellation flag was observed set. Not an error in the
    /// usual sense — callers should treat this as a dedicated outcome, not a
    /// failure to report to the user.
    #[error("query cancelled")]
    Cancelled,
}

/// Convenience alias used throughout the workspace.
pub type LangSvcResult<T> = Result<T, LangSvcError>;

impl LangSvcError {
    /// True for error kinds that the error handling design treats as
    /// recoverable-by-construction (never propagated past the boundary where
    /// they are produced).
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, LangSvcError::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_not_recoverable() {
        let err = LangSvcError::Io {
            path: PathBuf::from("/tmp/missing.src"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn stale_version_and_facade_errors_are_recoverable() {
        let stale = LangSvcError::StaleVersion { uri: "file:///a".into(), got: 1, current: 2 };
        assert!(stale.is_recoverable());

        let facade = LangSvcError::FacadeError { operation: "compileFocus", message: "boom".into() };
        assert!(facade.is_recoverable());

        assert!(LangSvcError::Cancelled.is_recoverable());
    }
}
