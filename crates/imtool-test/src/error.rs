//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to build a synthetic fixture image
    #[error("failed to build fixture '{name}': {source}")]
    Fixture {
        name: String,
        #[source]
        source: imtool_core::Error,
    },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
