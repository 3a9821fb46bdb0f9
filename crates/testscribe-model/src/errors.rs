use thiserror::Error;

/// Errors that can occur while extracting metadata or authoring tests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TestscribeError {
    /// No class, interface, enum or record declaration in the source
    #[error("No class declaration found in source")]
    MissingClassDeclaration,

    /// Source larger than the configured limit
    #[error("Source of {0} bytes exceeds maximum size ({1} bytes)")]
    SourceTooLarge(usize, usize),

    /// Test source follows neither the legacy nor the modern convention
    #[error("Test source matches neither the legacy nor the modern convention")]
    UnrecognizedConvention,

    /// Test class already extends a base class other than the legacy one
    #[error("Test class already extends {0}, cannot convert to the legacy convention")]
    IncompatibleBaseClass(String),

    /// Test source has no closing brace to insert before
    #[error("Test source has no class body to append to")]
    MissingClassBody,

    /// Worker pool for batch extraction could not be created
    #[error("Failed to create worker pool: {0}")]
    WorkerPool(String),
}

/// Result type for testscribe operations
pub type TestscribeResult<T> = Result<T, TestscribeError>;
