//! testscribe Model
//!
//! Shared types for extracting the public surface of a single class and
//! authoring unit tests against it.
//!
//! This crate provides the foundation both halves of testscribe build on:
//!
//! - **Metadata model**: class, constructor, method, type and exception records
//! - **Test case model**: the authoring-oriented view over a class
//! - **SourceExtractor trait**: the interface every source extractor implements
//! - **Configuration**: extraction and generation policies
//! - **Error handling**: one error type for the whole pipeline
//!
//! # Example
//!
//! ```rust,ignore
//! use testscribe_model::{ClassMeta, ExtractorConfig, SourceExtractor, TestscribeResult};
//!
//! struct MyExtractor {
//!     config: ExtractorConfig,
//! }
//!
//! impl SourceExtractor for MyExtractor {
//!     fn language(&self) -> &str {
//!         "mylang"
//!     }
//!
//!     fn file_extensions(&self) -> &[&str] {
//!         &[".my"]
//!     }
//!
//!     fn extract(&self, source: &str) -> TestscribeResult<ClassMeta> {
//!         // Implementation here
//!         todo!()
//!     }
//!
//!     fn config(&self) -> &ExtractorConfig {
//!         &self.config
//!     }
//! }
//! ```

pub mod config;
pub mod entities;
pub mod errors;
pub mod traits;

// Re-export commonly used types
pub use config::{ExtractorConfig, GeneratorConfig};
pub use entities::{
    AccessModifier, ClassMeta, ConstructorMeta, ExceptionMeta, MethodMeta, TestCaseMeta,
    TestConvention, TestMethodKind, TestMethodMeta, TypeMeta,
};
pub use entities::{identifier_token, qualified_identifier_token};
pub use errors::{TestscribeError, TestscribeResult};
pub use traits::{BatchReport, SourceExtractor};
