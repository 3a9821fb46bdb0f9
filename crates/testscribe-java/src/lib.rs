//! # testscribe-java
//!
//! Java metadata extractor for testscribe - derives the public surface of a
//! single class from its source text without a grammar or a type checker.
//!
//! ## Pipeline
//!
//! ```text
//! raw text -> normalizer -> class extractor -> method extractor -> ClassMeta
//!                                 |                   |
//!                          access detector    signature matcher
//!                          arg extractor      type name converter
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use testscribe_java::JavaExtractor;
//! use testscribe_model::SourceExtractor;
//!
//! let extractor = JavaExtractor::new();
//! let class = extractor
//!     .extract("public class Sample { public int size(String s) { return 0; } }")
//!     .unwrap();
//! assert_eq!(class.name, "Sample");
//! assert_eq!(class.methods[0].name, "size");
//! ```

mod access;
mod args;
mod class_extractor;
mod java_extractor;
mod method_extractor;
mod normalizer;
mod signature;
mod type_name;

// Re-export model types for convenience
pub use testscribe_model::{
    ClassMeta, ExtractorConfig, MethodMeta, SourceExtractor, TestscribeError, TestscribeResult,
};

pub use access::AccessModifierDetector;
pub use args::{ArgTypeMetaExtractor, ExtractedArgs};
pub use class_extractor::ClassMetaExtractor;
pub use java_extractor::JavaExtractor;
pub use method_extractor::MethodMetaExtractor;
pub use normalizer::normalize;
pub use signature::{RawSignature, RegexSignatureMatcher, SignatureMatcher};
pub use type_name::{TypeContext, TypeNameConverter};
