//! # testscribe-generator
//!
//! Authors and maintains JUnit test sources for a class described by a
//! [`ClassMeta`]: renders new test classes, finds and appends tests that
//! are missing from an existing one, injects imports, and converts test
//! sources between the legacy (`extends TestCase`, `test_` prefix) and the
//! modern (`@Test`) conventions.
//!
//! ## Quick Start
//!
//! ```rust
//! use testscribe_generator::{DefaultTestCaseGenerator, TestCaseGenerator};
//! use testscribe_model::{ExtractorConfig, GeneratorConfig};
//!
//! let generator = DefaultTestCaseGenerator::from_source(
//!     "public class Counter { public int next() { return 0; } }",
//!     ExtractorConfig::default(),
//!     GeneratorConfig::default(),
//! )
//! .unwrap();
//!
//! let source = generator.new_test_source();
//! assert!(source.contains("public class CounterTest {"));
//! assert!(source.contains("public void next() throws Exception {"));
//! assert!(generator.lacking_test_methods(&source).is_empty());
//! ```

mod builder;
mod convert;
mod generator;
mod imports;
mod merge;
mod template;

// Re-export model types for convenience
pub use testscribe_model::{
    ClassMeta, GeneratorConfig, TestCaseMeta, TestConvention, TestMethodMeta, TestscribeError,
    TestscribeResult,
};

pub use builder::TestCaseMetaBuilder;
pub use convert::{detect_convention, ConventionConverter};
pub use generator::{DefaultTestCaseGenerator, TestCaseGenerator};
pub use imports::{
    add_required_imports, append_import_if_absent, contains_import, convention_imports,
    insert_import_block, required_imports,
};
pub use merge::{append_test_methods, lacking_test_methods};
pub use template::TestSourceRenderer;
