use crate::entities::{AccessModifier, TestConvention};
use serde::{Deserialize, Serialize};

/// Configuration for metadata extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Visibility assumed when a signature carries no modifier keyword
    pub implicit_visibility: AccessModifier,

    /// Resolve simple names covered by a single-type import to the imported path
    pub qualify_imported_types: bool,

    /// Resolve otherwise unknown simple names against the enclosing package
    pub qualify_package_types: bool,

    /// Resolve type variables (`T`, `E`, `K2`) to `Object`
    pub erase_type_variables: bool,

    /// Maximum source size to extract (in bytes)
    pub max_source_size: usize,

    /// Enable parallel extraction (for `extract_batch`)
    pub parallel: bool,

    /// Number of parallel workers (None = use num_cpus)
    pub parallel_workers: Option<usize>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            implicit_visibility: AccessModifier::Public,
            qualify_imported_types: false,
            qualify_package_types: false,
            erase_type_variables: true,
            max_source_size: 10 * 1024 * 1024, // 10 MB
            parallel: false,
            parallel_workers: None,
        }
    }
}

impl ExtractorConfig {
    /// Create config that resolves types to fully-qualified names where it can
    pub fn qualified() -> Self {
        Self {
            qualify_imported_types: true,
            qualify_package_types: true,
            ..Default::default()
        }
    }

    pub fn with_implicit_visibility(mut self, visibility: AccessModifier) -> Self {
        self.implicit_visibility = visibility;
        self
    }

    /// Enable parallel extraction
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set maximum source size
    pub fn with_max_source_size(mut self, size: usize) -> Self {
        self.max_source_size = size;
        self
    }
}

/// Configuration for test source generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Convention used for brand-new sources and appended methods
    pub convention: TestConvention,

    /// Line separator for brand-new sources
    ///
    /// Merges and conversions keep the separator of the text they edit.
    pub line_separator: String,

    /// One level of indentation
    pub indent: String,

    /// Prefix legacy test methods carry
    pub legacy_method_prefix: String,

    /// Joins a test name to its argument-type suffix
    pub args_delimiter: String,

    /// Precedes each argument-type token in a test name
    pub type_delimiter: String,

    /// First line of every generated test body
    pub todo_comment: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            convention: TestConvention::Modern,
            line_separator: "\n".to_string(),
            indent: "\t".to_string(),
            legacy_method_prefix: "test_".to_string(),
            args_delimiter: "_A".to_string(),
            type_delimiter: "$".to_string(),
            todo_comment: Some("// TODO auto-generated by testscribe.".to_string()),
        }
    }
}

impl GeneratorConfig {
    /// Create config for the legacy convention
    pub fn legacy() -> Self {
        Self {
            convention: TestConvention::Legacy,
            ..Default::default()
        }
    }

    /// Create config for the modern convention
    pub fn modern() -> Self {
        Self::default()
    }

    pub fn with_convention(mut self, convention: TestConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn with_line_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }

    pub fn without_todo_comment(mut self) -> Self {
        self.todo_comment = None;
        self
    }
}
