//! The test case generator facade

use crate::builder::TestCaseMetaBuilder;
use crate::convert::{detect_convention, ConventionConverter};
use crate::imports;
use crate::merge;
use crate::template::TestSourceRenderer;
use log::debug;
use testscribe_java::JavaExtractor;
use testscribe_model::{
    ClassMeta, ExtractorConfig, GeneratorConfig, SourceExtractor, TestCaseMeta, TestConvention,
    TestMethodMeta, TestscribeResult,
};

/// Authors and maintains the test source for one target class
///
/// Every operation is a pure function of the target, the configuration and
/// the text passed in.
pub trait TestCaseGenerator {
    /// Tests the target calls for, in generation order
    fn new_test_case_meta(&self) -> TestCaseMeta<'_>;

    /// A brand-new test source in the configured convention
    fn new_test_source(&self) -> String;

    /// Tests with no same-named method in `existing`
    fn lacking_test_methods(&self, existing: &str) -> Vec<TestMethodMeta<'_>>;

    /// `existing` with lacking tests appended and required imports injected
    ///
    /// # Errors
    /// Returns `TestscribeError::MissingClassBody` if tests are lacking but
    /// `existing` has no closing brace to append before.
    fn source_with_lacking_tests(&self, existing: &str) -> TestscribeResult<String>;

    /// `source` with the target's imports and the convention's imports
    /// injected where absent
    fn add_required_imports(&self, source: &str) -> String;

    /// `existing` rewritten into `convention`, with the target's imports
    /// injected where absent
    ///
    /// # Errors
    /// Returns `TestscribeError::UnrecognizedConvention` if `existing`
    /// matches neither convention, or `TestscribeError::IncompatibleBaseClass`
    /// if it extends a class other than `TestCase`.
    fn unified_convention_source(
        &self,
        existing: &str,
        convention: TestConvention,
    ) -> TestscribeResult<String>;
}

/// [`TestCaseGenerator`] over an extracted [`ClassMeta`]
pub struct DefaultTestCaseGenerator {
    config: GeneratorConfig,
    target: ClassMeta,
}

impl DefaultTestCaseGenerator {
    pub fn new(target: ClassMeta, config: GeneratorConfig) -> Self {
        Self { config, target }
    }

    /// Extract the target from Java source first
    pub fn from_source(
        source: &str,
        extractor_config: ExtractorConfig,
        config: GeneratorConfig,
    ) -> TestscribeResult<Self> {
        let target = JavaExtractor::with_config(extractor_config).extract(source)?;
        Ok(Self::new(target, config))
    }

    pub fn target(&self) -> &ClassMeta {
        &self.target
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Push `import_line` onto `buf` unless `source` already has it
    ///
    /// Repeating the call with the same absent line appends it again.
    pub fn append_if_absent(&self, buf: &mut String, source: &str, import_line: &str) {
        let nl = imports::detect_line_separator(source, &self.config.line_separator);
        imports::append_import_if_absent(buf, source, import_line, nl);
    }

    fn render_new(&self, convention: TestConvention) -> String {
        let meta = self.new_test_case_meta();
        TestSourceRenderer::new(&self.config).render(&meta, convention)
    }
}

impl TestCaseGenerator for DefaultTestCaseGenerator {
    fn new_test_case_meta(&self) -> TestCaseMeta<'_> {
        TestCaseMetaBuilder::new(&self.config).build(&self.target)
    }

    fn new_test_source(&self) -> String {
        self.render_new(self.config.convention)
    }

    fn lacking_test_methods(&self, existing: &str) -> Vec<TestMethodMeta<'_>> {
        let meta = self.new_test_case_meta();
        merge::lacking_test_methods(&meta, existing, &self.config.legacy_method_prefix)
    }

    fn source_with_lacking_tests(&self, existing: &str) -> TestscribeResult<String> {
        if existing.trim().is_empty() {
            debug!("No existing test source for {}, rendering a new one", self.target.name);
            return Ok(self.new_test_source());
        }

        let convention = detect_convention(existing).unwrap_or(self.config.convention);
        let nl = imports::detect_line_separator(existing, &self.config.line_separator);
        let lacking = self.lacking_test_methods(existing);

        let merged = if lacking.is_empty() {
            existing.to_string()
        } else {
            let methods = TestSourceRenderer::new(&self.config).render_methods(
                &lacking,
                &self.target,
                convention,
                nl,
            );
            merge::append_test_methods(existing, &methods, nl)?
        };
        Ok(imports::add_required_imports(&merged, &self.target, convention))
    }

    fn add_required_imports(&self, source: &str) -> String {
        imports::add_required_imports(source, &self.target, self.config.convention)
    }

    fn unified_convention_source(
        &self,
        existing: &str,
        convention: TestConvention,
    ) -> TestscribeResult<String> {
        if existing.trim().is_empty() {
            return Ok(self.render_new(convention));
        }
        ConventionConverter::new(&self.config)
            .with_target(&self.target)
            .convert(existing, convention)
    }
}
