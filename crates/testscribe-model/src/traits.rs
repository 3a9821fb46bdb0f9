use crate::{config::ExtractorConfig, entities::ClassMeta, errors::TestscribeResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Outcome of extracting many sources at once
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Classes extracted successfully, in input order
    pub classes: Vec<ClassMeta>,

    /// Sources that failed (input index, error message)
    pub failures: Vec<(usize, String)>,
}

impl BatchReport {
    /// Total number of sources processed (success + failure)
    pub fn total(&self) -> usize {
        self.classes.len() + self.failures.len()
    }

    /// Success rate (0.0 to 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.classes.len() as f64 / self.total() as f64
        }
    }
}

/// Core trait every source extractor implements
///
/// Turns the raw text of one class into a [`ClassMeta`]. Implementations
/// are pure: identical input yields identical output, so callers may cache
/// results by fingerprint.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to support parallel extraction.
pub trait SourceExtractor: Send + Sync {
    /// Returns the language identifier (lowercase, e.g. "java")
    fn language(&self) -> &str;

    /// Returns supported file extensions (e.g. [".java"])
    fn file_extensions(&self) -> &[&str];

    /// Extract the structured description of the class in `source`
    ///
    /// # Errors
    /// Returns `TestscribeError` if the source declares no class or is
    /// larger than the configured limit. Signature-shaped text that turns
    /// out not to be a method is skipped, never reported.
    fn extract(&self, source: &str) -> TestscribeResult<ClassMeta>;

    /// Extract many sources, isolating failures per source
    ///
    /// Default implementation extracts sequentially. Override for
    /// parallel extraction.
    fn extract_batch(&self, sources: &[&str]) -> TestscribeResult<BatchReport> {
        let mut report = BatchReport::default();
        for (index, source) in sources.iter().enumerate() {
            match self.extract(source) {
                Ok(class) => report.classes.push(class),
                Err(e) => report.failures.push((index, e.to_string())),
            }
        }
        Ok(report)
    }

    /// Check if this extractor handles the given file
    ///
    /// Default implementation checks file extension.
    fn can_extract(&self, path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_str = format!(".{}", ext.to_string_lossy());
            self.file_extensions().contains(&ext_str.as_str())
        } else {
            false
        }
    }

    /// Get extractor configuration
    fn config(&self) -> &ExtractorConfig;
}
