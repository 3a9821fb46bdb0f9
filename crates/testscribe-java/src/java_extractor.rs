//! Implementation of the SourceExtractor trait for Java

use log::debug;
use testscribe_model::{
    BatchReport, ClassMeta, ExtractorConfig, SourceExtractor, TestscribeError, TestscribeResult,
};

use crate::class_extractor::ClassMetaExtractor;

/// Java source extractor implementing the SourceExtractor trait
pub struct JavaExtractor {
    config: ExtractorConfig,
}

impl JavaExtractor {
    pub fn new() -> Self {
        Self {
            config: ExtractorConfig::default(),
        }
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extract sources in parallel using rayon
    fn extract_parallel(&self, sources: &[&str]) -> TestscribeResult<BatchReport> {
        use rayon::prelude::*;

        // Configure thread pool if parallel_workers is specified
        let pool = if let Some(num_threads) = self.config.parallel_workers {
            rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .map_err(|e| {
                    TestscribeError::WorkerPool(format!("Failed to create thread pool: {e}"))
                })?
        } else {
            rayon::ThreadPoolBuilder::new().build().map_err(|e| {
                TestscribeError::WorkerPool(format!("Failed to create thread pool: {e}"))
            })?
        };

        let results: Vec<TestscribeResult<ClassMeta>> =
            pool.install(|| sources.par_iter().map(|source| self.extract(source)).collect());

        let mut report = BatchReport::default();
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(class) => report.classes.push(class),
                Err(e) => report.failures.push((index, e.to_string())),
            }
        }
        Ok(report)
    }
}

impl Default for JavaExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceExtractor for JavaExtractor {
    fn language(&self) -> &str {
        "java"
    }

    fn file_extensions(&self) -> &[&str] {
        &[".java"]
    }

    fn extract(&self, source: &str) -> TestscribeResult<ClassMeta> {
        ClassMetaExtractor::new(&self.config).extract(source)
    }

    fn extract_batch(&self, sources: &[&str]) -> TestscribeResult<BatchReport> {
        debug!(
            "Extracting {} sources ({})",
            sources.len(),
            if self.config.parallel { "parallel" } else { "sequential" }
        );

        if !self.config.parallel {
            let mut report = BatchReport::default();
            for (index, source) in sources.iter().enumerate() {
                match self.extract(source) {
                    Ok(class) => report.classes.push(class),
                    Err(e) => report.failures.push((index, e.to_string())),
                }
            }
            return Ok(report);
        }

        self.extract_parallel(sources)
    }

    fn config(&self) -> &ExtractorConfig {
        &self.config
    }
}
