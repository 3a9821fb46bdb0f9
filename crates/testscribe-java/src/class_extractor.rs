//! Class-level metadata extraction

use crate::access::AccessModifierDetector;
use crate::args::ArgTypeMetaExtractor;
use crate::method_extractor::MethodMetaExtractor;
use crate::normalizer::normalize;
use crate::signature::signature_areas;
use crate::type_name::TypeContext;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;
use testscribe_model::{
    ClassMeta, ConstructorMeta, ExtractorConfig, TestscribeError, TestscribeResult,
};

static RE_PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bpackage\s+([\w$.]+)\s*;").unwrap());
static RE_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bimport\s+(static\s+)?([\w$]+(?:\s*\.\s*[\w$]+)*(?:\s*\.\s*\*)?)\s*;").unwrap()
});
static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:class|interface|enum|record)\s+([\w$]+)").unwrap());

/// Extracts class identity, package, imports and constructors, then
/// delegates to [`MethodMetaExtractor`] for the methods
pub struct ClassMetaExtractor<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> ClassMetaExtractor<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    /// Build the full [`ClassMeta`] for `source`.
    ///
    /// The source need not compile; only a class declaration is required.
    pub fn extract(&self, source: &str) -> TestscribeResult<ClassMeta> {
        if source.len() > self.config.max_source_size {
            return Err(TestscribeError::SourceTooLarge(
                source.len(),
                self.config.max_source_size,
            ));
        }

        let normalized = normalize(source);
        let name = RE_CLASS
            .captures(&normalized)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or(TestscribeError::MissingClassDeclaration)?;

        let mut class = ClassMeta::new(name).with_imports(extract_imports(&normalized));
        if let Some(package) = RE_PACKAGE.captures(&normalized).and_then(|caps| caps.get(1)) {
            class = class.with_package(package.as_str());
        }

        let constructors = self.extract_constructors(&normalized, &class);
        class = class.with_constructors(constructors);

        let methods = MethodMetaExtractor::new(self.config).extract(&normalized, &class);
        class = class.with_methods(methods);

        debug!(
            "Extracted class {} ({} constructors, {} methods)",
            class.qualified_name(),
            class.constructors.len(),
            class.methods.len()
        );
        Ok(class)
    }

    fn extract_constructors(&self, normalized: &str, class: &ClassMeta) -> Vec<ConstructorMeta> {
        let Ok(pattern) = Regex::new(&format!(
            r"^((?:(?:public|protected|private)\s+)*){}\s*\(([^()]*)\)\s*(?:throws\s+[\w$.,\s]+?)?\s*\{{$",
            regex::escape(&class.name)
        )) else {
            return Vec::new();
        };

        let detector = AccessModifierDetector::new(self.config.implicit_visibility);
        let args_extractor = ArgTypeMetaExtractor::new(self.config, TypeContext::of(class));

        signature_areas(normalized)
            .filter_map(|area| {
                let caps = pattern.captures(&area)?;
                let modifiers = caps.get(1).map_or("", |m| m.as_str());
                let args = args_extractor.extract(caps.get(2).map_or("", |m| m.as_str()));
                let mut constructor = ConstructorMeta::new(detector.detect(modifiers));
                constructor.arg_names = args.names;
                constructor.arg_types = args.types;
                Some(constructor)
            })
            .collect()
    }
}

fn extract_imports(normalized: &str) -> Vec<String> {
    RE_IMPORT
        .captures_iter(normalized)
        .map(|caps| {
            let path: String = caps[2].split_whitespace().collect();
            match caps.get(1) {
                Some(_) => format!("static {path}"),
                None => path,
            }
        })
        .collect()
}
