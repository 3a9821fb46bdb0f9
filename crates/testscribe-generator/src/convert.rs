//! Conversion between the legacy and modern test conventions
//!
//! Only declaration-level text changes: the class header, `@Test` lines,
//! test method names and import lines. Method bodies pass through
//! byte-for-byte.

use crate::imports::{
    append_import_if_absent, contains_import, convention_imports, detect_line_separator,
    insert_import_block, is_referenced, remove_import, required_imports, ASSERT_IMPORT,
    TEST_ANNOTATION_IMPORT, TEST_CASE_IMPORT,
};
use log::{debug, warn};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use testscribe_model::{
    ClassMeta, GeneratorConfig, TestConvention, TestscribeError, TestscribeResult,
};

/// Class header up to the name (and type parameters), then the clauses
/// before the opening brace
static RE_CLASS_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?m)(?:^|[;}])[ \t]*",
        r"((?:(?:public|protected|private|abstract|final|static|strictfp)\s+)*class\s+[\w$]+(?:\s*<[^{]*?>)?)",
        r"([^{]*)\{",
    ))
    .unwrap()
});
static RE_EXTENDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bextends\s+([\w$.]+(?:\s*<[^{]*?>)?)").unwrap());
static RE_EXTENDS_TEST_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\bextends\s+(?:junit\.framework\.)?TestCase\b").unwrap());

static RE_TEST_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)@Test\b(\s*\([^)]*\))?[ \t]*(.*)$").unwrap());
static RE_VOID_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([ \t]*)((?:(?:public|protected|private|static|final|synchronized)\s+)*void\s+)([\w$]+)(\s*\(.*)$",
    )
    .unwrap()
});

/// Convention `source` is written in, if it matches either
///
/// A class extending `TestCase` is legacy even when stray `@Test` marks
/// remain.
pub fn detect_convention(source: &str) -> Option<TestConvention> {
    if let Some(caps) = RE_CLASS_DECL.captures(source) {
        if RE_EXTENDS_TEST_CASE.is_match(&caps[2]) {
            return Some(TestConvention::Legacy);
        }
    }
    let annotated = source
        .lines()
        .any(|line| RE_TEST_ANNOTATION.is_match(line.trim_end()));
    if annotated || contains_import(source, TEST_ANNOTATION_IMPORT) {
        return Some(TestConvention::Modern);
    }
    None
}

/// Rewrites a test source from one convention to the other
///
/// With a target class set, the class's own imports are injected alongside
/// the convention's.
pub struct ConventionConverter<'a> {
    config: &'a GeneratorConfig,
    target: Option<&'a ClassMeta>,
}

impl<'a> ConventionConverter<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            target: None,
        }
    }

    pub fn with_target(mut self, target: &'a ClassMeta) -> Self {
        self.target = Some(target);
        self
    }

    /// Rewrite `source` into `target`.
    ///
    /// A source already in `target` comes back unchanged.
    pub fn convert(&self, source: &str, target: TestConvention) -> TestscribeResult<String> {
        let current = detect_convention(source).ok_or(TestscribeError::UnrecognizedConvention)?;
        if current == target {
            debug!("Test source already follows the {target} convention");
            return Ok(source.to_string());
        }
        debug!("Converting test source from {current} to {target} convention");

        let nl = detect_line_separator(source, &self.config.line_separator);
        match target {
            TestConvention::Modern => self.to_modern(source, nl),
            TestConvention::Legacy => self.to_legacy(source, nl),
        }
    }

    fn to_modern(&self, source: &str, nl: &str) -> TestscribeResult<String> {
        let caps = RE_CLASS_DECL
            .captures(source)
            .ok_or(TestscribeError::UnrecognizedConvention)?;
        let clauses = RE_EXTENDS_TEST_CASE.replace(&caps[2], "");
        let text = replace_group(source, &caps, 2, &clauses);

        let prefix = self.config.legacy_method_prefix.as_str();
        let mut converted = String::with_capacity(text.len() + 64);
        let mut annotated = false;
        for line in text.split_inclusive('\n') {
            let (content, ending) = split_line_ending(line);
            if RE_TEST_ANNOTATION.is_match(content) {
                annotated = true;
                converted.push_str(line);
                continue;
            }
            let renamed = RE_VOID_DECL.captures(content).and_then(|decl| {
                let bare = decl[3].strip_prefix(prefix).filter(|name| !name.is_empty())?;
                let indent = &decl[1];
                let annotation = if annotated {
                    String::new()
                } else {
                    format!("{indent}@Test{nl}")
                };
                Some(format!("{annotation}{indent}{}{bare}{}{ending}", &decl[2], &decl[4]))
            });
            match renamed {
                Some(renamed) => converted.push_str(&renamed),
                None => converted.push_str(line),
            }
            // other annotations may sit between `@Test` and the declaration
            let trimmed = content.trim_start();
            if !trimmed.is_empty() && !trimmed.starts_with('@') {
                annotated = false;
            }
        }

        let mut text = converted;
        if !is_referenced(&text, "TestCase") {
            text = remove_import(&text, TEST_CASE_IMPORT);
        }
        Ok(self.inject(text, TestConvention::Modern, nl))
    }

    fn to_legacy(&self, source: &str, nl: &str) -> TestscribeResult<String> {
        let caps = RE_CLASS_DECL
            .captures(source)
            .ok_or(TestscribeError::UnrecognizedConvention)?;
        if let Some(base) = RE_EXTENDS.captures(&caps[2]) {
            return Err(TestscribeError::IncompatibleBaseClass(base[1].trim().to_string()));
        }
        let header = format!("{} extends TestCase", &caps[1]);
        let text = replace_group(source, &caps, 1, &header);

        let prefix = self.config.legacy_method_prefix.as_str();
        let mut converted = String::with_capacity(text.len() + 64);
        let mut pending = false;
        for line in text.split_inclusive('\n') {
            let (content, ending) = split_line_ending(line);
            let mut content = content.to_string();

            if let Some(annotation) = RE_TEST_ANNOTATION.captures(&content) {
                if let Some(params) = annotation.get(2) {
                    warn!(
                        "Dropping @Test parameters {:?} in legacy conversion",
                        params.as_str().trim()
                    );
                }
                pending = true;
                let rest = annotation[3].to_string();
                if rest.trim().is_empty() {
                    continue;
                }
                content = format!("{}{rest}", &annotation[1]);
            }

            if pending {
                if let Some(decl) = RE_VOID_DECL.captures(&content) {
                    pending = false;
                    if !decl[3].starts_with(prefix) {
                        content = format!("{}{}{prefix}{}{}", &decl[1], &decl[2], &decl[3], &decl[4]);
                    }
                }
            }
            converted.push_str(&content);
            converted.push_str(ending);
        }

        let mut text = remove_import(&converted, ASSERT_IMPORT);
        if !is_referenced(&text, "Test") {
            text = remove_import(&text, TEST_ANNOTATION_IMPORT);
        }
        Ok(self.inject(text, TestConvention::Legacy, nl))
    }

    fn inject(&self, text: String, convention: TestConvention, nl: &str) -> String {
        let block = match self.target {
            Some(target) => required_imports(&text, target, convention, nl),
            None => {
                let mut block = String::new();
                for import in convention_imports(convention) {
                    append_import_if_absent(&mut block, &text, import, nl);
                }
                block
            }
        };
        insert_import_block(&text, &block, nl)
    }
}

/// `source` with capture group `index` of `caps` replaced by `replacement`
fn replace_group(source: &str, caps: &Captures<'_>, index: usize, replacement: &str) -> String {
    match caps.get(index) {
        Some(group) => format!(
            "{}{replacement}{}",
            &source[..group.start()],
            &source[group.end()..]
        ),
        None => source.to_string(),
    }
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}
