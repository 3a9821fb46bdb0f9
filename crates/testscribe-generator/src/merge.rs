//! Lacking-test detection and appending

use log::{debug, trace};
use regex::Regex;
use testscribe_java::normalize;
use testscribe_model::{TestCaseMeta, TestMethodMeta, TestscribeError, TestscribeResult};

/// Tests of `meta` with no method of the same name in `existing`, in
/// generation order.
///
/// A test counts as present with or without `legacy_prefix`. Comments and
/// string literals in `existing` are ignored.
pub fn lacking_test_methods<'c>(
    meta: &TestCaseMeta<'c>,
    existing: &str,
    legacy_prefix: &str,
) -> Vec<TestMethodMeta<'c>> {
    let normalized = normalize(existing);
    let lacking: Vec<TestMethodMeta<'c>> = meta
        .tests
        .iter()
        .filter(|test| !has_test_method(&normalized, &test.test_name, legacy_prefix))
        .cloned()
        .collect();
    debug!(
        "{} of {} tests lacking in {}",
        lacking.len(),
        meta.tests.len(),
        meta.test_class_name()
    );
    lacking
}

fn has_test_method(normalized: &str, test_name: &str, legacy_prefix: &str) -> bool {
    let pattern = format!(
        r"\bvoid\s+(?:{})?{}\s*\(",
        regex::escape(legacy_prefix),
        regex::escape(test_name)
    );
    let found = Regex::new(&pattern)
        .map(|re| re.is_match(normalized))
        .unwrap_or(false);
    trace!("Test method {test_name} present: {found}");
    found
}

/// Insert `methods` before the last closing brace of `existing`.
///
/// Everything else is left as is. A line break is added first when the
/// brace does not start a line of its own.
pub fn append_test_methods(existing: &str, methods: &str, nl: &str) -> TestscribeResult<String> {
    let close = existing.rfind('}').ok_or(TestscribeError::MissingClassBody)?;
    let (head, tail) = existing.split_at(close);

    let mut result = String::with_capacity(existing.len() + methods.len() + nl.len());
    result.push_str(head);
    if !head.trim_end_matches([' ', '\t']).ends_with('\n') {
        result.push_str(nl);
    }
    result.push_str(methods);
    result.push_str(tail);
    Ok(result)
}
