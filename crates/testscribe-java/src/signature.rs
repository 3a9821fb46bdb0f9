//! Method signature matching
//!
//! Two stages stand in for a grammar. The area scanner cuts normalized text
//! into statement-sized pieces and keeps every piece shaped roughly like a
//! declaration; it over-matches freely. The strict validator then re-matches
//! each area against a grouped pattern and keeps only real signatures. Both
//! sit behind [`SignatureMatcher`] so a grammar-based matcher can replace
//! them without touching the extractors.

use log::trace;
use regex::Regex;
use std::sync::LazyLock;

/// Statement-sized pieces: text up to and including `;`, `{` or `}`
static RE_SEGMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^;{}]*[;{}]").unwrap());

/// Coarse shape: one parenthesized group, ends at a body or a terminator
static RE_AREA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^;{}()]*\([^()]*\)[^;{}()]*[{;]$").unwrap());

static RE_ACCESS_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(?:public|protected|private)\s+").unwrap());
static RE_FINAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\sfinal\s").unwrap());

/// Strict shape: qualifiers, optional type parameters, return type, name,
/// arguments, optional throws clause
static RE_STRICT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*(?:(?:static|abstract|synchronized|native|strictfp|default|final)\s+)*",
        r"(?:<[^()]*?>\s*)?",
        r"([\w$.]+(?:\s*<[\w$.,\s<>?\[\]&]*>)?(?:\s*\[\s*\])*)",
        r"\s+([\w$]+)\s*\(([^()]*)\)\s*(?:\[\s*\]\s*)*",
        r"(throws\s+[\w$.,\s]+?)?\s*[{;]$",
    ))
    .unwrap()
});

/// Words that can never be a return type or a method name
const RESERVED: &[&str] = &[
    "assert", "break", "case", "catch", "class", "continue", "default", "do", "else", "enum",
    "extends", "finally", "for", "goto", "if", "implements", "import", "instanceof",
    "interface", "new", "package", "return", "super", "switch", "synchronized", "this",
    "throw", "throws", "try", "while",
];

/// One validated signature, split into its grouped parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSignature {
    /// Whole area on a single line, modifiers included
    pub area: String,
    /// Return type text as written (`void` for none)
    pub return_type: String,
    /// Method name
    pub name: String,
    /// Text between the parentheses
    pub args: String,
    /// `throws A, B` clause, if present
    pub throws_clause: Option<String>,
}

impl RawSignature {
    /// Everything before the parameter list
    pub fn prefix(&self) -> &str {
        self.area.split('(').next().unwrap_or(&self.area)
    }
}

/// Finds method signatures in normalized source
pub trait SignatureMatcher: Send + Sync {
    /// Signatures in source order, constructors of `class_name` excluded
    fn signatures(&self, normalized: &str, class_name: &str) -> Vec<RawSignature>;
}

/// Regex-driven two-stage matcher
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexSignatureMatcher;

impl RegexSignatureMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Validate one area; `None` means it is not a method signature
    pub fn validate(&self, area: &str) -> Option<RawSignature> {
        let without_access = RE_ACCESS_PREFIX.replace_all(area, " ");
        let without_access = RE_FINAL.replace_all(&without_access, " ");
        let candidate = format!(" {without_access}");

        let caps = RE_STRICT.captures(&candidate)?;
        let return_type = caps.get(1)?.as_str().trim().to_string();
        let name = caps.get(2)?.as_str().to_string();

        let base_type = return_type.split(['<', '[']).next().unwrap_or("").trim();
        if RESERVED.contains(&base_type) || RESERVED.contains(&name.as_str()) {
            return None;
        }

        Some(RawSignature {
            area: area.to_string(),
            return_type,
            name,
            args: caps.get(3).map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
            throws_clause: caps.get(4).map(|m| m.as_str().trim().to_string()),
        })
    }
}

impl SignatureMatcher for RegexSignatureMatcher {
    fn signatures(&self, normalized: &str, class_name: &str) -> Vec<RawSignature> {
        let constructor = constructor_pattern(class_name);

        signature_areas(normalized)
            .filter(|area| {
                let is_constructor = constructor.as_ref().is_some_and(|re| re.is_match(area));
                if is_constructor {
                    trace!("Skipping constructor-shaped area: {area}");
                }
                !is_constructor
            })
            .filter_map(|area| {
                let signature = self.validate(&area);
                if signature.is_none() {
                    trace!("Rejecting non-signature area: {area}");
                }
                signature
            })
            .collect()
    }
}

/// Areas shaped roughly like declarations, each collapsed onto one line
pub(crate) fn signature_areas(normalized: &str) -> impl Iterator<Item = String> + '_ {
    RE_SEGMENT
        .find_iter(normalized)
        .map(|m| m.as_str().trim())
        .filter(|segment| RE_AREA.is_match(segment))
        .map(|segment| segment.replace('\r', "").replace('\n', " "))
}

fn constructor_pattern(class_name: &str) -> Option<Regex> {
    if class_name.is_empty() {
        return None;
    }
    Regex::new(&format!(r"(?:^|\s){}\s*\(", regex::escape(class_name))).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(source: &str, class_name: &str) -> Vec<String> {
        RegexSignatureMatcher::new()
            .signatures(source, class_name)
            .into_iter()
            .map(|s| s.name)
            .collect()
    }

    #[test]
    fn test_validate_groups() {
        let sig = RegexSignatureMatcher::new()
            .validate("public int doSomething(String str, long longValue) throws Throwable {")
            .unwrap();
        assert_eq!(sig.return_type, "int");
        assert_eq!(sig.name, "doSomething");
        assert_eq!(sig.args, "String str, long longValue");
        assert_eq!(sig.throws_clause.as_deref(), Some("throws Throwable"));
        assert_eq!(sig.prefix(), "public int doSomething");
    }

    #[test]
    fn test_validate_generic_return_and_type_parameters() {
        let matcher = RegexSignatureMatcher::new();
        let sig = matcher
            .validate("protected static final Map<String, List<Integer>> index() {")
            .unwrap();
        assert_eq!(sig.return_type, "Map<String, List<Integer>>");
        assert_eq!(sig.name, "index");

        let sig = matcher.validate("public <T> T pick(List<T> items);").unwrap();
        assert_eq!(sig.return_type, "T");
        assert_eq!(sig.name, "pick");
    }

    #[test]
    fn test_validate_rejects_statements() {
        let matcher = RegexSignatureMatcher::new();
        assert!(matcher.validate("return compute(x);").is_none());
        assert!(matcher.validate("else if (ready) {").is_none());
        assert!(matcher.validate("throw new IllegalStateException(\"\");").is_none());
        assert!(matcher.validate("String s = format(x);").is_none());
        assert!(matcher.validate("System.out.println(s);").is_none());
        assert!(matcher.validate("new Thread(task) {").is_none());
    }

    #[test]
    fn test_signatures_skip_constructors() {
        let source = "public class Sample { public Sample() {}\n public Sample(int x) { this.x = x; } public Sample copy() { return new Sample(x); } }";
        assert_eq!(names(source, "Sample"), vec!["copy"]);
    }

    #[test]
    fn test_signatures_collapse_line_breaks() {
        let source = "class A {\n public void run(String a,\n   int b)\n   throws IOException,\n   TimeoutException {\n }\n}";
        let sigs = RegexSignatureMatcher::new().signatures(source, "A");
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs[0].args, "String a,    int b");
        assert_eq!(
            sigs[0].throws_clause.as_deref(),
            Some("throws IOException,    TimeoutException")
        );
        assert!(!sigs[0].area.contains('\n'));
    }

    #[test]
    fn test_signatures_adjacent_abstract_methods() {
        let source = "interface Shape { double area(); double perimeter(); String name(); }";
        assert_eq!(names(source, "Shape"), vec!["area", "perimeter", "name"]);
    }

    #[test]
    fn test_signatures_ignore_control_flow() {
        let source = "class A { int f(int n) { for (int i = 0; i < n; i++) { if (i > 2) { return g(i); } } while (n > 0) { n--; } return 0; } }";
        assert_eq!(names(source, "A"), vec!["f"]);
    }
}
