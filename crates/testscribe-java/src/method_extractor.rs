//! Method metadata extraction

use crate::access::AccessModifierDetector;
use crate::args::ArgTypeMetaExtractor;
use crate::normalizer::normalize;
use crate::signature::{RawSignature, RegexSignatureMatcher, SignatureMatcher};
use crate::type_name::{TypeContext, TypeNameConverter};
use log::{debug, trace};
use regex::Regex;
use std::sync::LazyLock;
use testscribe_model::{ClassMeta, ExceptionMeta, ExtractorConfig, MethodMeta, TypeMeta};

static RE_STATIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s)static\s").unwrap());
static RE_THROWS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^throws\s+").unwrap());

/// Extracts one [`MethodMeta`] per method signature found in a class
pub struct MethodMetaExtractor<'a> {
    config: &'a ExtractorConfig,
    detector: AccessModifierDetector,
    matcher: Box<dyn SignatureMatcher + 'a>,
}

impl<'a> MethodMetaExtractor<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self {
            config,
            detector: AccessModifierDetector::new(config.implicit_visibility),
            matcher: Box::new(RegexSignatureMatcher::new()),
        }
    }

    /// Replace the signature matcher
    pub fn with_matcher(mut self, matcher: impl SignatureMatcher + 'a) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// Methods of `class` found in `source`, in source order
    ///
    /// `class` supplies the name used to skip constructors and the
    /// package/import context for type resolution.
    pub fn extract(&self, source: &str, class: &ClassMeta) -> Vec<MethodMeta> {
        let normalized = normalize(source);
        let context = TypeContext::of(class);

        let methods: Vec<MethodMeta> = self
            .matcher
            .signatures(&normalized, &class.name)
            .into_iter()
            .map(|signature| self.build(&signature, &context, &normalized))
            .collect();

        debug!("Extracted {} methods from {}", methods.len(), class.name);
        methods
    }

    fn build(&self, signature: &RawSignature, context: &TypeContext<'_>, normalized: &str) -> MethodMeta {
        let converter = TypeNameConverter::new(self.config);
        let prefix = signature.prefix();

        let mut method = MethodMeta::new(signature.name.clone())
            .with_access_modifier(self.detector.detect(prefix));
        method.is_static = RE_STATIC.is_match(prefix);
        method.return_type = converter.parse(&signature.return_type, context);

        let args = ArgTypeMetaExtractor::new(self.config, *context).extract(&signature.args);
        method.arg_names = args.names;
        method.arg_types = args.types;

        if let Some((field_name, field_type)) = implied_field(&method) {
            let is_accessor = is_private_field_exists(field_type, &field_name, normalized);
            trace!(
                "Accessor check for {}: field {field_name} of {field_type} -> {is_accessor}",
                method.name
            );
            method.is_accessor = is_accessor;
        }

        if let Some(clause) = &signature.throws_clause {
            method.throws_exceptions = RE_THROWS
                .replace(clause, "")
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(ExceptionMeta::new)
                .collect();
        }

        method
    }
}

/// Field a getter/setter/is-method would be backed by, with its type
fn implied_field(method: &MethodMeta) -> Option<(String, &TypeMeta)> {
    let name = method.name.as_str();
    if let Some(suffix) = name.strip_prefix("set").filter(|s| !s.is_empty()) {
        return Some((lower_first(suffix), method.arg_types.first()?));
    }
    let suffix = name
        .strip_prefix("get")
        .or_else(|| name.strip_prefix("is"))
        .filter(|s| !s.is_empty())?;
    Some((lower_first(suffix), method.return_type.as_ref()?))
}

fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether `source` declares `private <field_type> <field_name>`.
///
/// Tolerates array brackets, whitespace around generic punctuation, package
/// qualification and a generic suffix on a raw type. This is a textual
/// heuristic: other modifiers between `private` and the type defeat it, and
/// an unrelated field of the same shape satisfies it.
pub(crate) fn is_private_field_exists(field_type: &TypeMeta, field_name: &str, source: &str) -> bool {
    let pattern = format!(
        r"private\s+{}(?:\s*<[\w$.,\s<>?\[\]]*>)?\s+{}\b",
        type_pattern(field_type),
        regex::escape(field_name)
    );
    Regex::new(&pattern)
        .map(|re| re.is_match(source))
        .unwrap_or(false)
}

fn type_pattern(ty: &TypeMeta) -> String {
    let simple = ty.name.rsplit('.').next().unwrap_or(&ty.name);
    let mut pattern = format!(
        r"(?:[\w$]+\.)*{}",
        regex::escape(simple).replace(' ', r"\s+")
    );
    if !ty.generics.is_empty() {
        let generics: Vec<String> = ty.generics.iter().map(type_pattern).collect();
        pattern.push_str(&format!(r"\s*<\s*{}\s*>", generics.join(r"\s*,\s*")));
    }
    for _ in 0..ty.array_dimensions {
        pattern.push_str(r"\s*\[\s*\]");
    }
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use testscribe_model::AccessModifier;

    fn extract(source: &str, class_name: &str) -> Vec<MethodMeta> {
        let config = ExtractorConfig::default();
        let metas = MethodMetaExtractor::new(&config).extract(source, &ClassMeta::new(class_name));
        metas
    }

    #[test]
    fn test_extract_basic_method() {
        let source = "public class Sample { public Sample() {}\r\n public int doSomething(String str, long longValue) throws Throwable { System.out.println(\"aaaa\") } }";
        let methods = extract(source, "Sample");

        assert_eq!(methods.len(), 1);
        let method = &methods[0];
        assert_eq!(method.name, "doSomething");
        assert_eq!(method.access_modifier, AccessModifier::Public);
        assert!(!method.is_static);
        assert_eq!(method.return_type.as_ref().unwrap().name, "int");
        assert_eq!(method.arg_names, vec!["str", "longValue"]);
        assert_eq!(method.arg_types[0].name, "String");
        assert_eq!(method.arg_types[1].name, "long");
        assert_eq!(method.throws_exceptions.len(), 1);
        assert_eq!(method.throws_exceptions[0].name, "Throwable");
        assert!(!method.is_accessor);
    }

    #[test]
    fn test_static_and_visibility() {
        let source = "class Util { private static String trim(String s) { return s; } protected void reset() {} int count() { return 0; } }";
        let methods = extract(source, "Util");

        assert_eq!(methods.len(), 3);
        assert!(methods[0].is_static);
        assert_eq!(methods[0].access_modifier, AccessModifier::Private);
        assert_eq!(methods[1].access_modifier, AccessModifier::Protected);
        assert!(methods[1].return_type.is_none());
        assert_eq!(methods[2].access_modifier, AccessModifier::Public);
    }

    #[test]
    fn test_implicit_visibility_policy() {
        let config = ExtractorConfig::default().with_implicit_visibility(AccessModifier::PackageLocal);
        let methods = MethodMetaExtractor::new(&config)
            .extract("class A { int count() { return 0; } }", &ClassMeta::new("A"));
        assert_eq!(methods[0].access_modifier, AccessModifier::PackageLocal);
    }

    #[test]
    fn test_multiple_exceptions() {
        let source = "class A { void load(String path) throws java.io.IOException, TimeoutException { } }";
        let methods = extract(source, "A");
        let names: Vec<_> = methods[0]
            .throws_exceptions
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["java.io.IOException", "TimeoutException"]);
        assert_eq!(methods[0].throws_exceptions[0].name_in_method_name, "IOException");
    }

    #[test]
    fn test_accessor_detection() {
        let source = "public class Person {\n  private String name;\n  private boolean active;\n  private List<String> tags;\n  public String getName() { return name; }\n  public String getTitle() { return name; }\n  public void setName(String name) { this.name = name; }\n  public boolean isActive() { return active; }\n  public List<String> getTags() { return tags; }\n  public void setup() { }\n}";
        let methods = extract(source, "Person");
        let accessor = |name: &str| methods.iter().find(|m| m.name == name).unwrap().is_accessor;

        assert!(accessor("getName"));
        assert!(!accessor("getTitle"));
        assert!(accessor("setName"));
        assert!(accessor("isActive"));
        assert!(accessor("getTags"));
        assert!(!accessor("setup"));
    }

    #[test]
    fn test_accessor_requires_matching_type() {
        let source = "class Box { private int size; public String getSize() { return null; } }";
        assert!(!extract(source, "Box")[0].is_accessor);
    }

    #[test]
    fn test_private_field_pattern_tolerance() {
        let list = TypeMeta::new("Map").with_generics(vec![TypeMeta::new("String"), TypeMeta::new("Integer")]);
        assert!(is_private_field_exists(&list, "counts", "private Map< String ,Integer > counts;"));
        assert!(is_private_field_exists(&TypeMeta::new("int").with_array_dimensions(1), "values", "private int [] values;"));
        assert!(is_private_field_exists(&TypeMeta::new("java.util.List"), "items", "private List<String> items;"));
        assert!(!is_private_field_exists(&TypeMeta::new("String"), "name", "private final String name;"));
        assert!(!is_private_field_exists(&TypeMeta::new("String"), "name", "private String names;"));
    }

    #[test]
    fn test_generic_return_type_round_trip() {
        let source = "class Repo { public List<Map<String,Integer>> rows() { return null; } }";
        let methods = extract(source, "Repo");
        let ty = methods[0].return_type.as_ref().unwrap();
        assert_eq!(ty.name, "List");
        assert_eq!(ty.generics[0].name, "Map");
        assert_eq!(ty.leaf_names(), vec!["String", "Integer"]);
    }

    #[test]
    fn test_comment_and_string_noise_is_ignored() {
        let source = "class A {\n  // public int fake(String s) {\n  /* void other(); */\n  String s = \"int bogus(long x) {\";\n  public void real() { }\n}";
        let methods = extract(source, "A");
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, "real");
    }

    #[test]
    fn test_spaced_array_parameter_keeps_arity() {
        let methods = extract("class A { public int f(int values [], String s) { return 0; } }", "A");
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].arg_names, vec!["values", "s"]);
        assert_eq!(methods[0].arg_types[0].to_string(), "int[]");
        assert_eq!(methods[0].arg_types[1].name, "String");
    }

    #[test]
    fn test_text_block_content_is_not_code() {
        let source = "class A {\n String q = \"\"\"\n  int ghost(long x) {\n  \"\"\";\n public void real() {}\n public void testJUnit3() {}\n}";
        let names: Vec<String> = extract(source, "A").into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["real", "testJUnit3"]);
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("Name"), "name");
        assert_eq!(lower_first("URL"), "uRL");
        assert_eq!(lower_first(""), "");
    }
}
