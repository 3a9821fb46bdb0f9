//! Type token resolution
//!
//! Turns a type as written (`final List<Map<String, T>>[]`) into a
//! [`TypeMeta`] tree whose every node is resolved against the enclosing
//! package and import list. Resolution is best effort: anything it cannot
//! place passes through literally.

use regex::Regex;
use std::sync::LazyLock;
use testscribe_model::entities::type_meta::PRIMITIVES;
use testscribe_model::{identifier_token, ClassMeta, ExtractorConfig, TypeMeta};

static RE_TYPE_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][0-9]?$").unwrap());
static RE_LEADING_FINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:final\s+)+").unwrap());

/// Well-known names that resolve without an import
const JAVA_LANG: &[&str] = &[
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "Comparable",
    "Double",
    "Enum",
    "Error",
    "Exception",
    "Float",
    "IllegalArgumentException",
    "IllegalStateException",
    "Integer",
    "Iterable",
    "Long",
    "Math",
    "NullPointerException",
    "Number",
    "Object",
    "Runnable",
    "RuntimeException",
    "Short",
    "String",
    "StringBuffer",
    "StringBuilder",
    "System",
    "Thread",
    "Throwable",
    "UnsupportedOperationException",
    "Void",
];

/// Package and import context a type token is resolved in
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeContext<'a> {
    pub package_name: Option<&'a str>,
    pub imports: &'a [String],
}

impl<'a> TypeContext<'a> {
    pub fn of(class: &'a ClassMeta) -> Self {
        Self {
            package_name: class.package_name.as_deref(),
            imports: &class.imported_list,
        }
    }
}

/// Resolves type tokens to compilable names
pub struct TypeNameConverter<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> TypeNameConverter<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    /// Parse a full type expression into a resolved tree.
    ///
    /// Returns `None` for `void` and for empty text.
    pub fn parse(&self, raw: &str, context: &TypeContext<'_>) -> Option<TypeMeta> {
        let text = RE_LEADING_FINAL.replace(raw.trim(), "");
        let text = text.trim();
        if text.is_empty() || text == "void" {
            return None;
        }
        Some(self.parse_node(text, context))
    }

    fn parse_node(&self, text: &str, context: &TypeContext<'_>) -> TypeMeta {
        let (text, dimensions) = split_array_suffix(text);

        let (base, generics) = match (text.find('<'), text.rfind('>')) {
            (Some(open), Some(close)) if open < close => {
                let generics = split_top_level(&text[open + 1..close])
                    .into_iter()
                    .filter(|g| !g.is_empty())
                    .map(|g| self.parse_node(g, context))
                    .collect();
                (&text[..open], generics)
            }
            _ => (text, Vec::new()),
        };

        TypeMeta::new(self.to_compilable_name(base, context))
            .with_generics(generics)
            .with_array_dimensions(dimensions)
    }

    /// Resolve one non-generic type name
    pub fn to_compilable_name(&self, type_name: &str, context: &TypeContext<'_>) -> String {
        let name = type_name.split_whitespace().collect::<Vec<_>>().join(" ");

        if let Some(rest) = name.strip_prefix('?') {
            let rest = rest.trim_start();
            for bound in ["extends ", "super "] {
                if let Some(bounded) = rest.strip_prefix(bound) {
                    return format!("? {bound}{}", self.to_compilable_name(bounded, context));
                }
            }
            return "?".to_string();
        }

        if name == "void" || PRIMITIVES.contains(&name.as_str()) {
            return name;
        }
        if self.config.erase_type_variables && RE_TYPE_VARIABLE.is_match(&name) {
            return "Object".to_string();
        }
        if name.contains('.') {
            return name;
        }

        let imported = context.imports.iter().find(|import| {
            !import.starts_with("static ") && import.rsplit('.').next() == Some(name.as_str())
        });
        if let Some(import) = imported {
            return if self.config.qualify_imported_types {
                import.clone()
            } else {
                name
            };
        }

        if JAVA_LANG.contains(&name.as_str()) {
            return name;
        }

        match context.package_name {
            Some(package) if self.config.qualify_package_types => format!("{package}.{name}"),
            _ => name,
        }
    }

    /// Identifier-safe rendering for synthesized method names
    pub fn to_identifier_token(&self, type_name: &str) -> String {
        identifier_token(type_name)
    }
}

/// Strip trailing `[]` pairs and varargs dots, counting dimensions
fn split_array_suffix(text: &str) -> (&str, usize) {
    let mut rest = text.trim();
    let mut dimensions = 0;
    loop {
        if let Some(stripped) = rest.strip_suffix("...") {
            rest = stripped.trim_end();
            dimensions += 1;
        } else if let Some(stripped) = rest.strip_suffix(']') {
            match stripped.trim_end().strip_suffix('[') {
                Some(inner) => {
                    rest = inner.trim_end();
                    dimensions += 1;
                }
                None => break,
            }
        } else {
            break;
        }
    }
    (rest, dimensions)
}

/// Split on commas outside angle brackets, trimming each piece
pub(crate) fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts
}
