use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive type keywords
pub const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

/// Represents a resolved type, possibly generic and possibly an array
///
/// Generic parameters nest recursively: `List<Map<String, Integer>>` is a
/// `List` node holding one `Map` node holding two leaves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeMeta {
    /// Resolved base name, without generic parameters or array brackets
    pub name: String,

    /// Generic parameters in declaration order
    pub generics: Vec<TypeMeta>,

    /// Number of array dimensions (`String[][]` has two)
    pub array_dimensions: usize,

    /// Identifier-safe rendering used in synthesized method names
    pub name_in_method_name: String,
}

impl TypeMeta {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name_in_method_name: identifier_token(&name),
            name,
            generics: Vec::new(),
            array_dimensions: 0,
        }
    }

    pub fn with_generics(mut self, generics: Vec<TypeMeta>) -> Self {
        self.generics = generics;
        self
    }

    pub fn with_array_dimensions(mut self, dimensions: usize) -> Self {
        self.array_dimensions = dimensions;
        self.name_in_method_name = format!(
            "{}{}",
            identifier_token(&self.name),
            "Array".repeat(dimensions)
        );
        self
    }

    /// [`qualified_identifier_token`] of this type, array dimensions included
    pub fn qualified_token(&self) -> String {
        format!(
            "{}{}",
            qualified_identifier_token(&self.name),
            "Array".repeat(self.array_dimensions)
        )
    }

    pub fn is_array(&self) -> bool {
        self.array_dimensions > 0
    }

    /// True for the eight primitive keywords, never for arrays of them
    pub fn is_primitive(&self) -> bool {
        !self.is_array() && PRIMITIVES.contains(&self.name.as_str())
    }

    /// Placeholder literal a generated test assigns to a value of this type
    pub fn default_value(&self) -> &'static str {
        if !self.is_primitive() {
            return "null";
        }
        match self.name.as_str() {
            "boolean" => "false",
            "byte" => "(byte) 0",
            "char" => "'\\u0000'",
            "short" => "(short) 0",
            "long" => "0L",
            "float" => "0.0F",
            "double" => "0.0",
            _ => "0",
        }
    }

    /// Names of the non-generic leaves, left to right
    pub fn leaf_names(&self) -> Vec<&str> {
        if self.generics.is_empty() {
            return vec![self.name.as_str()];
        }
        self.generics.iter().flat_map(|g| g.leaf_names()).collect()
    }
}

impl fmt::Display for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.generics.is_empty() {
            write!(f, "<")?;
            for (i, generic) in self.generics.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{generic}")?;
            }
            write!(f, ">")?;
        }
        for _ in 0..self.array_dimensions {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

/// Represents one entry of a `throws` clause
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExceptionMeta {
    /// Exception type name as written
    pub name: String,

    /// Identifier-safe rendering
    pub name_in_method_name: String,
}

impl ExceptionMeta {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name_in_method_name: identifier_token(&name),
            name,
        }
    }
}

/// Render a type token so it can be embedded in an identifier.
///
/// Generic parameters and package qualification are dropped, array brackets
/// and varargs become `Array`, anything else that is not legal in an
/// identifier collapses to `_`.
pub fn identifier_token(type_name: &str) -> String {
    render_token(type_name, false)
}

/// Like [`identifier_token`], but a written package qualifier is kept with
/// its dots collapsed: `java.sql.Date` becomes `java_sql_Date`
pub fn qualified_identifier_token(type_name: &str) -> String {
    render_token(type_name, true)
}

fn render_token(type_name: &str, keep_package: bool) -> String {
    let mut erased = String::with_capacity(type_name.len());
    let mut depth = 0usize;
    for c in type_name.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => erased.push(c),
            _ => {}
        }
    }

    let erased = erased.trim().replace("...", "[]");
    let base_end = erased.find('[').unwrap_or(erased.len());
    let (base, brackets) = erased.split_at(base_end);
    let base = if keep_package {
        base.trim()
    } else {
        base.rsplit('.').next().unwrap_or(base).trim()
    };

    let mut token: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect();
    for _ in 0..brackets.matches('[').count() {
        token.push_str("Array");
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_token_simple() {
        assert_eq!(identifier_token("String"), "String");
        assert_eq!(identifier_token("long"), "long");
    }

    #[test]
    fn test_identifier_token_drops_generics_and_packages() {
        assert_eq!(identifier_token("java.util.List<String>"), "List");
        assert_eq!(identifier_token("Map<String, List<Integer>>"), "Map");
    }

    #[test]
    fn test_qualified_identifier_token() {
        assert_eq!(qualified_identifier_token("java.sql.Date"), "java_sql_Date");
        assert_eq!(qualified_identifier_token("java.util.List<String>[]"), "java_util_ListArray");
        assert_eq!(qualified_identifier_token("Date"), "Date");
        assert_eq!(
            TypeMeta::new("java.sql.Date").with_array_dimensions(1).qualified_token(),
            "java_sql_DateArray"
        );
    }

    #[test]
    fn test_identifier_token_arrays() {
        assert_eq!(identifier_token("String[]"), "StringArray");
        assert_eq!(identifier_token("int[][]"), "intArrayArray");
        assert_eq!(identifier_token("Object..."), "ObjectArray");
    }

    #[test]
    fn test_identifier_token_collapses_punctuation() {
        assert_eq!(identifier_token("? extends Number"), "__extends_Number");
    }

    #[test]
    fn test_display_nested_generics() {
        let ty = TypeMeta::new("List").with_generics(vec![TypeMeta::new("Map")
            .with_generics(vec![TypeMeta::new("String"), TypeMeta::new("Integer")])]);
        assert_eq!(ty.to_string(), "List<Map<String, Integer>>");
        assert_eq!(ty.leaf_names(), vec!["String", "Integer"]);
    }

    #[test]
    fn test_array_type() {
        let ty = TypeMeta::new("int").with_array_dimensions(2);
        assert!(!ty.is_primitive());
        assert_eq!(ty.to_string(), "int[][]");
        assert_eq!(ty.name_in_method_name, "intArrayArray");
        assert_eq!(ty.default_value(), "null");
    }

    #[test]
    fn test_default_values() {
        assert_eq!(TypeMeta::new("int").default_value(), "0");
        assert_eq!(TypeMeta::new("long").default_value(), "0L");
        assert_eq!(TypeMeta::new("boolean").default_value(), "false");
        assert_eq!(TypeMeta::new("double").default_value(), "0.0");
        assert_eq!(TypeMeta::new("String").default_value(), "null");
    }

    #[test]
    fn test_exception_meta() {
        let ex = ExceptionMeta::new("java.io.IOException");
        assert_eq!(ex.name, "java.io.IOException");
        assert_eq!(ex.name_in_method_name, "IOException");
    }
}
