use super::type_meta::{ExceptionMeta, TypeMeta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visibility of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccessModifier {
    #[default]
    Public,
    Protected,
    PackageLocal,
    Private,
}

impl AccessModifier {
    /// Keyword as written in source; package-local has none
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            AccessModifier::Public => Some("public"),
            AccessModifier::Protected => Some("protected"),
            AccessModifier::PackageLocal => None,
            AccessModifier::Private => Some("private"),
        }
    }
}

impl fmt::Display for AccessModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessModifier::Public => write!(f, "public"),
            AccessModifier::Protected => write!(f, "protected"),
            AccessModifier::PackageLocal => write!(f, "package-local"),
            AccessModifier::Private => write!(f, "private"),
        }
    }
}

/// Represents one method signature discovered in a class
///
/// `arg_names` and `arg_types` are parallel: entry `i` of each describes the
/// same parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodMeta {
    /// Method name
    pub name: String,

    /// Declared (or implied) visibility
    pub access_modifier: AccessModifier,

    /// Is this a static method?
    pub is_static: bool,

    /// Return type; `None` for void
    pub return_type: Option<TypeMeta>,

    /// Parameter names in declaration order
    pub arg_names: Vec<String>,

    /// Parameter types in declaration order
    pub arg_types: Vec<TypeMeta>,

    /// Exceptions named in the throws clause
    pub throws_exceptions: Vec<ExceptionMeta>,

    /// Getter, setter or boolean-is method backed by a private field
    pub is_accessor: bool,
}

impl MethodMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access_modifier: AccessModifier::Public,
            is_static: false,
            return_type: None,
            arg_names: Vec::new(),
            arg_types: Vec::new(),
            throws_exceptions: Vec::new(),
            is_accessor: false,
        }
    }

    pub fn with_access_modifier(mut self, access_modifier: AccessModifier) -> Self {
        self.access_modifier = access_modifier;
        self
    }

    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_return_type(mut self, return_type: TypeMeta) -> Self {
        self.return_type = Some(return_type);
        self
    }

    /// Set both parameter lists at once so they stay parallel
    pub fn with_args(mut self, args: Vec<(String, TypeMeta)>) -> Self {
        let (names, types) = args.into_iter().unzip();
        self.arg_names = names;
        self.arg_types = types;
        self
    }

    pub fn with_throws(mut self, exceptions: Vec<ExceptionMeta>) -> Self {
        self.throws_exceptions = exceptions;
        self
    }

    pub fn accessor(mut self) -> Self {
        self.is_accessor = true;
        self
    }

    pub fn is_void(&self) -> bool {
        self.return_type.is_none()
    }

    /// Iterate parameters as (name, type) pairs
    pub fn args(&self) -> impl Iterator<Item = (&str, &TypeMeta)> {
        self.arg_names
            .iter()
            .map(String::as_str)
            .zip(self.arg_types.iter())
    }
}
