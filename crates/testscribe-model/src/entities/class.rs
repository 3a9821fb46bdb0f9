use super::method::{AccessModifier, MethodMeta};
use super::type_meta::TypeMeta;
use serde::{Deserialize, Serialize};

/// Represents one constructor of a class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorMeta {
    /// Declared (or implied) visibility
    pub access_modifier: AccessModifier,

    /// Parameter names in declaration order
    pub arg_names: Vec<String>,

    /// Parameter types in declaration order
    pub arg_types: Vec<TypeMeta>,
}

impl ConstructorMeta {
    pub fn new(access_modifier: AccessModifier) -> Self {
        Self {
            access_modifier,
            arg_names: Vec::new(),
            arg_types: Vec::new(),
        }
    }

    /// Set both parameter lists at once so they stay parallel
    pub fn with_args(mut self, args: Vec<(String, TypeMeta)>) -> Self {
        let (names, types) = args.into_iter().unzip();
        self.arg_names = names;
        self.arg_types = types;
        self
    }

    /// Iterate parameters as (name, type) pairs
    pub fn args(&self) -> impl Iterator<Item = (&str, &TypeMeta)> {
        self.arg_names
            .iter()
            .map(String::as_str)
            .zip(self.arg_types.iter())
    }
}

/// Structured description of a single class
///
/// Built once per source text by an extractor and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassMeta {
    /// Simple class name
    pub name: String,

    /// Enclosing package, if declared
    pub package_name: Option<String>,

    /// Imported names in source order (`java.util.List`, `static org.junit.Assert.*`)
    pub imported_list: Vec<String>,

    /// Constructors in source order
    pub constructors: Vec<ConstructorMeta>,

    /// Methods in source order
    pub methods: Vec<MethodMeta>,
}

impl ClassMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_package(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    pub fn with_imports(mut self, imports: Vec<String>) -> Self {
        self.imported_list = imports;
        self
    }

    pub fn with_constructors(mut self, constructors: Vec<ConstructorMeta>) -> Self {
        self.constructors = constructors;
        self
    }

    pub fn with_methods(mut self, methods: Vec<MethodMeta>) -> Self {
        self.methods = methods;
        self
    }

    /// Package-qualified name, or the simple name in the default package
    pub fn qualified_name(&self) -> String {
        match &self.package_name {
            Some(package) => format!("{package}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Constructor a generated test should call
    ///
    /// Prefers the first non-private constructor; `None` means the class
    /// declares none and has the implicit no-arg one.
    pub fn preferred_constructor(&self) -> Option<&ConstructorMeta> {
        self.constructors
            .iter()
            .find(|c| c.access_modifier != AccessModifier::Private)
            .or_else(|| self.constructors.first())
    }

    /// Overloads of `name`, in source order
    pub fn overloads<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodMeta> + 'a {
        self.methods.iter().filter(move |m| m.name == name)
    }
}
