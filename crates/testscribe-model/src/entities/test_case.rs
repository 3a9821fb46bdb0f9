use super::class::ClassMeta;
use super::method::MethodMeta;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Test-authoring convention
///
/// The two are mutually exclusive within one test source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TestConvention {
    /// Test class subclasses the base test type and test methods carry a fixed prefix
    Legacy,
    /// Every test method is annotated; no prefix, no subclassing
    #[default]
    Modern,
}

impl fmt::Display for TestConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestConvention::Legacy => write!(f, "legacy"),
            TestConvention::Modern => write!(f, "modern"),
        }
    }
}

/// What a single test method exercises
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TestMethodKind<'a> {
    /// Asserts the target type exists
    TypeCheck,
    /// Asserts the target can be instantiated
    InstantiationCheck,
    /// Exercises one discovered method
    Method(&'a MethodMeta),
}

/// One test method to be authored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestMethodMeta<'a> {
    /// What the test exercises
    pub kind: TestMethodKind<'a>,

    /// Synthesized test name, without any convention prefix
    pub test_name: String,
}

impl<'a> TestMethodMeta<'a> {
    pub fn type_check() -> Self {
        Self {
            kind: TestMethodKind::TypeCheck,
            test_name: "type".to_string(),
        }
    }

    pub fn instantiation_check() -> Self {
        Self {
            kind: TestMethodKind::InstantiationCheck,
            test_name: "instantiation".to_string(),
        }
    }

    pub fn for_method(method: &'a MethodMeta, test_name: impl Into<String>) -> Self {
        Self {
            kind: TestMethodKind::Method(method),
            test_name: test_name.into(),
        }
    }

    pub fn is_type_check(&self) -> bool {
        matches!(self.kind, TestMethodKind::TypeCheck)
    }

    pub fn is_instantiation_check(&self) -> bool {
        matches!(self.kind, TestMethodKind::InstantiationCheck)
    }

    /// The method under test, if this is a method-derived entry
    pub fn method(&self) -> Option<&'a MethodMeta> {
        match self.kind {
            TestMethodKind::Method(method) => Some(method),
            _ => None,
        }
    }
}

/// Authoring-oriented view over a class: the target plus its tests
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCaseMeta<'a> {
    /// Class under test
    pub target: &'a ClassMeta,

    /// Tests in generation order
    pub tests: Vec<TestMethodMeta<'a>>,
}

impl<'a> TestCaseMeta<'a> {
    /// Name of the test class for the target
    pub fn test_class_name(&self) -> String {
        format!("{}Test", self.target.name)
    }

    pub fn test_names(&self) -> impl Iterator<Item = &str> {
        self.tests.iter().map(|t| t.test_name.as_str())
    }
}
