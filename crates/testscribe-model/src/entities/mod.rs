pub mod class;
pub mod method;
pub mod test_case;
pub mod type_meta;

pub use class::{ClassMeta, ConstructorMeta};
pub use method::{AccessModifier, MethodMeta};
pub use test_case::{TestCaseMeta, TestConvention, TestMethodKind, TestMethodMeta};
pub use type_meta::{identifier_token, qualified_identifier_token, ExceptionMeta, TypeMeta};
