//! Test case metadata construction

use log::debug;
use std::collections::HashSet;
use testscribe_model::{
    ClassMeta, GeneratorConfig, MethodMeta, TestCaseMeta, TestMethodMeta, TypeMeta,
};

/// Builds the [`TestCaseMeta`] for a class: a type check, an instantiation
/// check, then one test per discovered method in source order
///
/// An overload whose name collides with an earlier one, because its argument
/// types differ only by package, is named with package-qualified tokens.
pub struct TestCaseMetaBuilder<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> TestCaseMetaBuilder<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn build<'c>(&self, target: &'c ClassMeta) -> TestCaseMeta<'c> {
        let mut tests = vec![
            TestMethodMeta::type_check(),
            TestMethodMeta::instantiation_check(),
        ];
        let mut taken = HashSet::new();
        for method in &target.methods {
            let mut name = self.test_method_name(method);
            if taken.contains(&name) {
                let qualified = self.render_name(method, TypeMeta::qualified_token);
                debug!("Test name {name} already taken, using {qualified}");
                name = qualified;
            }
            taken.insert(name.clone());
            tests.push(TestMethodMeta::for_method(method, name));
        }
        TestCaseMeta { target, tests }
    }

    /// `name` for zero-argument methods, otherwise
    /// `name + args_delimiter + (type_delimiter + token)*`
    pub fn test_method_name(&self, method: &MethodMeta) -> String {
        self.render_name(method, |arg_type| arg_type.name_in_method_name.clone())
    }

    fn render_name(&self, method: &MethodMeta, token: impl Fn(&TypeMeta) -> String) -> String {
        if method.arg_types.is_empty() {
            return method.name.clone();
        }
        let mut name = format!("{}{}", method.name, self.config.args_delimiter);
        for arg_type in &method.arg_types {
            name.push_str(&self.config.type_delimiter);
            name.push_str(&token(arg_type));
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClassMeta {
        ClassMeta::new("Sample").with_methods(vec![
            MethodMeta::new("doSomething").with_args(vec![
                ("str".to_string(), TypeMeta::new("String")),
                ("longValue".to_string(), TypeMeta::new("long")),
            ]),
            MethodMeta::new("size"),
        ])
    }

    #[test]
    fn test_fixed_tests_come_first() {
        let config = GeneratorConfig::default();
        let class = sample();
        let meta = TestCaseMetaBuilder::new(&config).build(&class);

        assert_eq!(meta.tests.len(), 4);
        assert!(meta.tests[0].is_type_check());
        assert!(meta.tests[1].is_instantiation_check());
        assert_eq!(meta.tests[2].method().unwrap().name, "doSomething");
        assert_eq!(meta.test_class_name(), "SampleTest");
    }

    #[test]
    fn test_method_names() {
        let config = GeneratorConfig::default();
        let class = sample();
        let meta = TestCaseMetaBuilder::new(&config).build(&class);
        let names: Vec<&str> = meta.test_names().collect();

        assert_eq!(
            names,
            vec!["type", "instantiation", "doSomething_A$String$long", "size"]
        );
    }

    #[test]
    fn test_overloads_get_distinct_names() {
        let config = GeneratorConfig::default();
        let class = ClassMeta::new("Sample").with_methods(vec![
            MethodMeta::new("overload")
                .with_args(vec![("str".to_string(), TypeMeta::new("String"))]),
            MethodMeta::new("overload").with_args(vec![
                ("str".to_string(), TypeMeta::new("String")),
                ("obj".to_string(), TypeMeta::new("Object")),
            ]),
            MethodMeta::new("overload").with_args(vec![(
                "values".to_string(),
                TypeMeta::new("int").with_array_dimensions(1),
            )]),
        ]);
        let meta = TestCaseMetaBuilder::new(&config).build(&class);
        let names: Vec<&str> = meta.test_names().skip(2).collect();

        assert_eq!(
            names,
            vec![
                "overload_A$String",
                "overload_A$String$Object",
                "overload_A$intArray"
            ]
        );
    }

    #[test]
    fn test_package_only_overloads_stay_distinct() {
        let config = GeneratorConfig::default();
        let class = ClassMeta::new("Sample").with_methods(vec![
            MethodMeta::new("f").with_args(vec![("d".to_string(), TypeMeta::new("java.util.Date"))]),
            MethodMeta::new("f").with_args(vec![("d".to_string(), TypeMeta::new("java.sql.Date"))]),
        ]);
        let meta = TestCaseMetaBuilder::new(&config).build(&class);
        let names: Vec<&str> = meta.test_names().skip(2).collect();

        assert_eq!(names, vec!["f_A$Date", "f_A$java_sql_Date"]);
    }

    #[test]
    fn test_custom_delimiters() {
        let config = GeneratorConfig {
            args_delimiter: "_with".to_string(),
            type_delimiter: "_".to_string(),
            ..Default::default()
        };
        let class = sample();
        let name = TestCaseMetaBuilder::new(&config).test_method_name(&class.methods[0]);
        assert_eq!(name, "doSomething_with_String_long");
    }
}
