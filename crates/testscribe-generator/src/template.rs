//! Test source rendering

use crate::imports::convention_imports;
use testscribe_model::{
    ClassMeta, GeneratorConfig, MethodMeta, TestCaseMeta, TestConvention, TestMethodKind,
    TestMethodMeta, TypeMeta,
};

/// Renders test sources and test methods from a [`TestCaseMeta`]
pub struct TestSourceRenderer<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> TestSourceRenderer<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// A brand-new test source in the configured convention
    pub fn render(&self, meta: &TestCaseMeta<'_>, convention: TestConvention) -> String {
        let nl = self.config.line_separator.as_str();
        let target = meta.target;
        let mut out = String::new();

        if let Some(package) = &target.package_name {
            out.push_str(&format!("package {package};{nl}{nl}"));
        }

        let convention_lines = convention_imports(convention);
        for line in convention_lines {
            out.push_str(line);
            out.push_str(nl);
        }
        out.push_str(nl);

        let target_lines: Vec<String> = target
            .imported_list
            .iter()
            .map(|import| format!("import {import};"))
            .filter(|line| !convention_lines.contains(&line.as_str()))
            .collect();
        if !target_lines.is_empty() {
            for line in &target_lines {
                out.push_str(line);
                out.push_str(nl);
            }
            out.push_str(nl);
        }

        let extends = match convention {
            TestConvention::Legacy => " extends TestCase",
            TestConvention::Modern => "",
        };
        out.push_str(&format!(
            "public class {}{extends} {{{nl}{nl}",
            meta.test_class_name()
        ));
        out.push_str(&self.render_methods(&meta.tests, target, convention, nl));
        out.push('}');
        out.push_str(nl);
        out
    }

    /// Test methods, each followed by a blank line
    pub fn render_methods(
        &self,
        tests: &[TestMethodMeta<'_>],
        target: &ClassMeta,
        convention: TestConvention,
        nl: &str,
    ) -> String {
        tests
            .iter()
            .map(|test| format!("{}{nl}", self.render_method(test, target, convention, nl)))
            .collect()
    }

    /// One test method, closing brace and line break included
    pub fn render_method(
        &self,
        test: &TestMethodMeta<'_>,
        target: &ClassMeta,
        convention: TestConvention,
        nl: &str,
    ) -> String {
        let indent = &self.config.indent;
        let mut out = String::new();

        let name = match convention {
            TestConvention::Modern => {
                out.push_str(&format!("{indent}@Test{nl}"));
                test.test_name.clone()
            }
            TestConvention::Legacy => {
                format!("{}{}", self.config.legacy_method_prefix, test.test_name)
            }
        };
        out.push_str(&format!(
            "{indent}public void {name}() throws Exception {{{nl}"
        ));

        let mut body = Vec::new();
        if let Some(todo) = &self.config.todo_comment {
            body.push(todo.clone());
        }
        match test.kind {
            TestMethodKind::TypeCheck => {
                body.push(format!("assertNotNull({}.class);", target.name));
            }
            TestMethodKind::InstantiationCheck => {
                body.push(instantiation_line(target));
                body.push("assertNotNull(target);".to_string());
            }
            TestMethodKind::Method(method) => body.extend(method_body(target, method)),
        }
        for line in body {
            out.push_str(&format!("{indent}{indent}{line}{nl}"));
        }

        out.push_str(&format!("{indent}}}{nl}"));
        out
    }
}

/// `Target target = new Target(<placeholders>);`
fn instantiation_line(target: &ClassMeta) -> String {
    let args = target
        .preferred_constructor()
        .map(|constructor| placeholders(&constructor.arg_types))
        .unwrap_or_default();
    format!("{0} target = new {0}({args});", target.name)
}

fn placeholders(types: &[TypeMeta]) -> String {
    types
        .iter()
        .map(TypeMeta::default_value)
        .collect::<Vec<_>>()
        .join(", ")
}

fn method_body(target: &ClassMeta, method: &MethodMeta) -> Vec<String> {
    let mut lines = Vec::new();
    let receiver = if method.is_static {
        target.name.clone()
    } else {
        lines.push(instantiation_line(target));
        "target".to_string()
    };

    for (name, ty) in method.args() {
        lines.push(format!("{ty} {name} = {};", ty.default_value()));
    }
    let call = format!("{receiver}.{}({})", method.name, method.arg_names.join(", "));

    match &method.return_type {
        None => lines.push(format!("{call};")),
        Some(return_type) => {
            lines.push(format!("{return_type} actual = {call};"));
            lines.push(format!("{return_type} expected = {};", return_type.default_value()));
            let delta = match return_type.name.as_str() {
                "double" | "float" if return_type.is_primitive() => ", 0.0",
                _ => "",
            };
            lines.push(format!("assertEquals(expected, actual{delta});"));
        }
    }
    lines
}
