//! Integration tests for the Java extractor

use testscribe_java::{ExtractorConfig, JavaExtractor, SourceExtractor};
use testscribe_model::{AccessModifier, ClassMeta};

const SAMPLE: &str = include_str!("fixtures/Sample.java");
const PERSON: &str = include_str!("fixtures/Person.java");
const OBJECT_UTIL: &str = include_str!("fixtures/ObjectUtil.java");

fn method_names(class: &ClassMeta) -> Vec<&str> {
    class.methods.iter().map(|m| m.name.as_str()).collect()
}

#[test]
fn test_extract_sample() {
    let class = JavaExtractor::new().extract(SAMPLE).unwrap();

    assert_eq!(class.name, "Sample");
    assert_eq!(class.qualified_name(), "hoge.foo.Sample");
    assert_eq!(class.constructors.len(), 1);
    assert_eq!(method_names(&class), vec!["doSomething"]);

    let method = &class.methods[0];
    assert_eq!(method.arg_names, vec!["str", "longValue"]);
    assert_eq!(method.arg_types[0].name, "String");
    assert_eq!(method.arg_types[1].name, "long");
    assert_eq!(method.return_type.as_ref().unwrap().name, "int");
    assert_eq!(method.throws_exceptions[0].name, "Throwable");
}

#[test]
fn test_extract_person_methods_in_source_order() {
    let class = JavaExtractor::new().extract(PERSON).unwrap();

    assert_eq!(class.name, "Person");
    assert_eq!(class.package_name.as_deref(), Some("com.example.model"));
    assert_eq!(class.imported_list, vec!["java.util.List", "java.util.Map"]);
    assert_eq!(
        method_names(&class),
        vec![
            "getName",
            "setName",
            "getAge",
            "isActive",
            "getNicknames",
            "getTitle",
            "compareTo",
            "greet",
            "greet",
            "scores",
            "of",
        ]
    );
}

#[test]
fn test_person_constructors_are_not_methods() {
    let class = JavaExtractor::new().extract(PERSON).unwrap();

    assert_eq!(class.constructors.len(), 2);
    assert!(class.constructors[0].arg_names.is_empty());
    assert_eq!(class.constructors[1].arg_names, vec!["name", "age"]);
    assert!(class.methods.iter().all(|m| m.name != "Person"));
}

#[test]
fn test_person_accessors() {
    let class = JavaExtractor::new().extract(PERSON).unwrap();
    let accessors: Vec<&str> = class
        .methods
        .iter()
        .filter(|m| m.is_accessor)
        .map(|m| m.name.as_str())
        .collect();

    assert_eq!(
        accessors,
        vec!["getName", "setName", "getAge", "isActive", "getNicknames"]
    );
}

#[test]
fn test_person_overloads_and_modifiers() {
    let class = JavaExtractor::new().extract(PERSON).unwrap();

    let greets: Vec<_> = class.overloads("greet").collect();
    assert_eq!(greets.len(), 2);
    assert_eq!(greets[0].arg_types.len(), 1);
    assert_eq!(greets[1].arg_types.len(), 2);
    assert!(greets.iter().all(|m| m.is_void()));

    let scores = class.overloads("scores").next().unwrap();
    assert_eq!(scores.access_modifier, AccessModifier::Protected);
    assert_eq!(
        scores.return_type.as_ref().unwrap().to_string(),
        "Map<String, List<Integer>>"
    );
    assert_eq!(scores.throws_exceptions[0].name_in_method_name, "IOException");

    let of = class.overloads("of").next().unwrap();
    assert!(of.is_static);
    assert_eq!(of.access_modifier, AccessModifier::Public);
}

#[test]
fn test_implicit_visibility_is_configurable() {
    let config =
        ExtractorConfig::default().with_implicit_visibility(AccessModifier::PackageLocal);
    let class = JavaExtractor::with_config(config).extract(PERSON).unwrap();

    let of = class.overloads("of").next().unwrap();
    assert_eq!(of.access_modifier, AccessModifier::PackageLocal);
}

#[test]
fn test_extract_static_utility() {
    let class = JavaExtractor::new().extract(OBJECT_UTIL).unwrap();

    assert_eq!(class.name, "ObjectUtil");
    assert_eq!(class.constructors.len(), 1);
    assert_eq!(class.constructors[0].access_modifier, AccessModifier::Private);
    assert_eq!(method_names(&class), vec!["isEmpty", "firstNonNull", "join"]);
    assert!(class.methods.iter().all(|m| m.is_static));

    let first_non_null = &class.methods[1];
    assert_eq!(first_non_null.return_type.as_ref().unwrap().name, "Object");

    let join = &class.methods[2];
    assert_eq!(join.arg_types[1].to_string(), "String[]");
    assert_eq!(join.arg_types[1].name_in_method_name, "StringArray");
}

#[test]
fn test_qualified_resolution() {
    let class = JavaExtractor::with_config(ExtractorConfig::qualified())
        .extract(PERSON)
        .unwrap();

    let nicknames = class.overloads("getNicknames").next().unwrap();
    assert_eq!(
        nicknames.return_type.as_ref().unwrap().to_string(),
        "java.util.List<String>"
    );
    let compare_to = class.overloads("compareTo").next().unwrap();
    assert_eq!(compare_to.arg_types[0].name, "com.example.model.Person");
}

#[test]
fn test_names_and_types_stay_parallel() {
    for source in [SAMPLE, PERSON, OBJECT_UTIL] {
        let class = JavaExtractor::new().extract(source).unwrap();
        for method in &class.methods {
            assert_eq!(method.arg_names.len(), method.arg_types.len());
        }
        for constructor in &class.constructors {
            assert_eq!(constructor.arg_names.len(), constructor.arg_types.len());
        }
    }
}

#[test]
fn test_extraction_is_deterministic() {
    let extractor = JavaExtractor::new();
    assert_eq!(
        extractor.extract(PERSON).unwrap(),
        extractor.extract(PERSON).unwrap()
    );
}

#[test]
fn test_batch_extraction() {
    let config = ExtractorConfig::default().with_parallel(true);
    let extractor = JavaExtractor::with_config(config);
    let report = extractor
        .extract_batch(&[SAMPLE, "int broken = 0;", PERSON, OBJECT_UTIL])
        .unwrap();

    let names: Vec<&str> = report.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Sample", "Person", "ObjectUtil"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, 1);
    assert_eq!(report.total(), 4);
}

#[test]
fn test_class_meta_serializes() {
    let class = JavaExtractor::new().extract(SAMPLE).unwrap();
    let json = serde_json::to_string(&class).unwrap();
    let back: ClassMeta = serde_json::from_str(&json).unwrap();
    assert_eq!(back, class);
}
