//! End-to-end tests of the grading library against a JSDoc fixture
//!
//! Drives `Pipeline` through its public API only.

use docgrade::config::ProjectConfig;
use docgrade::models::{EntityReport, IntegrityWarning, Visibility};
use docgrade::{Evaluation, Grade, Pipeline};
use serde_json::json;
use std::path::PathBuf;

fn fixture() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/jsdoc.json");
    std::fs::read_to_string(path).expect("read fixture")
}

fn evaluate_fixture() -> Evaluation {
    Pipeline::default()
        .run_input(&fixture())
        .expect("fixture is valid")
}

fn entity<'a>(eval: &'a Evaluation, full_name: &str) -> &'a EntityReport {
    eval.entities
        .iter()
        .find(|e| e.full_name == full_name)
        .unwrap_or_else(|| panic!("{full_name} not evaluated"))
}

fn role_names(report: &EntityReport) -> Vec<&str> {
    report.roles.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_fixture_entities_and_skips() {
    let eval = evaluate_fixture();

    let names: Vec<&str> = eval.entities.iter().map(|e| e.full_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Calculator",
            "Calculator.add",
            "Calculator._round",
            "Calculator.reset",
            "Calculator.debug",
            "Calculator.PI",
            "Helpers.format",
        ]
    );
    // package doclet and the nameless record
    assert_eq!(eval.skipped, 2);
}

#[test]
fn test_fixture_warnings() {
    let eval = evaluate_fixture();

    assert!(matches!(
        eval.warnings[0],
        IntegrityWarning::SkippedRecord { index: 0, .. }
    ));
    assert_eq!(
        eval.warnings[1],
        IntegrityWarning::DuplicateFullName {
            index: 7,
            full_name: "Calculator.add".into()
        }
    );
    assert!(matches!(
        eval.warnings[2],
        IntegrityWarning::SkippedRecord { index: 8, .. }
    ));
    assert_eq!(
        eval.warnings[3],
        IntegrityWarning::OrphanedEntity {
            full_name: "Helpers.format".into(),
            parent_full_name: "Helpers".into()
        }
    );
    assert_eq!(eval.warnings.len(), 4);
}

#[test]
fn test_fixture_hierarchy() {
    let eval = evaluate_fixture();

    let calc = entity(&eval, "Calculator");
    assert_eq!(calc.parent_full_name, None);
    assert_eq!(calc.depth, 1);
    assert_eq!(
        calc.children_full_names,
        vec![
            "Calculator.add",
            "Calculator._round",
            "Calculator.reset",
            "Calculator.debug",
            "Calculator.PI",
        ]
    );

    let add = entity(&eval, "Calculator.add");
    assert_eq!(add.parent_full_name.as_deref(), Some("Calculator"));
    assert!(add.children_full_names.is_empty());
}

#[test]
fn test_fixture_scores() {
    let eval = evaluate_fixture();

    let expected = [
        ("Calculator", 10, Grade::A),
        ("Calculator.add", 5, Grade::B),
        ("Calculator._round", -7, Grade::U),
        ("Calculator.reset", -8, Grade::U),
        ("Calculator.debug", 0, Grade::U),
        ("Calculator.PI", 4, Grade::B),
        ("Helpers.format", 5, Grade::B),
    ];
    for (name, score, grade) in expected {
        let e = entity(&eval, name);
        assert_eq!((e.score, e.grade), (score, grade), "{name}");
    }

    // nodoc entities (reset, debug) are left out of the project score:
    // (10*1 + 5*2 - 7*2 + 4*2 + 5*2) / 9
    assert!((eval.project.score - 24.0 / 9.0).abs() < 1e-9);
    assert_eq!(eval.project.grade, Grade::C);
    assert_eq!(eval.project.entity_count, 7);
    assert_eq!(eval.project.distribution.a, 1);
    assert_eq!(eval.project.distribution.b, 3);
    assert_eq!(eval.project.distribution.c, 0);
    assert_eq!(eval.project.distribution.u, 3);
}

#[test]
fn test_fixture_entity_details() {
    let eval = evaluate_fixture();

    let add = entity(&eval, "Calculator.add");
    assert!(add.kind.method);
    assert!(add.return_mentioned && add.return_described);
    assert_eq!(add.parameters.len(), 2);
    assert!(add.parameters[0].mentioned && add.parameters[0].described);
    assert!(add.parameters[1].mentioned && !add.parameters[1].described);
    assert_eq!(add.source_locations[0].to_string(), "/proj/src/calc.js:14");

    let calc = entity(&eval, "Calculator");
    assert!(calc.kind.constructor && calc.kind.namespace);
    assert_eq!(calc.code_examples, 1);

    let pi = entity(&eval, "Calculator.PI");
    assert!(pi.kind.constant);
    assert_eq!(pi.visibility, Visibility::Protected);

    let debug = entity(&eval, "Calculator.debug");
    assert!(debug.nodoc);
    assert!(!debug.undocumented);

    let round = entity(&eval, "Calculator._round");
    assert_eq!(round.visibility, Visibility::Private);
    assert_eq!(round.suggestions, vec!["WithoutDoc", "WithoutCodeExample"]);
}

#[test]
fn test_exactly_one_role_per_group() {
    let eval = evaluate_fixture();

    for e in &eval.entities {
        let roles = role_names(e);
        let docs = roles
            .iter()
            .filter(|r| matches!(**r, "WithDoc" | "WithoutDoc"))
            .count();
        let vis = roles
            .iter()
            .filter(|r| matches!(**r, "Public" | "Protected" | "Private"))
            .count();
        assert_eq!(docs, 1, "{}", e.full_name);
        assert_eq!(vis, 1, "{}", e.full_name);
        assert_eq!(roles.contains(&"WithDoc"), !e.undocumented, "{}", e.full_name);

        let expected_vis = match e.visibility {
            Visibility::Public => "Public",
            Visibility::Protected => "Protected",
            Visibility::Private => "Private",
        };
        assert!(roles.contains(&expected_vis), "{}", e.full_name);
    }
}

#[test]
fn test_documented_public_root_scenario() {
    let eval = Pipeline::default().run(&[json!({
        "fullname": "Foo",
        "comment": "Does X.",
        "access": "public"
    })]);

    let foo = &eval.entities[0];
    let roles = role_names(foo);
    assert!(roles.contains(&"WithDoc"));
    assert!(roles.contains(&"Public"));
    assert!(roles.contains(&"InRoot"));
    assert_eq!(foo.score, 4 + 2 + 3 - 1);
}

#[test]
fn test_suppressed_member_scenario() {
    let eval = Pipeline::default().run(&[json!({ "fullname": "Foo.bar", "comment": false })]);

    let bar = &eval.entities[0];
    let roles = role_names(bar);
    assert!(roles.contains(&"WithoutDoc"));
    assert!(roles.contains(&"Public"));
    assert!(!roles.contains(&"InRoot"));
    assert!(bar.nodoc);
}

#[test]
fn test_private_name_scenario() {
    let eval = Pipeline::default().run(&[json!({
        "fullname": "Foo._bar",
        "comment": "doc",
        "access": "public"
    })]);

    let bar = &eval.entities[0];
    assert_eq!(bar.visibility, Visibility::Private);
    let roles = role_names(bar);
    assert!(roles.contains(&"Private"));
    assert!(roles.contains(&"WithDoc"));
    assert!(!roles.contains(&"Public"));
}

#[test]
fn test_config_changes_scores() {
    let config: ProjectConfig = toml::from_str(
        r#"
[roles.priorities]
WithoutCodeExample = 0
InRoot = 0

[aggregation]
include_nodoc = true
"#,
    )
    .expect("valid config");

    let pipeline = Pipeline::default()
        .with_scorer(config.scorer())
        .with_aggregator(Box::new(config.aggregator()));
    let eval = pipeline.run_input(&fixture()).expect("fixture is valid");

    // WithDoc 4 + Public 2 + WithCodeExample 1
    assert_eq!(entity(&eval, "Calculator").score, 7);
    assert_eq!(entity(&eval, "Calculator.add").score, 6);
    // nodoc entities now count: reset -7, debug 1
    // (7*1 + 6*2 - 6*2 - 7*2 + 1*2 + 5*2 + 6*2) / 13
    assert!((eval.project.score - 17.0 / 13.0).abs() < 1e-9);
}

#[test]
fn test_records_wrapped_in_docs_object() {
    let input = format!(r#"{{"docs": {}}}"#, fixture());
    let eval = Pipeline::default().run_input(&input).expect("wrapped input");
    assert_eq!(eval.entities.len(), 7);
}
