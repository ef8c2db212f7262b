use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use serde_json::json;
use sheetcheck::path::has_field;
use sheetcheck::{
    validate, Classification, GraphConfig, Record, Schema, SchemaError, SchemaGraph,
};

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn base_and_warrior() -> SchemaGraph {
    SchemaGraph::from_embedded(&[
        ("Base", r#"{"Mandatory":["name"]}"#),
        ("Warrior", r#"{"Extends":["Base"],"Mandatory":["strength"]}"#),
    ])
    .expect("schemas should build")
}

#[test]
fn warrior_without_strength_fails() {
    let graph = base_and_warrior();
    let report = validate(&json!({ "name": "Rin" }), &graph).unwrap();

    assert!(!report.success);
    assert_eq!(
        report.outcome("Base").unwrap().classification,
        Classification::Valid
    );
    assert_eq!(
        report.outcome("Warrior").unwrap().classification,
        Classification::Unacceptable
    );
    assert_eq!(report.outcome("Warrior").unwrap().missing, set(&["strength"]));
}

#[test]
fn record_of_unrelated_kind_passes_with_nothing_certified() {
    let graph = base_and_warrior();
    let report = validate(&json!({}), &graph).unwrap();

    assert!(report.success);
    assert!(report.certified_fields.is_empty());
    assert!(report.extraneous_fields.is_empty());
    assert_eq!(
        report.outcome("Base").unwrap().classification,
        Classification::Invalid
    );
    assert!(report.outcome("Warrior").is_none());
    assert_eq!(report.dropped, set(&["Base", "Warrior"]));
}

#[test]
fn extraneous_fields_are_reported() {
    let graph = SchemaGraph::build([Schema::new("Base").with_mandatory(["name"])]).unwrap();
    let report = graph.validate(&json!({ "name": "Rin", "pet": "cat" })).unwrap();

    assert!(report.success);
    assert_eq!(report.certified_fields, set(&["name"]));
    assert_eq!(report.extraneous_fields, set(&["pet"]));
}

#[test]
fn complete_warrior_passes() {
    let graph = base_and_warrior();
    let report = graph
        .validate(&json!({ "name": "Rin", "strength": 15 }))
        .unwrap();

    assert!(report.success);
    assert_eq!(report.certified_fields, set(&["name", "strength"]));
    assert!(report.extraneous_fields.is_empty());
}

#[test]
fn wildcard_paths_drive_classification() {
    let graph = SchemaGraph::from_value(&json!({
        "Base": { "Mandatory": ["Name"] },
        "Adventurer": {
            "Extends": ["Base"],
            "Mandatory": ["inventory.item"],
            "Optional": ["inventory[0].weight", "skills.rank"],
            "AnyOf": ["gold", "silver"]
        },
        "Monster": { "Mandatory": ["challenge"] }
    }))
    .unwrap();

    let record = json!({
        "Name": "Rin",
        "inventory": [
            { "item": "rope", "weight": 2 },
            { "item": "lamp" }
        ],
        "skills": { "stealth": { "rank": 2 } },
        "silver": 30,
        "mood": "cheerful"
    });

    let report = validate(&record, &graph).unwrap();
    assert!(report.success);
    assert_eq!(
        report.certified_fields,
        set(&[
            "Name",
            "inventory.item",
            "inventory[0].weight",
            "skills.rank",
            "silver"
        ])
    );
    assert_eq!(report.dropped, set(&["Monster"]));
    assert!(report.extraneous_fields.contains("mood"));
    assert!(report.extraneous_fields.contains("inventory"));
    assert!(!report.extraneous_fields.contains("Name"));

    let missing_item = json!({
        "Name": "Rin",
        "inventory": [{ "item": "rope" }, { "weight": 1 }],
        "gold": 1
    });
    let report = validate(&missing_item, &graph).unwrap();
    assert!(!report.success);
    assert_eq!(
        report.outcome("Adventurer").unwrap().missing,
        set(&["inventory.item"])
    );
}

#[test]
fn diamond_inheritance_drops_shared_descendant_once() {
    let graph = SchemaGraph::build([
        Schema::new("Caster").with_mandatory(["mana"]),
        Schema::new("Fighter").with_mandatory(["stamina"]),
        Schema::new("Spellblade")
            .with_extends(["Caster", "Fighter"])
            .with_mandatory(["runes"]),
    ])
    .unwrap();

    let report = validate(&json!({ "stamina": 10 }), &graph).unwrap();
    assert!(report.success);
    assert_eq!(report.dropped, set(&["Caster", "Spellblade"]));
    assert_eq!(report.certified_fields, set(&["stamina"]));
    assert_eq!(report.outcomes.len(), 2);
}

#[test]
fn cyclic_schemas_refuse_to_build() {
    let err = SchemaGraph::from_embedded(&[
        ("A", r#"{"Extends":["B"]}"#),
        ("B", r#"{"Extends":["A"]}"#),
    ])
    .unwrap_err();
    assert!(matches!(err, SchemaError::CycleDetected(_)));
}

#[test]
fn malformed_schema_path_aborts_validation() {
    let graph = SchemaGraph::build([Schema::new("Base").with_mandatory(["name]"])]).unwrap();
    let err = validate(&json!({ "name": "Rin" }), &graph).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidPath { .. }));
}

#[test]
fn first_segment_absent_means_field_absent() {
    let record = json!({ "items": [{ "x": 1 }, { "x": 2 }] });
    assert!(has_field(&record, "items.x").unwrap());
    assert!(!has_field(&record, "items.y").unwrap());
    assert!(!has_field(&record, "other.x").unwrap());
}

#[test]
fn report_serializes_to_json() {
    let graph = base_and_warrior();
    let report = validate(&json!({ "name": "Rin" }), &graph).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["success"], json!(false));
    assert_eq!(value["certified_fields"], json!(["name"]));
    assert_eq!(value["outcomes"][1]["classification"], json!("unacceptable"));
}

#[test]
fn shared_graph_validates_in_parallel() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SchemaGraph>();

    let graph = Arc::new(base_and_warrior());
    let records: Vec<(Record, bool)> = vec![
        (json!({ "name": "Rin", "strength": 3 }), true),
        (json!({ "name": "Rin" }), false),
        (json!({}), true),
        (json!({ "strength": 3 }), true),
    ];

    let handles: Vec<_> = records
        .into_iter()
        .map(|(record, expected)| {
            let graph = Arc::clone(&graph);
            thread::spawn(move || {
                let report = validate(&record, &graph).unwrap();
                assert_eq!(report.success, expected, "record {record}");
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn tolerant_config_ignores_unknown_parents() {
    let config = GraphConfig {
        fail_on_unknown_parent: false,
        ..GraphConfig::default()
    };
    let graph = SchemaGraph::build_with_config(
        [Schema::new("Orphan")
            .with_extends(["Missing"])
            .with_mandatory(["lineage"])],
        config,
    )
    .unwrap();

    let report = validate(&json!({}), &graph).unwrap();
    assert!(!report.success);
    assert_eq!(
        report.outcome("Orphan").unwrap().classification,
        Classification::Unacceptable
    );
}
