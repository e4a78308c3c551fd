// ABOUTME: End-to-end tests from a JSON variable snapshot to a graded report and document
// ABOUTME: Exercises the public API only, the way the host and CLI drive it

use swatchbook_core::{
    DocumentConfig, InMemoryStore, ReportDocument, TokenPairer, VariableStore, WcagGrade,
    build_report, resolve_tokens_for_collection,
};

const SNAPSHOT: &str = r#"{
    "collections": [
        {
            "id": "VariableCollectionId:1:0",
            "name": "Semantic",
            "modes": [{"modeId": "1:0", "name": "Light"}, {"modeId": "1:1", "name": "Dark"}]
        },
        {
            "id": "VariableCollectionId:2:0",
            "name": "Primitives",
            "modes": [{"modeId": "2:0", "name": "Value"}]
        }
    ],
    "variables": [
        {
            "id": "VariableID:2:1",
            "name": "Neutral/0",
            "resolvedType": "COLOR",
            "variableCollectionId": "VariableCollectionId:2:0",
            "valuesByMode": {"2:0": {"r": 1, "g": 1, "b": 1, "a": 1}}
        },
        {
            "id": "VariableID:2:2",
            "name": "Neutral/1000",
            "resolvedType": "COLOR",
            "variableCollectionId": "VariableCollectionId:2:0",
            "valuesByMode": {"2:0": {"r": 0, "g": 0, "b": 0, "a": 1}}
        },
        {
            "id": "VariableID:1:1",
            "name": "Primary/Background",
            "description": "Default surface",
            "resolvedType": "COLOR",
            "variableCollectionId": "VariableCollectionId:1:0",
            "valuesByMode": {
                "1:0": {"type": "VARIABLE_ALIAS", "id": "VariableID:2:1"},
                "1:1": {"type": "VARIABLE_ALIAS", "id": "VariableID:2:2"}
            }
        },
        {
            "id": "VariableID:1:2",
            "name": "Primary/Foreground",
            "description": "",
            "resolvedType": "COLOR",
            "variableCollectionId": "VariableCollectionId:1:0",
            "valuesByMode": {
                "1:0": {"type": "VARIABLE_ALIAS", "id": "VariableID:2:2"},
                "1:1": {"type": "VARIABLE_REFERENCE", "id": "VariableID:2:1"}
            }
        },
        {
            "id": "VariableID:1:3",
            "name": "Spacing/Gap",
            "resolvedType": "FLOAT",
            "variableCollectionId": "VariableCollectionId:1:0",
            "valuesByMode": {"1:0": 8, "1:1": 8}
        },
        {
            "id": "VariableID:1:4",
            "name": "Danger/Background",
            "resolvedType": "COLOR",
            "variableCollectionId": "VariableCollectionId:1:0",
            "valuesByMode": {"1:0": {"type": "VARIABLE_ALIAS", "id": "VariableID:9:9"}}
        }
    ]
}"#;

const SEMANTIC: &str = "VariableCollectionId:1:0";

#[tokio::test]
async fn light_mode_report_pairs_primary_tokens() {
    let store = InMemoryStore::from_json_str(SNAPSHOT).unwrap();
    let tokens = resolve_tokens_for_collection(&store, SEMANTIC, "1:0").await;
    assert_eq!(tokens.len(), 2);

    let report = build_report(&tokens);
    let namespaces: Vec<&str> = report.namespaces().map(|(name, _)| name).collect();
    assert_eq!(namespaces, vec!["primary"]);
    assert_eq!(report.pair_count(), 1);

    let row = report.get("primary", "primary").unwrap();
    assert_eq!(row.pair.background.unwrap().name(), "Primary/Background");
    assert_eq!(row.pair.foreground.unwrap().name(), "Primary/Foreground");

    let grade = row.grade.unwrap();
    assert!((grade.ratio - 21.0).abs() < 1e-6);
    assert_eq!(grade.normal_text, WcagGrade::Aaa);
    assert_eq!(grade.large_text, WcagGrade::Aaa);
}

#[tokio::test]
async fn dark_mode_falls_back_to_primitive_values() {
    let store = InMemoryStore::from_json_str(SNAPSHOT).unwrap();
    let tokens = resolve_tokens_for_collection(&store, SEMANTIC, "1:1").await;

    let hexes: Vec<String> = tokens.iter().map(|t| t.color().to_hex()).collect();
    assert_eq!(hexes, vec!["#000000", "#ffffff"]);

    let report = build_report(&tokens);
    let grade = report.get("primary", "primary").unwrap().grade.unwrap();
    assert!((grade.ratio - 21.0).abs() < 1e-6);
}

#[tokio::test]
async fn unknown_mode_yields_empty_report() {
    let store = InMemoryStore::from_json_str(SNAPSHOT).unwrap();
    let tokens = resolve_tokens_for_collection(&store, SEMANTIC, "9:9").await;
    assert!(tokens.is_empty());
    assert!(build_report(&tokens).is_empty());
}

#[tokio::test]
async fn document_for_snapshot() {
    let store = InMemoryStore::from_json_str(SNAPSHOT).unwrap();
    let collections = store.list_collections().await.unwrap();
    assert_eq!(collections[0].name, "Semantic");

    let tokens = resolve_tokens_for_collection(&store, SEMANTIC, "1:0").await;
    let groups = TokenPairer::group_by_namespace(&tokens);
    let (_, diagnostics) = TokenPairer::group_by_pair_with_diagnostics(&groups);
    assert!(diagnostics.is_empty());

    let report = build_report(&tokens);
    let document = ReportDocument::build(&report, &DocumentConfig::default());
    let row = document.find("primary").unwrap().child("primary").unwrap();
    let description = row.child("Description").unwrap().as_text().unwrap();
    assert_eq!(description.content, "Default surface");
}
