//! Schema metadata and transform together, as a form submit uses them.

use nestwrite::{ClientConfig, EntitySchema, Method, MutationRequest, Transformer};
use serde_json::{json, Value};

const SALARY_STRUCTURE_RULE: &str = r#"{
    "name": "salaryStructureRule",
    "meta": {
        "endpoint": "api/hr/salaryStructureRules",
        "sections": [
            {"key": "general", "title": "General"},
            {"key": "lines", "title": "Lines"}
        ],
        "allowDelete": true
    },
    "fields": [
        {"name": "name",
         "form": {"label": "Name", "section": "general", "required": true},
         "table": {"header": "Name", "accessor": "name"}},
        {"name": "salaryRule",
         "form": {"widget": "asyncSelect", "label": "Salary rule", "section": "general",
                  "options": {"endpoint": "api/hr/salaryRules"}},
         "table": {"header": "Rule", "accessor": "salaryRule.name"}},
        {"name": "tags",
         "form": {"label": "Tags", "section": "lines"}}
    ]
}"#;

fn schema() -> EntitySchema {
    let schema = EntitySchema::from_json_str(SALARY_STRUCTURE_RULE).unwrap();
    schema.validate().unwrap();
    schema
}

#[test]
fn new_row_posts_transformed_body() {
    let payload = json!({
        "name": "Widget",
        "organizationNodeId": null,
        "salaryRule": {"id": "sr1"},
        "tags": [{"id": "t1", "label": "x"}, {"label": "y"}],
        "createdAt": "2024-01-01"
    });
    let config = ClientConfig::new("https://erp.example.com")
        .unwrap()
        .tenant("acme");
    let req = MutationRequest::for_payload(
        &schema(),
        payload.as_object().unwrap(),
        &config,
        &Transformer::default(),
    )
    .unwrap();

    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, "https://erp.example.com/api/hr/salaryStructureRules");
    assert_eq!(
        req.body,
        Some(json!({
            "name": "Widget",
            "salaryRule": {"id": "sr1"},
            "tags": {
                "update": [{"where": {"id": "t1"}, "data": {"label": "x"}}],
                "create": [{"label": "y"}]
            }
        }))
    );
}

#[test]
fn existing_row_patches_by_id() {
    let payload = json!({"id": "ssr7", "name": "Renamed", "updatedAt": "t"});
    let req = MutationRequest::for_payload(
        &schema(),
        payload.as_object().unwrap(),
        &ClientConfig::default(),
        &Transformer::default(),
    )
    .unwrap();

    assert_eq!(req.method, Method::Patch);
    assert_eq!(req.url, "/api/hr/salaryStructureRules/ssr7");
    assert_eq!(req.body, Some(json!({"name": "Renamed"})));
}

#[test]
fn row_id_stays_one_path_segment() {
    let payload = json!({"id": "2024/07?draft#1", "name": "Slash"});
    let config = ClientConfig::from_toml_str(
        "[client]\napi_base_url = \"https://erp.example.com/erp\"\n",
    )
    .unwrap();
    let req = MutationRequest::for_payload(
        &schema(),
        payload.as_object().unwrap(),
        &config,
        &Transformer::default(),
    )
    .unwrap();
    assert_eq!(
        req.url,
        "https://erp.example.com/erp/api/hr/salaryStructureRules/2024%2F07%3Fdraft%231"
    );
}

#[test]
fn invalid_base_url_is_a_config_error() {
    let err = ClientConfig::from_toml_str("[client]\napi_base_url = \"erp.example.com\"\n")
        .unwrap_err();
    assert!(matches!(err, nestwrite::Error::Config(_)));
}

#[test]
fn table_cells_resolve_nested_accessors() {
    let row = json!({"name": "Base", "salaryRule": {"id": "sr1", "name": "Monthly"}});
    let schema = schema();
    let cells: Vec<Option<&Value>> = schema.row_cells(&row).into_iter().map(|(_, v)| v).collect();
    assert_eq!(cells, vec![Some(&json!("Base")), Some(&json!("Monthly"))]);
}

#[test]
fn form_sections_follow_declared_order() {
    let schema = schema();
    let sections = schema.form_sections();
    let keys: Vec<&str> = sections.iter().map(|s| s.key).collect();
    assert_eq!(keys, vec!["general", "lines"]);
    assert_eq!(sections[0].fields.len(), 2);
}

#[test]
fn required_fields_are_checked_before_submit() {
    let payload = json!({"name": null, "salaryRule": {"id": "sr1"}});
    assert_eq!(schema().missing_required(payload.as_object().unwrap()), vec!["name"]);
}
