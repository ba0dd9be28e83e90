//! Documented shaping behaviour of the transform.

use serde_json::json;

use crate::test_utils::shape;

#[test]
fn audit_fields_never_survive_and_scalars_are_untouched() {
    let out = shape(json!({
        "createdAt": "2024-01-01",
        "updatedAt": "2024-02-01",
        "createdBy": "u1",
        "updatedBy": "u2",
        "title": "Engineer",
        "grade": 7,
        "active": true,
        "ratio": 0.25
    }));
    assert_eq!(
        out,
        json!({"title": "Engineer", "grade": 7, "active": true, "ratio": 0.25})
    );
}

#[test]
fn lone_id_collapses_to_bare_reference() {
    assert_eq!(shape(json!({"a": {"id": "X"}})), json!({"a": {"id": "X"}}));
}

#[test]
fn object_with_id_becomes_update_without_id() {
    assert_eq!(
        shape(json!({"a": {"id": "X", "name": "Y"}})),
        json!({"a": {"update": {"name": "Y"}}})
    );
}

#[test]
fn object_without_id_becomes_create() {
    assert_eq!(
        shape(json!({"a": {"name": "Y"}})),
        json!({"a": {"create": {"name": "Y"}}})
    );
}

#[test]
fn list_items_split_by_id() {
    assert_eq!(
        shape(json!({"items": [{"id": "1", "v": 2}, {"v": 3}]})),
        json!({"items": {
            "update": [{"where": {"id": "1"}, "data": {"v": 2}}],
            "create": [{"v": 3}]
        }})
    );
}

#[test]
fn empty_list_is_omitted() {
    let out = shape(json!({"items": []}));
    assert_eq!(out, json!({}));
    assert!(out.get("items").is_none());
}

#[test]
fn nulls_are_omitted() {
    assert_eq!(shape(json!({"x": null, "z": 5})), json!({"z": 5}));
}

#[test]
fn reshaping_output_does_not_double_wrap() {
    for input in [
        json!({"a": {"name": "Y"}}),
        json!({"a": {"id": "X", "name": "Y"}}),
        json!({"a": {"id": "X"}}),
        json!({"items": [{"id": "1", "v": 2}, {"v": 3}]}),
    ] {
        let once = shape(input);
        assert_eq!(shape(once.clone()), once);
    }
}

#[test]
fn widget_form_submission() {
    let out = shape(json!({
        "name": "Widget",
        "organizationNodeId": null,
        "salaryRule": {"id": "sr1"},
        "tags": [{"id": "t1", "label": "x"}, {"label": "y"}],
        "createdAt": "2024-01-01"
    }));
    assert_eq!(
        out,
        json!({
            "name": "Widget",
            "salaryRule": {"id": "sr1"},
            "tags": {
                "update": [{"where": {"id": "t1"}, "data": {"label": "x"}}],
                "create": [{"label": "y"}]
            }
        })
    );
}

#[test]
fn scalar_lists_pass_through() {
    assert_eq!(
        shape(json!({"tagCodes": ["A", "B"], "weights": [1, 2.5]})),
        json!({"tagCodes": ["A", "B"], "weights": [1, 2.5]})
    );
}

#[test]
fn mixed_lists_pass_through_and_are_reported() {
    let input = json!({"attachments": [{"id": "f1"}, "raw-upload"]});
    let transformer = nestwrite::Transformer::default();
    let (out, report) = transformer.transform_with_report(input.as_object().unwrap());
    assert_eq!(serde_json::Value::Object(out), input);
    assert_eq!(report.mixed_lists(), vec!["attachments"]);
}

#[test]
fn list_item_bodies_are_cleaned_but_not_reshaped() {
    assert_eq!(
        shape(json!({"lines": [
            {"id": "l1", "product": {"id": "p1"}, "note": null, "updatedAt": "t"},
            {"product": {"name": "New"}, "createdBy": "u"}
        ]})),
        json!({"lines": {
            "update": [{"where": {"id": "l1"}, "data": {"product": {"id": "p1"}}}],
            "create": [{"product": {"name": "New"}}]
        }})
    );
}
