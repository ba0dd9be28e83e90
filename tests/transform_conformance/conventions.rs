//! Transform behaviour under non-default conventions.

use nestwrite::{OperationKeys, Transformer, WriteConventions};
use serde_json::json;

use crate::test_utils::shape_with;

#[test]
fn custom_audit_fields_replace_defaults() {
    let t = Transformer::new(WriteConventions::default().with_audit_fields(["insertedAt", "rev"]));
    assert_eq!(
        shape_with(&t, json!({"insertedAt": "t", "rev": 3, "createdAt": "kept"})),
        json!({"createdAt": "kept"})
    );
}

#[test]
fn custom_id_key_drives_connect_update_and_split() {
    let t = Transformer::new(WriteConventions::default().with_id_key("code"));
    assert_eq!(
        shape_with(
            &t,
            json!({
                "grade": {"code": "G1"},
                "manager": {"code": "M1", "title": "Lead"},
                "skills": [{"code": "S1", "level": 2}, {"level": 1}]
            })
        ),
        json!({
            "grade": {"code": "G1"},
            "manager": {"update": {"title": "Lead"}},
            "skills": {
                "update": [{"where": {"code": "S1"}, "data": {"level": 2}}],
                "create": [{"level": 1}]
            }
        })
    );
}

#[test]
fn custom_operation_keys() {
    let keys = OperationKeys {
        create: "insert".to_string(),
        update: "patch".to_string(),
        where_key: "filter".to_string(),
        data: "set".to_string(),
        ..OperationKeys::default()
    };
    let t = Transformer::new(WriteConventions::default().with_keys(keys));
    let once = shape_with(
        &t,
        json!({"items": [{"id": "1", "v": 2}, {"v": 3}], "owner": {"name": "n"}}),
    );
    assert_eq!(
        once,
        json!({
            "items": {
                "patch": [{"filter": {"id": "1"}, "set": {"v": 2}}],
                "insert": [{"v": 3}]
            },
            "owner": {"insert": {"name": "n"}}
        })
    );
    assert_eq!(shape_with(&t, once.clone()), once);
}

#[test]
fn conventions_from_toml() {
    let conventions = WriteConventions::from_toml_str(
        r#"
        [conventions]
        audit_fields = ["stamp"]
        id_key = "uuid"
        "#,
    )
    .unwrap();
    let t = Transformer::new(conventions);
    assert_eq!(
        shape_with(&t, json!({"stamp": 1, "dept": {"uuid": "d1"}})),
        json!({"dept": {"uuid": "d1"}})
    );
}

#[test]
fn transformer_is_shareable_across_threads() {
    let t = std::sync::Arc::new(Transformer::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let t = std::sync::Arc::clone(&t);
            std::thread::spawn(move || {
                let input = json!({"n": i, "rel": {"id": format!("r{}", i)}});
                shape_with(&t, input)
            })
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        assert_eq!(
            h.join().unwrap(),
            json!({"n": i, "rel": {"id": format!("r{}", i)}})
        );
    }
}
