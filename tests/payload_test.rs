use serde_json::{json, Value};
use stripe_client::client::decode;
use stripe_client::resources::{CreateOrder, OrderItem};

fn keys(value: &Value) -> Vec<String> {
    value.as_object().unwrap().keys().cloned().collect()
}

#[test]
fn test_create_params_survive_encode_decode() {
    let params = CreateOrder {
        currency: "usd".to_string(),
        email: Some("jane@example.com".to_string()),
        items: Some(vec![OrderItem::sku("sku_2").quantity(3), OrderItem::sku("sku_1")]),
        metadata: Some(json!({"zeta": "last", "alpha": 1, "nested": {"b": true, "a": null}})),
        ..Default::default()
    };

    let original = serde_json::to_value(&params).unwrap();
    let bytes = serde_json::to_vec(&original).unwrap();
    let decoded = decode(&bytes, 200).unwrap();

    assert_eq!(decoded, original);
    assert_eq!(keys(&decoded), vec!["currency", "email", "items", "metadata"]);
    assert_eq!(keys(&decoded["metadata"]), vec!["zeta", "alpha", "nested"]);
    assert_eq!(keys(&decoded["metadata"]["nested"]), vec!["b", "a"]);
    assert!(decoded["metadata"]["alpha"].is_i64());
    assert!(decoded["metadata"]["nested"]["b"].is_boolean());
    assert!(decoded["metadata"]["nested"]["a"].is_null());
    assert_eq!(decoded["items"][0]["quantity"], 3);
}

#[test]
fn test_any_valid_json_decodes_on_success_statuses() {
    let bodies = [
        "{}",
        "[]",
        "null",
        "42",
        r#""text""#,
        r#"{"object":"list","data":[],"has_more":false}"#,
    ];

    for status in [200u16, 201, 202, 204, 299] {
        for body in bodies {
            assert!(decode(body.as_bytes(), status).is_ok(), "{} {}", status, body);
        }
    }
}
