//! Integration tests for object model queries.

mod common;

use serde_json::{json, Value};

use common::{create_test_client, THROTTLE};
use rrf_core::error::RrfError;

fn state_value() -> Value {
    json!({"status": "idle", "upTime": 1234})
}

fn volumes_value() -> Value {
    json!([{"mounted": true, "path": "0:/"}])
}

#[tokio::test(start_paused = true)]
async fn aggregate_query_collects_every_key() {
    let (client, controller) = create_test_client();
    controller.script_json("M409", 1, json!({"key": "", "flags": "", "result": ["state", "volumes"]}));
    controller.script_json("M409 K\"state\" F\"v\"", 2, json!({"key": "state", "flags": "v", "result": state_value()}));
    controller.script_json("M409 K\"volumes\" F\"v\"", 0, json!({"key": "volumes", "flags": "v", "result": volumes_value()}));

    let snapshot = client.query_model(None).await.unwrap();

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot["state"], state_value());
    assert_eq!(snapshot["volumes"], volumes_value());
    assert_eq!(
        controller.submitted(),
        vec!["M409", "M409 K\"state\" F\"v\"", "M409 K\"volumes\" F\"v\""]
    );
}

#[tokio::test(start_paused = true)]
async fn aggregate_sub_queries_are_throttled() {
    let (client, controller) = create_test_client();
    controller.script_json("M409", 0, json!({"result": ["state", "volumes"]}));
    controller.script_json("M409 K\"state\" F\"v\"", 0, json!({"result": state_value()}));
    controller.script_json("M409 K\"volumes\" F\"v\"", 0, json!({"result": volumes_value()}));

    client.query_model(None).await.unwrap();

    let sub_queries: Vec<_> = controller
        .requests_to("/rr_gcode")
        .into_iter()
        .filter(|r| r.request.param_value("gcode") != Some("M409"))
        .collect();
    assert_eq!(sub_queries.len(), 2);
    assert!(sub_queries[1].at - sub_queries[0].at >= THROTTLE);
}

#[tokio::test(start_paused = true)]
async fn single_key_query_issues_one_sub_query() {
    let (client, controller) = create_test_client();
    controller.script_json("M409 K\"state\" F\"v\"", 0, json!({"key": "state", "result": state_value()}));

    let snapshot = client.query_model(Some("state")).await.unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot["state"], state_value());
    assert_eq!(controller.submitted(), vec!["M409 K\"state\" F\"v\""]);
}

#[tokio::test(start_paused = true)]
async fn timed_out_key_maps_to_null() {
    let (client, controller) = create_test_client();
    controller.script_json("M409", 0, json!({"result": {"heat": {}, "state": {}}}));
    controller.script_json("M409 K\"state\" F\"v\"", 0, json!({"result": state_value()}));

    let snapshot = client.query_model(None).await.unwrap();

    assert_eq!(snapshot["heat"], Value::Null);
    assert_eq!(snapshot["state"], state_value());
}

#[tokio::test(start_paused = true)]
async fn missing_key_list_is_a_protocol_error() {
    let (client, _controller) = create_test_client();

    let err = client.query_model(None).await.unwrap_err();

    assert!(matches!(err, RrfError::Protocol(_)));
}

#[tokio::test(start_paused = true)]
async fn status_returns_state_subtree() {
    let (client, controller) = create_test_client();
    controller.script_json("M409 K\"state\" F\"v\"", 1, json!({"key": "state", "result": state_value()}));

    let state = client.status().await.unwrap();

    assert_eq!(state["status"], "idle");
}

#[tokio::test]
async fn direct_model_query_uses_rr_model() {
    let (client, controller) = create_test_client();
    controller.set_model("move", json!({"axes": []}));

    let reply = client.model("move", None).await.unwrap();
    let brief = client.model("move", Some("f")).await.unwrap();

    assert_eq!(reply.get("result"), Some(&json!({"axes": []})));
    assert_eq!(brief.get("flags"), Some(&json!("f")));
    let request = &controller.requests_to("/rr_model")[0].request;
    assert_eq!(request.param_value("key"), Some("move"));
    assert_eq!(request.param_value("flags"), Some("v"));
}
