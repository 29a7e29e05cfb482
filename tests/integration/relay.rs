use serde_json::json;
use wiremock::matchers::{body_json, body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use txms_core::{DispatchPolicy, TxmsCodec};

use crate::*;

/// Hex body → blockbook → confirmed with the node's hash.
#[tokio::test]
async fn test_hex_message_is_confirmed() {
    let node = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/sendtx/"))
        .and(body_string(TX))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "0xabc" })))
        .expect(1)
        .mount(&node)
        .await;

    let relay = spawn_relay(blockbook_config(&node.uri())).await.unwrap();
    let upper = TX.to_uppercase().replacen("0X", "", 1);
    let (status, resp) = post_webhook(&relay, &json!({ "body": upper, "from": "+15550100" }))
        .await
        .unwrap();

    assert_eq!(status, 200);
    assert_eq!(resp["sent"], true);
    assert_eq!(resp["hash"], "0xabc");
    assert_eq!(resp["message"], "OK: <f86a95> 0xabc");
    assert!(resp["date"].is_string());
}

/// Compact body is decoded before submission.
#[tokio::test]
async fn test_compact_message_is_decoded() {
    let node = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string(TX))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "0xdef" })))
        .expect(1)
        .mount(&node)
        .await;

    let relay = spawn_relay(blockbook_config(&node.uri())).await.unwrap();
    let text = TxmsCodec.encode(TX).unwrap();
    let (status, resp) = post_webhook(&relay, &json!({ "body": text })).await.unwrap();

    assert_eq!(status, 200);
    assert_eq!(resp["hash"], "0xdef");
}

/// JSON-RPC rejection comes back normalized with a 400.
#[tokio::test]
async fn test_rpc_rejection_is_normalized() {
    let node = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rpc"))
        .and(body_json(json!({
            "jsonrpc": "2.0",
            "method": "eth_sendRawTransaction",
            "params": [TX],
            "id": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32000, "message": "nonce too low" }
        })))
        .expect(1)
        .mount(&node)
        .await;

    let relay = spawn_relay(rpc_config(&node.uri())).await.unwrap();
    let (status, resp) = post_webhook(&relay, &json!({ "body": TX })).await.unwrap();

    assert_eq!(status, 400);
    assert_eq!(resp["sent"], false);
    assert_eq!(resp["errno"], 4);
    assert!(resp["message"].as_str().unwrap().contains("Nonce too low."));
}

/// Only the first line of a multi-line body is submitted.
#[tokio::test]
async fn test_multi_segment_body_submits_first_only() {
    let node = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string("0xaa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "0x01" })))
        .expect(1)
        .mount(&node)
        .await;
    Mock::given(method("POST"))
        .and(body_string("0xbb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "0x02" })))
        .expect(0)
        .mount(&node)
        .await;

    let relay = spawn_relay(blockbook_config(&node.uri())).await.unwrap();
    let (status, resp) = post_webhook(&relay, &json!({ "body": "0xAA\n0xBB" })).await.unwrap();

    assert_eq!(status, 200);
    assert_eq!(resp["hash"], "0x01");
}

/// With the all-segments policy every line is submitted and reported.
#[tokio::test]
async fn test_all_policy_returns_one_result_per_segment() {
    let node = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "0x01" })))
        .expect(2)
        .mount(&node)
        .await;

    let mut config = blockbook_config(&node.uri());
    config.message.dispatch_policy = DispatchPolicy::All;
    let relay = spawn_relay(config).await.unwrap();
    let (status, resp) = post_webhook(&relay, &json!({ "body": "0xaa\n0xbb" })).await.unwrap();

    assert_eq!(status, 200);
    let results = resp.as_array().expect("batch reply is an array");
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r["sent"] == true));
}

/// Empty bodies never reach the node.
#[tokio::test]
async fn test_empty_body_is_422() {
    let node = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "0x01" })))
        .expect(0)
        .mount(&node)
        .await;

    let relay = spawn_relay(blockbook_config(&node.uri())).await.unwrap();

    let (status, resp) = post_webhook(&relay, &json!({ "body": "   " })).await.unwrap();
    assert_eq!(status, 422);
    assert_eq!(resp["message"], "Err(1): Empty message");

    let (status, resp) = post_webhook(&relay, &json!({ "from": "+15550100" })).await.unwrap();
    assert_eq!(status, 422);
    assert_eq!(resp["errno"], 1);

    let (status, resp) = post_webhook(&relay, &json!({ "body": "\n0xaa" })).await.unwrap();
    assert_eq!(status, 422);
    assert_eq!(resp["message"], "Err(2): Empty message part");
}

/// Unreachable node → 500 transport error, relay keeps serving.
#[tokio::test]
async fn test_unreachable_provider_is_500() {
    let relay = spawn_relay(blockbook_config("http://127.0.0.1:1")).await.unwrap();

    let (status, resp) = post_webhook(&relay, &json!({ "body": TX })).await.unwrap();
    assert_eq!(status, 500);
    assert_eq!(resp["errno"], 3);
    assert_eq!(resp["message"], "Err(3): <f86a95>");

    let (status, _) = post_webhook(&relay, &json!({ "body": TX })).await.unwrap();
    assert_eq!(status, 500);
}

/// Unknown provider type fails each request, not the daemon.
#[tokio::test]
async fn test_unknown_provider_type_is_500() {
    let mut config = blockbook_config("http://127.0.0.1:1");
    config.provider.provider_type = "carrier-pigeon".to_string();
    let relay = spawn_relay(config).await.unwrap();

    let (status, resp) = post_webhook(&relay, &json!({ "body": TX })).await.unwrap();
    assert_eq!(status, 500);
    assert_eq!(resp["errno"], 6);
    assert_eq!(resp["message"], "Err(6): Unknown provider type");
}

/// Renamed body field is honoured.
#[tokio::test]
async fn test_custom_body_field() {
    let node = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "0x01" })))
        .expect(1)
        .mount(&node)
        .await;

    let mut config = blockbook_config(&node.uri());
    config.message.body_name = "Body".to_string();
    let relay = spawn_relay(config).await.unwrap();

    let (status, _) = post_webhook(&relay, &json!({ "Body": "0xaa" })).await.unwrap();
    assert_eq!(status, 200);
}
