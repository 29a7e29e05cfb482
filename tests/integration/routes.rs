use crate::*;

#[tokio::test]
async fn test_liveness_routes() {
    let relay = spawn_relay(blockbook_config("http://127.0.0.1:1")).await.unwrap();

    let root = reqwest::get(&relay.url).await.unwrap();
    assert_eq!(root.status().as_u16(), 418);
    assert_eq!(root.text().await.unwrap(), "I'm a cyber");

    let ping = reqwest::get(format!("{}/ping", relay.url)).await.unwrap();
    assert_eq!(ping.status().as_u16(), 200);
    assert_eq!(ping.text().await.unwrap(), "OK");

    let info = reqwest::get(format!("{}/info", relay.url)).await.unwrap();
    assert_eq!(info.status().as_u16(), 200);
    assert!(info.text().await.unwrap().contains(" v"));
}

#[tokio::test]
async fn test_non_json_webhook_is_400() {
    let relay = spawn_relay(blockbook_config("http://127.0.0.1:1")).await.unwrap();

    let resp = reqwest::Client::new()
        .post(&relay.url)
        .body("body=0xaa")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
}

/// Gateways that omit the JSON content type are still served.
#[tokio::test]
async fn test_json_without_content_type() {
    let relay = spawn_relay(blockbook_config("http://127.0.0.1:1")).await.unwrap();

    let resp = reqwest::Client::new()
        .post(&relay.url)
        .body(r#"{"body": "  "}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 422);
}
