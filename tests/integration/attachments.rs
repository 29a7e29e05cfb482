use serde_json::json;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use txms_core::DispatchPolicy;

use crate::*;

fn mms_config(node: &str) -> RelayConfig {
    let mut config = blockbook_config(node);
    config.message.mms = true;
    config
}

/// MMS with an empty body: the first carrier attachment is relayed, the
/// image is never fetched, and the failed download is skipped.
#[tokio::test]
async fn test_mms_attachment_is_relayed() {
    let node = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string(TX))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "0xabc" })))
        .expect(1)
        .mount(&node)
        .await;

    let media = MockServer::start().await;
    Mock::given(path("/photo.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TX))
        .expect(0)
        .mount(&media)
        .await;
    Mock::given(path("/gone.txt"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&media)
        .await;
    Mock::given(path("/part.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("{TX}\n")))
        .expect(1)
        .mount(&media)
        .await;
    Mock::given(path("/later.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("0xbb"))
        .expect(0)
        .mount(&media)
        .await;

    let relay = spawn_relay(mms_config(&node.uri())).await.unwrap();
    let body = json!({
        "body": "",
        "mms": [
            format!("{}/photo.jpg", media.uri()),
            format!("{}/gone.txt", media.uri()),
            format!("{}/part.txt", media.uri()),
            format!("{}/later.txt", media.uri()),
        ]
    });
    let (status, resp) = post_webhook(&relay, &body).await.unwrap();

    assert_eq!(status, 200);
    assert_eq!(resp["hash"], "0xabc");
}

/// No attachment yields anything → "no valid transactions".
#[tokio::test]
async fn test_mms_without_usable_attachment() {
    let node = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "0xabc" })))
        .expect(0)
        .mount(&node)
        .await;

    let media = MockServer::start().await;
    Mock::given(path("/broken.txt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&media)
        .await;

    let relay = spawn_relay(mms_config(&node.uri())).await.unwrap();
    let body = json!({
        "mms": [
            format!("{}/broken.txt", media.uri()),
            format!("{}/photo.png", media.uri()),
        ]
    });
    let (status, resp) = post_webhook(&relay, &body).await.unwrap();

    assert_eq!(status, 422);
    assert_eq!(resp["errno"], 7);
    assert_eq!(resp["message"], "Err(7): No valid transactions processed");
}

/// A non-blank body takes precedence over attachments.
#[tokio::test]
async fn test_body_wins_over_attachments() {
    let node = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string("0xaa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "0x01" })))
        .expect(1)
        .mount(&node)
        .await;

    let media = MockServer::start().await;
    Mock::given(path("/part.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("0xbb"))
        .expect(0)
        .mount(&media)
        .await;

    let mut config = mms_config(&node.uri());
    config.message.media_name = "MediaUrls".to_string();
    let relay = spawn_relay(config).await.unwrap();
    let body = json!({
        "body": "0xaa",
        "MediaUrls": [format!("{}/part.txt", media.uri())]
    });
    let (status, resp) = post_webhook(&relay, &body).await.unwrap();

    assert_eq!(status, 200);
    assert_eq!(resp["hash"], "0x01");
}

/// Under the all-segments policy only the first usable attachment is
/// dispatched; later carriers are never fetched.
#[tokio::test]
async fn test_all_policy_stops_at_first_attachment() {
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

    let media = MockServer::start().await;
    Mock::given(path("/a.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("0xaa\n"))
        .expect(1)
        .mount(&media)
        .await;
    Mock::given(path("/b.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("0xbb"))
        .expect(0)
        .mount(&media)
        .await;

    let mut config = mms_config(&node.uri());
    config.message.dispatch_policy = DispatchPolicy::All;
    let relay = spawn_relay(config).await.unwrap();
    let body = json!({
        "mms": [
            format!("{}/a.txt", media.uri()),
            format!("{}/b.txt", media.uri()),
        ]
    });
    let (status, resp) = post_webhook(&relay, &body).await.unwrap();

    assert_eq!(status, 200);
    let results = resp.as_array().expect("batch reply is an array");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["hash"], "0x01");
}
