//! Send a message through the relay, as a gateway would.

use anyhow::{bail, Result};
use serde_json::{json, Value};

use super::http::{base_url, post_json_body};

pub async fn cmd_send(host: &str, port: u16, body_field: &str, message: &str) -> Result<()> {
    let mut request = serde_json::Map::new();
    request.insert(body_field.to_string(), json!(message));

    let (status, resp) = post_json_body(&base_url(host, port), &Value::Object(request)).await?;

    let results = match resp {
        Value::Array(items) => items,
        single => vec![single],
    };

    println!("═══════════════════════════════════════");
    println!("  Relay Response (HTTP {})", status);
    println!("═══════════════════════════════════════");

    for r in &results {
        let sent = r["sent"].as_bool().unwrap_or(false);
        println!("  ┌─ {}", r["message"].as_str().unwrap_or("<no message>"));
        println!("  │  sent  : {}", sent);
        if let Some(hash) = r["hash"].as_str() {
            println!("  │  hash  : {}", hash);
        }
        if let Some(errno) = r["errno"].as_u64() {
            println!("  │  errno : {}", errno);
        }
        println!("  └─ date  : {}", r["date"].as_str().unwrap_or("-"));
    }

    if status >= 400 {
        bail!("relay reported failure (HTTP {})", status);
    }
    Ok(())
}
