//! Shared HTTP request helpers for CLI commands.

use anyhow::{Context, Result};
use serde::Serialize;

pub fn base_url(host: &str, port: u16) -> String {
    format!("http://{}:{}", host, port)
}

pub async fn get_text(url: &str) -> Result<(u16, String)> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("failed to connect to txmsd at {}. Is it running?", url))?;
    let status = response.status().as_u16();
    let text = response.text().await.context("failed to read response")?;
    Ok((status, text))
}

pub async fn post_json_body<T: Serialize>(url: &str, body: &T) -> Result<(u16, serde_json::Value)> {
    let response = reqwest::Client::new()
        .post(url)
        .json(body)
        .send()
        .await
        .with_context(|| format!("failed to connect to txmsd at {}. Is it running?", url))?;
    let status = response.status().as_u16();
    let value = response
        .json::<serde_json::Value>()
        .await
        .context("failed to parse response")?;
    Ok((status, value))
}
