//! Liveness commands.

use anyhow::{bail, Result};

use super::http::{base_url, get_text};

pub async fn cmd_ping(host: &str, port: u16) -> Result<()> {
    let (status, text) = get_text(&format!("{}/ping", base_url(host, port))).await?;
    if status != 200 {
        bail!("txmsd answered ping with HTTP {}: {}", status, text);
    }
    println!("{}", text);
    Ok(())
}

pub async fn cmd_info(host: &str, port: u16) -> Result<()> {
    let (_, text) = get_text(&format!("{}/info", base_url(host, port))).await?;
    println!("{}", text);
    Ok(())
}
