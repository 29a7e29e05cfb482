//! Local codec commands: no daemon needed.

use anyhow::{Context, Result};
use txms_core::{TxCodec, TxmsCodec};

pub fn cmd_encode(hex_tx: &str) -> Result<()> {
    let text = TxmsCodec
        .encode(hex_tx)
        .with_context(|| format!("cannot encode {:?}", hex_tx))?;
    println!("{}", text);
    eprintln!(
        "{} characters, {} UTF-16 units",
        text.chars().count(),
        text.encode_utf16().count()
    );
    Ok(())
}

pub fn cmd_decode(text: &str) -> Result<()> {
    let hex = TxmsCodec.decode(text).context("cannot decode message")?;
    println!("{}", hex);
    Ok(())
}
