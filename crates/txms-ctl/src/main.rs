//! txms-ctl: command-line interface for the txms relay.

use anyhow::{Context, Result};

mod cmd;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "127.0.0.1";

fn print_usage() {
    println!("Usage: txms-ctl [--host <host>] [--port <port>] [--body-name <field>] <command>");
    println!();
    println!("Commands:");
    println!("  ping              Check the relay is up");
    println!("  info              Show relay name and version");
    println!("  send <message>    Relay a message as an SMS gateway would");
    println!("  encode <hex>      Encode a hex transaction into compact text (local)");
    println!("  decode <text>     Decode compact text into a hex transaction (local)");
    println!();
    println!("Options:");
    println!("  --host <host>        Relay host (default: {})", DEFAULT_HOST);
    println!("  --port <port>        Relay port (default: {})", DEFAULT_PORT);
    println!("  --body-name <field>  Webhook body field (default: body)");
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut port = DEFAULT_PORT;
    let mut host = DEFAULT_HOST.to_string();
    let mut body_name = "body".to_string();
    let mut remaining: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--port" => {
                i += 1;
                port = args
                    .get(i)
                    .context("--port requires a value")?
                    .parse()
                    .context("--port must be a number")?;
            }
            "--host" => {
                i += 1;
                host = args.get(i).context("--host requires a value")?.clone();
            }
            "--body-name" => {
                i += 1;
                body_name = args.get(i).context("--body-name requires a value")?.clone();
            }
            _ => remaining.push(&args[i]),
        }
        i += 1;
    }

    match remaining.as_slice() {
        ["ping"] | []                  => cmd::status::cmd_ping(&host, port).await,
        ["info"]                       => cmd::status::cmd_info(&host, port).await,
        ["send", message @ ..] if !message.is_empty() => {
            cmd::send::cmd_send(&host, port, &body_name, &message.join("\n")).await
        }
        ["encode", hex]                => cmd::codec::cmd_encode(hex),
        ["decode", text]               => cmd::codec::cmd_decode(text),
        ["help"] | ["--help"] | ["-h"] => { print_usage(); Ok(()) }
        other => {
            eprintln!("Unknown command: {}", other.join(" "));
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}
