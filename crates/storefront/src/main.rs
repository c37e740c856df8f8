//! Parrot Storefront - interactive page session.
//!
//! Runs one storefront page on stdin/stdout. Type `help` for commands.
//!
//! # Architecture
//!
//! - Single-threaded tokio runtime; every event runs to completion
//! - Cart mirrored to a file store (or memory, see `PARROT_STORAGE`)
//! - Askama templates for rendered output
//! - Logs on stderr via `tracing`

#![cfg_attr(not(test), forbid(unsafe_code))]

use parrot_storefront::page::{Page, PageKind};
use parrot_storefront::{StorefrontConfig, shell, telemetry};
use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load configuration first; it decides the log format
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");
    telemetry::init(config.log_format, "parrot_storefront=info");

    if let Err(e) = run(config).await {
        tracing::error!("Session failed: {e}");
        std::process::exit(1);
    }
}

async fn run(config: StorefrontConfig) -> parrot_storefront::Result<()> {
    let store = config.storage.open()?;
    let mut page = Page::load(store, PageKind::Cart, &config)?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    shell::run(&mut page, stdin, &mut stdout).await?;

    tracing::info!("Session ended");
    Ok(())
}
