//! TTS Gateway Server
//!
//! HTTP gateway for text-to-speech using NVIDIA Riva and Cloudflare Workers AI.
//!
//! # Usage
//!
//! ```bash
//! # Listen on 0.0.0.0:8080 (default)
//! tts-gateway
//!
//! # Listen on a specific interface and port
//! tts-gateway --host 127.0.0.1 --port 9000
//! ```

use anyhow::Result;
use clap::Parser;
use tts_gateway::{AppState, router};
use tts_gateway_common::tracing::init_tracing;
use tts_gateway_common::{Config, HttpServerBuilder, ListenArgs};

#[derive(Parser, Debug)]
#[command(name = "tts-gateway")]
#[command(about = "HTTP gateway for text-to-speech using NVIDIA Riva and Cloudflare Workers AI")]
#[command(version)]
struct Args {
    #[command(flatten)]
    listen: ListenArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // Loads .env before clap reads HOST/PORT
    let config = Config::from_env()?;
    let args = Args::parse();

    tracing::info!("tts-gateway starting...");

    let http = reqwest::Client::builder()
        .user_agent(concat!("tts-gateway/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let state = AppState::from_config(&config, http);

    HttpServerBuilder::new(router(state))
        .with_listen(args.listen)
        .run()
        .await?;

    Ok(())
}
