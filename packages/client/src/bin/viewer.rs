//! Terminal viewer for a marionette server.
//!
//! Reports presence, reconciles remote commands and shows the resulting
//! view state. Reconnects on disconnection (max 5 attempts with 5 second
//! interval). The display name is remembered in the identity file.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin marionette-viewer -- --name Fox
//! cargo run --bin marionette-viewer -- -u ws://127.0.0.1:3001/ws --page /gallery
//! ```

use std::path::PathBuf;

use clap::Parser;
use marionette_client::{
    animation::{Viewport, parse_dimension},
    viewer::{ViewerConfig, run_viewer},
};
use marionette_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "marionette-viewer")]
#[command(about = "Marionette viewer that obeys remote commands", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3001/ws")]
    url: String,

    /// Display name; falls back to the remembered one
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Page reported in presence
    #[arg(long, default_value = "/")]
    page: String,

    /// Device label reported in presence
    #[arg(long, default_value = "Terminal")]
    device: String,

    /// Viewport width used by the animations
    #[arg(long, default_value_t = 1280.0, value_parser = parse_dimension)]
    width: f64,

    /// Viewport height used by the animations
    #[arg(long, default_value_t = 720.0, value_parser = parse_dimension)]
    height: f64,

    /// File the display name is remembered in
    #[arg(long, default_value = ".marionette-identity.json")]
    identity_file: PathBuf,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = ViewerConfig {
        url: args.url,
        name: args.name,
        page: args.page,
        device: args.device,
        viewport: Viewport::new(args.width, args.height),
        identity_file: args.identity_file,
    };

    if let Err(e) = run_viewer(config).await {
        tracing::error!("Viewer error: {}", e);
        std::process::exit(1);
    }
}
