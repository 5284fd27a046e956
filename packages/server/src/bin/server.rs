//! Marionette command and presence server.
//!
//! Tracks connected viewer sessions, holds the shared effect state and routes
//! operator commands to one session or to all of them.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin marionette-server
//! cargo run --bin marionette-server -- --host 127.0.0.1 --port 3001
//! ```

use clap::Parser;
use marionette_server::ui::{AppState, Server};
use marionette_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "marionette-server")]
#[command(about = "Presence and remote-command server for marionette viewers", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "MARIONETTE_PORT", default_value = "3001")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Repositories, pusher and use cases are wired once per process
    let server = Server::new(AppState::in_memory());

    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
