//! Operator console for a marionette server.
//!
//! Asks for the passphrase, then issues commands to all viewers or to one
//! of them and relays admin chat.
//!
//! Run with:
//! ```not_rust
//! MARIONETTE_OPERATOR_PASSPHRASE=secret cargo run --bin marionette-operator
//! cargo run --bin marionette-operator -- -u ws://10.0.0.2:3001/ws --passphrase secret
//! ```

use clap::Parser;
use marionette_client::operator::{OperatorConfig, run_operator};
use marionette_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "marionette-operator")]
#[command(about = "Marionette operator console", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3001/ws")]
    url: String,

    /// Passphrase the console asks for before connecting
    #[arg(long, env = "MARIONETTE_OPERATOR_PASSPHRASE", hide_env_values = true)]
    passphrase: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = OperatorConfig {
        url: args.url,
        passphrase: args.passphrase,
    };

    if let Err(e) = run_operator(config).await {
        tracing::error!("Operator error: {}", e);
        std::process::exit(1);
    }
}
