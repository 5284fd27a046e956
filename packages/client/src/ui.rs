//! Terminal helpers shared by both clients.

use std::io::Write;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::error::ClientError;

/// Redisplay the prompt after printing an inbound frame
pub fn redisplay_prompt(prompt: &str) {
    print!("{}> ", prompt);
    std::io::stdout().flush().ok();
}

/// Read stdin lines on a dedicated thread (rustyline is synchronous)
///
/// The channel closes on Ctrl+C, Ctrl+D or a readline error.
pub fn spawn_line_reader(prompt: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

/// Read one line without history (used for the operator passphrase)
pub fn read_secret(prompt: &str) -> Result<String, ClientError> {
    let mut rl = DefaultEditor::new().map_err(|e| ClientError::Input(e.to_string()))?;
    rl.readline(prompt)
        .map(|line| line.trim().to_string())
        .map_err(|e| ClientError::Input(e.to_string()))
}
