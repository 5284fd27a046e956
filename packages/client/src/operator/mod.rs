//! Operator console: passphrase-gated REPL issuing commands to viewers.

mod console;
mod formatter;
mod session;

pub use console::{ConsoleAction, Target, parse_line};
pub use formatter::{LogLevel, OperatorFormatter};
pub use session::{ConsoleOutcome, OPERATOR_NAME, OperatorConsole, authorize, run_operator};

/// Operator settings taken from the command line
#[derive(Debug, Clone)]
pub struct OperatorConfig {
    pub url: String,
    pub passphrase: String,
}
