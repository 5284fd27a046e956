//! Terminal viewer: one reconciled session per connection, reconnecting on
//! connection loss.

mod formatter;
mod platform;
mod runner;
mod session;

use std::path::PathBuf;

use crate::animation::Viewport;

pub use formatter::ViewerFormatter;
pub use platform::{TerminalPlatform, TerminalPresentation};
pub use runner::run_viewer;
pub use session::{InputOutcome, ViewerInput, ViewerSession, run_viewer_session};

/// Viewer settings taken from the command line
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub url: String,
    pub name: Option<String>,
    pub page: String,
    pub device: String,
    pub viewport: Viewport,
    pub identity_file: PathBuf,
}
