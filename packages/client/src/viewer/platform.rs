//! Terminal backends for the reconciler seams.
//!
//! Media, speech and navigation are reported on stdout; there is no real
//! playback device behind a terminal viewer.

use crate::{
    error::PlatformError,
    reconciler::{Presentation, PresentationAdapter, SessionPlatform, Utterance},
};

fn check_url(url: &str) -> Result<(), String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err("only http(s) URLs are supported".to_string())
    }
}

/// Prints side effects instead of performing them
#[derive(Debug, Default)]
pub struct TerminalPlatform {
    playing: Option<String>,
    speaking: bool,
}

impl TerminalPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn playing(&self) -> Option<&str> {
        self.playing.as_deref()
    }
}

impl SessionPlatform for TerminalPlatform {
    fn play_audio(&mut self, url: &str) -> Result<(), PlatformError> {
        check_url(url).map_err(|reason| PlatformError::Playback {
            url: url.to_string(),
            reason,
        })?;
        println!("\n♪ Playing {}", url);
        self.playing = Some(url.to_string());
        Ok(())
    }

    fn stop_audio(&mut self) {
        if let Some(url) = self.playing.take() {
            println!("\n♪ Stopped {}", url);
        }
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), PlatformError> {
        if utterance.text.trim().is_empty() {
            return Err(PlatformError::Speech("nothing to say".to_string()));
        }
        println!(
            "\n🗣 \"{}\" (pitch {}, rate {})",
            utterance.text, utterance.pitch, utterance.rate
        );
        self.speaking = true;
        Ok(())
    }

    fn cancel_speech(&mut self) {
        self.speaking = false;
    }

    fn navigate(&mut self, url: &str) -> Result<(), PlatformError> {
        check_url(url).map_err(|reason| PlatformError::Navigation {
            url: url.to_string(),
            reason,
        })?;
        println!("\n→ Navigating to {}", url);
        Ok(())
    }

    fn reload(&mut self) -> Result<(), PlatformError> {
        println!("\n↻ Reloading page");
        Ok(())
    }
}

/// Logs presentation changes
#[derive(Debug, Default)]
pub struct TerminalPresentation;

impl PresentationAdapter for TerminalPresentation {
    fn apply(&mut self, presentation: &Presentation) {
        tracing::info!(
            "Presentation: rotation={}°, invert={}, freeze={}",
            presentation.rotation_deg,
            presentation.invert_on,
            presentation.freeze_on
        );
    }

    fn restore(&mut self) {
        tracing::info!("Presentation restored");
    }
}
