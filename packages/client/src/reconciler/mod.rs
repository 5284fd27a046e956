//! Client reconciler: the per-viewer effect state machine.
//!
//! Every routed command is applied synchronously, in arrival order. Flags are
//! idempotent; media side effects go through [`SessionPlatform`] and their
//! failures are only logged.

mod platform;

use marionette_server::domain::{Command, Effects, SharedState};
use rand::{SeedableRng, rngs::StdRng};

use crate::animation::{AnimationScheduler, BouncingEntity, EntityKind, Viewport};

pub use platform::{
    Presentation, PresentationAdapter, PresentationGuard, SessionPlatform, Utterance,
};

#[cfg(test)]
pub use platform::{MockPresentationAdapter, MockSessionPlatform};

/// Where `kick` sends a session
pub const KICK_DESTINATION: &str = "https://www.google.com";

/// Local effect state of one viewer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub rotation_deg: u16,
    pub invert_on: bool,
    pub matrix_on: bool,
    pub glitch_on: bool,
    pub freeze_on: bool,
    pub alert_text: Option<String>,
    pub chat_open: bool,
}

impl ViewState {
    pub fn presentation(&self) -> Presentation {
        Presentation {
            rotation_deg: self.rotation_deg,
            invert_on: self.invert_on,
            freeze_on: self.freeze_on,
        }
    }
}

fn rotation_for(rotated: bool) -> u16 {
    if rotated { 180 } else { 0 }
}

pub struct Reconciler {
    state: ViewState,
    platform: Box<dyn SessionPlatform>,
    presentation: PresentationGuard,
    scheduler: AnimationScheduler,
    rng: StdRng,
    awaiting_sync: bool,
}

impl Reconciler {
    pub fn new(
        platform: Box<dyn SessionPlatform>,
        adapter: Box<dyn PresentationAdapter>,
        viewport: Viewport,
    ) -> Self {
        Self::with_rng(platform, adapter, viewport, StdRng::from_os_rng())
    }

    pub fn with_rng(
        platform: Box<dyn SessionPlatform>,
        adapter: Box<dyn PresentationAdapter>,
        viewport: Viewport,
        rng: StdRng,
    ) -> Self {
        Self {
            state: ViewState::default(),
            platform,
            presentation: PresentationGuard::new(adapter),
            scheduler: AnimationScheduler::new(viewport),
            rng,
            awaiting_sync: true,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn entities(&self) -> Vec<BouncingEntity> {
        self.scheduler.entities()
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    /// Apply one routed command
    pub fn apply(&mut self, command: Command) {
        tracing::debug!("Applying command '{}'", command.kind());
        match command {
            Command::Rotate(rotated) => self.state.rotation_deg = rotation_for(rotated),
            Command::Invert(on) => self.state.invert_on = on,
            Command::Matrix(on) => self.set_matrix(on),
            Command::Glitch(on) => self.state.glitch_on = on,
            Command::Freeze(on) => self.state.freeze_on = on,
            Command::Unfreeze => self.state.freeze_on = false,
            Command::Sound(url) => {
                self.platform.stop_audio();
                if let Err(e) = self.platform.play_audio(&url) {
                    tracing::warn!("{}", e);
                }
            }
            Command::Tts(text) => {
                if let Err(e) = self.platform.speak(&Utterance::new(text)) {
                    tracing::warn!("{}", e);
                }
            }
            Command::Image(url) => {
                self.scheduler
                    .spawn_entity(EntityKind::Image, url, &mut self.rng);
            }
            Command::Video(url) => {
                self.scheduler
                    .spawn_entity(EntityKind::Video, url, &mut self.rng);
            }
            Command::Redirect(url) => self.navigate(&url),
            Command::Kick => self.navigate(KICK_DESTINATION),
            Command::Reload => {
                if let Err(e) = self.platform.reload() {
                    tracing::warn!("{}", e);
                }
            }
            Command::Alert(text) => self.state.alert_text = Some(text),
            Command::OpenChat => self.state.chat_open = true,
            Command::Reset => self.reset(),
        }
        self.refresh_presentation();
    }

    /// Converge effect flags to a full shared-state snapshot
    pub fn sync(&mut self, shared: &SharedState) {
        let Effects {
            matrix,
            invert,
            glitch,
            rotate,
            freeze,
        } = shared.effects;
        self.state.rotation_deg = rotation_for(rotate);
        self.state.invert_on = invert;
        self.state.glitch_on = glitch;
        self.state.freeze_on = freeze;
        self.set_matrix(matrix);
        self.refresh_presentation();
    }

    /// Expect the next state snapshot to be applied (after connect or an
    /// explicit snapshot request)
    pub fn expect_sync(&mut self) {
        self.awaiting_sync = true;
    }

    /// Offer a broadcast state snapshot; applied only while a sync is awaited
    ///
    /// Returns whether the snapshot was applied.
    pub fn offer_snapshot(&mut self, shared: &SharedState) -> bool {
        if !self.awaiting_sync {
            return false;
        }
        self.awaiting_sync = false;
        self.sync(shared);
        true
    }

    pub fn dismiss_alert(&mut self) {
        self.state.alert_text = None;
    }

    pub fn close_chat(&mut self) {
        self.state.chat_open = false;
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.scheduler.resize(viewport);
    }

    /// Cancel animation, silence media and restore the baseline presentation
    pub fn teardown(&mut self) {
        self.scheduler.teardown();
        self.platform.stop_audio();
        self.platform.cancel_speech();
        self.presentation.release();
        self.state = ViewState::default();
    }

    fn reset(&mut self) {
        self.state.rotation_deg = 0;
        self.state.invert_on = false;
        self.state.glitch_on = false;
        self.state.freeze_on = false;
        self.state.alert_text = None;
        self.set_matrix(false);
        self.scheduler.clear_entities();
        self.platform.stop_audio();
        self.platform.cancel_speech();
    }

    fn set_matrix(&mut self, on: bool) {
        self.state.matrix_on = on;
        self.scheduler.set_matrix(on);
    }

    fn navigate(&mut self, url: &str) {
        if let Err(e) = self.platform.navigate(url) {
            tracing::warn!("{}", e);
        }
    }

    fn refresh_presentation(&mut self) {
        self.presentation.update(self.state.presentation());
    }
}
