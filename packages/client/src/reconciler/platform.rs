//! Seams between the reconciler and the host environment.

use crate::error::PlatformError;

/// Page-wide presentation derived from the effect state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presentation {
    pub rotation_deg: u16,
    pub invert_on: bool,
    pub freeze_on: bool,
}

/// Maps a [`Presentation`] onto the host's display
///
/// `restore` must bring the display back to its baseline.
#[cfg_attr(test, mockall::automock)]
pub trait PresentationAdapter: Send {
    fn apply(&mut self, presentation: &Presentation);
    fn restore(&mut self);
}

/// Scoped owner of a [`PresentationAdapter`]
///
/// Forwards only actual changes and restores the baseline exactly once,
/// either on [`PresentationGuard::release`] or on drop.
pub struct PresentationGuard {
    adapter: Box<dyn PresentationAdapter>,
    current: Presentation,
    released: bool,
}

impl PresentationGuard {
    pub fn new(adapter: Box<dyn PresentationAdapter>) -> Self {
        Self {
            adapter,
            current: Presentation::default(),
            released: false,
        }
    }

    pub fn update(&mut self, presentation: Presentation) {
        if presentation != self.current {
            self.current = presentation;
            self.adapter.apply(&presentation);
            self.released = false;
        }
    }

    pub fn current(&self) -> Presentation {
        self.current
    }

    pub fn release(&mut self) {
        if !self.released {
            self.adapter.restore();
            self.current = Presentation::default();
            self.released = true;
        }
    }
}

impl Drop for PresentationGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Speech request with the fixed voice parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub pitch: f32,
    pub rate: f32,
}

impl Utterance {
    pub const PITCH: f32 = 0.5;
    pub const RATE: f32 = 0.8;

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pitch: Self::PITCH,
            rate: Self::RATE,
        }
    }
}

/// Fire-and-forget side effects of a viewer session
#[cfg_attr(test, mockall::automock)]
pub trait SessionPlatform: Send {
    fn play_audio(&mut self, url: &str) -> Result<(), PlatformError>;
    fn stop_audio(&mut self);
    fn speak(&mut self, utterance: &Utterance) -> Result<(), PlatformError>;
    fn cancel_speech(&mut self);
    fn navigate(&mut self, url: &str) -> Result<(), PlatformError>;
    fn reload(&mut self) -> Result<(), PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_forwards_only_changes() {
        // テスト項目: 変化があったときだけアダプタに反映する
        // given (前提条件):
        let mut adapter = MockPresentationAdapter::new();
        adapter.expect_apply().times(1).return_const(());
        adapter.expect_restore().times(1).return_const(());
        let mut guard = PresentationGuard::new(Box::new(adapter));
        let rotated = Presentation {
            rotation_deg: 180,
            ..Presentation::default()
        };

        // when (操作):
        guard.update(Presentation::default());
        guard.update(rotated);
        guard.update(rotated);

        // then (期待する結果):
        assert_eq!(guard.current(), rotated);
    }

    #[test]
    fn test_guard_restores_once() {
        // テスト項目: release 後の drop では二重に restore しない
        // given (前提条件):
        let mut adapter = MockPresentationAdapter::new();
        adapter.expect_apply().times(1).return_const(());
        adapter.expect_restore().times(1).return_const(());
        let mut guard = PresentationGuard::new(Box::new(adapter));
        guard.update(Presentation {
            invert_on: true,
            ..Presentation::default()
        });

        // when (操作):
        guard.release();
        drop(guard);

        // then (期待する結果): mock expectations are checked on drop
    }

    #[test]
    fn test_utterance_uses_fixed_voice() {
        // テスト項目: 読み上げのピッチと速度は固定値
        // when (操作):
        let utterance = Utterance::new("hello");

        // then (期待する結果):
        assert_eq!(utterance.pitch, 0.5);
        assert_eq!(utterance.rate, 0.8);
    }
}
