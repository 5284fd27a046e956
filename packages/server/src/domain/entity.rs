//! Domain entities: sessions, the shared state record and chat messages.

use serde::Serialize;

use super::value_object::{DisplayName, EffectName, SessionId};

pub const DEFAULT_PAGE: &str = "/";
pub const DEFAULT_ACTIVITY: &str = "Idle";
pub const DEFAULT_DEVICE: &str = "Unknown";

/// One live viewer connection and its presence metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: SessionId,
    pub display_name: DisplayName,
    pub current_page: String,
    pub activity_label: String,
    pub device_label: String,
    pub poster_image: Option<String>,
}

impl Session {
    /// Create the default record for a freshly connected session
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            display_name: DisplayName::anonymous(),
            current_page: DEFAULT_PAGE.to_string(),
            activity_label: DEFAULT_ACTIVITY.to_string(),
            device_label: DEFAULT_DEVICE.to_string(),
            poster_image: None,
        }
    }

    /// Merge every field present in `patch`, leaving the others untouched
    pub fn apply(&mut self, patch: SessionPatch) {
        if let Some(name) = patch.display_name {
            self.display_name = name;
        }
        if let Some(page) = patch.current_page {
            self.current_page = page;
        }
        if let Some(activity) = patch.activity_label {
            self.activity_label = activity;
        }
        if let Some(device) = patch.device_label {
            self.device_label = device;
        }
        if let Some(poster) = patch.poster_image {
            self.poster_image = Some(poster);
        }
    }
}

/// Partial update of a [`Session`]; `None` means "keep the current value"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionPatch {
    pub display_name: Option<DisplayName>,
    pub current_page: Option<String>,
    pub activity_label: Option<String>,
    pub device_label: Option<String>,
    pub poster_image: Option<String>,
}

impl SessionPatch {
    /// Identity report: a missing or blank name resets to "Anonymous"
    pub fn identity(name: Option<String>) -> Self {
        Self {
            display_name: Some(DisplayName::new(name)),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Persistent effect toggles, one flag per [`EffectName`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Effects {
    pub matrix: bool,
    pub invert: bool,
    pub glitch: bool,
    pub rotate: bool,
    pub freeze: bool,
}

impl Effects {
    pub fn get(&self, name: EffectName) -> bool {
        match name {
            EffectName::Matrix => self.matrix,
            EffectName::Invert => self.invert,
            EffectName::Glitch => self.glitch,
            EffectName::Rotate => self.rotate,
            EffectName::Freeze => self.freeze,
        }
    }

    pub fn set(&mut self, name: EffectName, enabled: bool) {
        let flag = match name {
            EffectName::Matrix => &mut self.matrix,
            EffectName::Invert => &mut self.invert,
            EffectName::Glitch => &mut self.glitch,
            EffectName::Rotate => &mut self.rotate,
            EffectName::Freeze => &mut self.freeze,
        };
        *flag = enabled;
    }

    pub fn any_active(&self) -> bool {
        EffectName::ALL.into_iter().any(|name| self.get(name))
    }
}

/// The single process-wide record of chat gating and effect toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SharedState {
    pub chat_enabled: bool,
    pub effects: Effects,
}

/// A relayed chat line; never stored server-side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender_name: DisplayName,
    pub sender_id: SessionId,
    pub text: String,
    pub is_admin: bool,
    pub sent_at: i64,
}
