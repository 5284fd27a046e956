//! Operator commands.
//!
//! A command is a closed tagged union with one payload shape per kind. Raw
//! `(kind, payload)` pairs coming off the wire are checked once, at
//! construction, by [`Command::from_parts`]; everything downstream matches on
//! the enum.

use std::{fmt, str::FromStr};

use super::{
    error::CommandError,
    value_object::{EffectName, TargetSelector},
};

/// Wire-level payload of a command before it is checked against its kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandPayload {
    Bool(bool),
    Text(String),
    None,
}

impl fmt::Display for CommandPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandPayload::Bool(value) => write!(f, "{}", value),
            CommandPayload::Text(text) => write!(f, "{:?}", text),
            CommandPayload::None => f.write_str("null"),
        }
    }
}

/// The closed command vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Matrix,
    Invert,
    Glitch,
    Rotate,
    Freeze,
    Unfreeze,
    Reset,
    Sound,
    Tts,
    Image,
    Video,
    Redirect,
    Kick,
    Reload,
    Alert,
    OpenChat,
}

impl CommandKind {
    pub const ALL: [CommandKind; 16] = [
        CommandKind::Matrix,
        CommandKind::Invert,
        CommandKind::Glitch,
        CommandKind::Rotate,
        CommandKind::Freeze,
        CommandKind::Unfreeze,
        CommandKind::Reset,
        CommandKind::Sound,
        CommandKind::Tts,
        CommandKind::Image,
        CommandKind::Video,
        CommandKind::Redirect,
        CommandKind::Kick,
        CommandKind::Reload,
        CommandKind::Alert,
        CommandKind::OpenChat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Matrix => "matrix",
            CommandKind::Invert => "invert",
            CommandKind::Glitch => "glitch",
            CommandKind::Rotate => "rotate",
            CommandKind::Freeze => "freeze",
            CommandKind::Unfreeze => "unfreeze",
            CommandKind::Reset => "reset",
            CommandKind::Sound => "sound",
            CommandKind::Tts => "tts",
            CommandKind::Image => "image",
            CommandKind::Video => "video",
            CommandKind::Redirect => "redirect",
            CommandKind::Kick => "kick",
            CommandKind::Reload => "reload",
            CommandKind::Alert => "alert",
            CommandKind::OpenChat => "open_chat",
        }
    }

    /// Shape of payload this kind expects
    pub fn payload_shape(&self) -> PayloadShape {
        match self {
            CommandKind::Matrix
            | CommandKind::Invert
            | CommandKind::Glitch
            | CommandKind::Rotate
            | CommandKind::Freeze => PayloadShape::Bool,
            CommandKind::Sound
            | CommandKind::Image
            | CommandKind::Video
            | CommandKind::Redirect => PayloadShape::Url,
            CommandKind::Tts | CommandKind::Alert => PayloadShape::Text,
            CommandKind::Unfreeze
            | CommandKind::Reset
            | CommandKind::Kick
            | CommandKind::Reload
            | CommandKind::OpenChat => PayloadShape::Ignored,
        }
    }
}

impl FromStr for CommandKind {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CommandError::UnknownKind(s.to_string()))
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Bool,
    /// Non-empty string
    Url,
    /// Any string
    Text,
    /// Payload is not inspected
    Ignored,
}

impl PayloadShape {
    fn describe(&self) -> &'static str {
        match self {
            PayloadShape::Bool => "a boolean",
            PayloadShape::Url => "a non-empty URL string",
            PayloadShape::Text => "a string",
            PayloadShape::Ignored => "any",
        }
    }
}

/// One checked operator instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Matrix(bool),
    Invert(bool),
    Glitch(bool),
    Rotate(bool),
    Freeze(bool),
    Unfreeze,
    Reset,
    Sound(String),
    Tts(String),
    Image(String),
    Video(String),
    Redirect(String),
    Kick,
    Reload,
    Alert(String),
    OpenChat,
}

impl Command {
    /// Build a command from a raw kind and payload, rejecting shape mismatches
    pub fn from_parts(kind: &str, payload: CommandPayload) -> Result<Self, CommandError> {
        let kind: CommandKind = kind.parse()?;
        let invalid = || CommandError::InvalidPayload {
            kind: kind.as_str(),
            expected: kind.payload_shape().describe(),
        };

        match kind.payload_shape() {
            PayloadShape::Bool => {
                let CommandPayload::Bool(enabled) = payload else {
                    return Err(invalid());
                };
                Ok(match kind {
                    CommandKind::Matrix => Command::Matrix(enabled),
                    CommandKind::Invert => Command::Invert(enabled),
                    CommandKind::Glitch => Command::Glitch(enabled),
                    CommandKind::Rotate => Command::Rotate(enabled),
                    _ => Command::Freeze(enabled),
                })
            }
            PayloadShape::Url => match payload {
                CommandPayload::Text(url) if !url.trim().is_empty() => {
                    let url = url.trim().to_string();
                    Ok(match kind {
                        CommandKind::Sound => Command::Sound(url),
                        CommandKind::Image => Command::Image(url),
                        CommandKind::Video => Command::Video(url),
                        _ => Command::Redirect(url),
                    })
                }
                _ => Err(invalid()),
            },
            PayloadShape::Text => {
                let CommandPayload::Text(text) = payload else {
                    return Err(invalid());
                };
                Ok(match kind {
                    CommandKind::Tts => Command::Tts(text),
                    _ => Command::Alert(text),
                })
            }
            PayloadShape::Ignored => Ok(match kind {
                CommandKind::Unfreeze => Command::Unfreeze,
                CommandKind::Reset => Command::Reset,
                CommandKind::Kick => Command::Kick,
                CommandKind::Reload => Command::Reload,
                _ => Command::OpenChat,
            }),
        }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Matrix(_) => CommandKind::Matrix,
            Command::Invert(_) => CommandKind::Invert,
            Command::Glitch(_) => CommandKind::Glitch,
            Command::Rotate(_) => CommandKind::Rotate,
            Command::Freeze(_) => CommandKind::Freeze,
            Command::Unfreeze => CommandKind::Unfreeze,
            Command::Reset => CommandKind::Reset,
            Command::Sound(_) => CommandKind::Sound,
            Command::Tts(_) => CommandKind::Tts,
            Command::Image(_) => CommandKind::Image,
            Command::Video(_) => CommandKind::Video,
            Command::Redirect(_) => CommandKind::Redirect,
            Command::Kick => CommandKind::Kick,
            Command::Reload => CommandKind::Reload,
            Command::Alert(_) => CommandKind::Alert,
            Command::OpenChat => CommandKind::OpenChat,
        }
    }

    pub fn payload(&self) -> CommandPayload {
        match self {
            Command::Matrix(enabled)
            | Command::Invert(enabled)
            | Command::Glitch(enabled)
            | Command::Rotate(enabled)
            | Command::Freeze(enabled) => CommandPayload::Bool(*enabled),
            Command::Sound(text)
            | Command::Tts(text)
            | Command::Image(text)
            | Command::Video(text)
            | Command::Redirect(text)
            | Command::Alert(text) => CommandPayload::Text(text.clone()),
            Command::Unfreeze
            | Command::Reset
            | Command::Kick
            | Command::Reload
            | Command::OpenChat => CommandPayload::None,
        }
    }

    /// The shared-state flag this command durably sets, if any
    ///
    /// Persistence depends only on the kind, never on the delivery target.
    pub fn persistent_effect(&self) -> Option<(EffectName, bool)> {
        match self {
            Command::Matrix(enabled) => Some((EffectName::Matrix, *enabled)),
            Command::Invert(enabled) => Some((EffectName::Invert, *enabled)),
            Command::Glitch(enabled) => Some((EffectName::Glitch, *enabled)),
            Command::Rotate(enabled) => Some((EffectName::Rotate, *enabled)),
            Command::Freeze(enabled) => Some((EffectName::Freeze, *enabled)),
            _ => None,
        }
    }
}

/// A command together with its delivery target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedCommand {
    pub target: TargetSelector,
    pub command: Command,
}
