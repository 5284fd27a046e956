//! Operator console grammar.
//!
//! ```text
//! help | quit | users | state | refresh
//! chat on|off
//! say <text>
//! [@target[,target...]] <kind> [payload]
//! ```
//!
//! `target` is `all` (the default), a unique session-id prefix or an exact
//! display name. Several targets are separated by commas; `all` among them
//! absorbs the rest. Boolean effects given without a payload toggle the
//! current shared flag.

use std::str::FromStr;

use marionette_server::{
    domain::{
        Command, CommandError, CommandKind, CommandPayload, EffectName, Effects, PayloadShape,
        TargetSelector,
    },
    infrastructure::dto::websocket::SessionDto,
};

use crate::error::ConsoleError;

/// Resolved console target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    All,
    Session { id: String, name: String },
}

impl Target {
    /// Value of the `target` field on the wire
    pub fn selector(&self) -> &str {
        match self {
            Target::All => TargetSelector::ALL_KEYWORD,
            Target::Session { id, .. } => id,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Target::All => "ALL USERS".to_string(),
            Target::Session { name, .. } => name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleAction {
    Help,
    Quit,
    Users,
    State,
    Refresh,
    Chat(bool),
    Say(String),
    Issue { targets: Vec<Target>, command: Command },
}

/// Parse one console line against the current presence list and effects
pub fn parse_line(
    line: &str,
    sessions: &[SessionDto],
    effects: &Effects,
) -> Result<ConsoleAction, ConsoleError> {
    let line = line.trim();
    let (head, rest) = split_word(line);
    if head.is_empty() {
        return Err(ConsoleError::Empty);
    }

    if let Some(selector) = head.strip_prefix('@') {
        let targets = resolve_targets(selector, sessions)?;
        let (kind, payload) = split_word(rest);
        if kind.is_empty() {
            return Err(ConsoleError::Usage("@<target>[,<target>...] <kind> [payload]"));
        }
        let command = parse_command(kind, payload, effects)?;
        return Ok(ConsoleAction::Issue { targets, command });
    }

    match head {
        "help" | "?" => Ok(ConsoleAction::Help),
        "quit" | "exit" => Ok(ConsoleAction::Quit),
        "users" => Ok(ConsoleAction::Users),
        "state" => Ok(ConsoleAction::State),
        "refresh" => Ok(ConsoleAction::Refresh),
        "chat" => match rest {
            "on" => Ok(ConsoleAction::Chat(true)),
            "off" => Ok(ConsoleAction::Chat(false)),
            _ => Err(ConsoleError::Usage("chat on|off")),
        },
        "say" if rest.is_empty() => Err(ConsoleError::Usage("say <text>")),
        "say" => Ok(ConsoleAction::Say(rest.to_string())),
        kind => Ok(ConsoleAction::Issue {
            targets: vec![Target::All],
            command: parse_command(kind, rest, effects)?,
        }),
    }
}

fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

/// Resolve a comma-separated selector list, dropping repeats of one session
fn resolve_targets(
    selectors: &str,
    sessions: &[SessionDto],
) -> Result<Vec<Target>, ConsoleError> {
    let mut targets: Vec<Target> = Vec::new();
    for selector in selectors.split(',') {
        if selector.is_empty() {
            return Err(ConsoleError::MissingTarget);
        }
        let target = resolve_target(selector, sessions)?;
        if !targets.contains(&target) {
            targets.push(target);
        }
    }
    if targets.contains(&Target::All) {
        return Ok(vec![Target::All]);
    }
    Ok(targets)
}

fn resolve_target(selector: &str, sessions: &[SessionDto]) -> Result<Target, ConsoleError> {
    if selector == TargetSelector::ALL_KEYWORD {
        return Ok(Target::All);
    }

    let by_name: Vec<&SessionDto> = sessions.iter().filter(|s| s.name == selector).collect();
    let matches = if by_name.is_empty() {
        sessions
            .iter()
            .filter(|s| s.id.starts_with(selector))
            .collect()
    } else {
        by_name
    };

    match matches.as_slice() {
        [] => Err(ConsoleError::NoMatchingSession(selector.to_string())),
        [session] => Ok(Target::Session {
            id: session.id.clone(),
            name: session.name.clone(),
        }),
        _ => Err(ConsoleError::AmbiguousTarget(selector.to_string())),
    }
}

fn parse_command(kind: &str, arg: &str, effects: &Effects) -> Result<Command, ConsoleError> {
    let kind = CommandKind::from_str(kind).map_err(console_error)?;
    let payload = match kind.payload_shape() {
        PayloadShape::Bool => match arg {
            "on" | "true" => CommandPayload::Bool(true),
            "off" | "false" => CommandPayload::Bool(false),
            "" => {
                let current = EffectName::from_str(kind.as_str())
                    .map(|name| effects.get(name))
                    .unwrap_or(false);
                CommandPayload::Bool(!current)
            }
            _ => {
                return Err(ConsoleError::InvalidPayload {
                    kind: kind.as_str(),
                    expected: "on|off",
                });
            }
        },
        PayloadShape::Url | PayloadShape::Text if arg.is_empty() => CommandPayload::None,
        PayloadShape::Url | PayloadShape::Text => CommandPayload::Text(arg.to_string()),
        PayloadShape::Ignored => CommandPayload::None,
    };
    Command::from_parts(kind.as_str(), payload).map_err(console_error)
}

fn console_error(error: CommandError) -> ConsoleError {
    match error {
        CommandError::UnknownKind(kind) => ConsoleError::UnknownCommand(kind),
        CommandError::InvalidPayload { kind, expected } => {
            ConsoleError::InvalidPayload { kind, expected }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str, name: &str) -> SessionDto {
        SessionDto {
            id: id.to_string(),
            name: name.to_string(),
            page: "/".to_string(),
            activity: "Idle".to_string(),
            device: "Unknown".to_string(),
            poster: None,
        }
    }

    fn sessions() -> Vec<SessionDto> {
        vec![
            session("3f2a9c10-0000-4000-8000-000000000001", "Fox"),
            session("3f7b1111-0000-4000-8000-000000000002", "Owl"),
        ]
    }

    fn parse(line: &str) -> Result<ConsoleAction, ConsoleError> {
        parse_line(line, &sessions(), &Effects::default())
    }

    #[test]
    fn test_parse_builtin_words() {
        // テスト項目: 組み込みコマンドを解釈できる
        // when (操作) / then (期待する結果):
        assert_eq!(parse("help"), Ok(ConsoleAction::Help));
        assert_eq!(parse("quit"), Ok(ConsoleAction::Quit));
        assert_eq!(parse("users"), Ok(ConsoleAction::Users));
        assert_eq!(parse("state"), Ok(ConsoleAction::State));
        assert_eq!(parse("refresh"), Ok(ConsoleAction::Refresh));
        assert_eq!(parse("chat on"), Ok(ConsoleAction::Chat(true)));
        assert_eq!(parse("chat off"), Ok(ConsoleAction::Chat(false)));
        assert_eq!(parse("chat maybe"), Err(ConsoleError::Usage("chat on|off")));
        assert_eq!(
            parse("say hello  everyone"),
            Ok(ConsoleAction::Say("hello  everyone".to_string()))
        );
        assert_eq!(parse("   "), Err(ConsoleError::Empty));
    }

    #[test]
    fn test_parse_broadcast_command() {
        // テスト項目: ターゲット省略時は全員宛て
        // when (操作):
        let action = parse("alert SYSTEM COMPROMISED");

        // then (期待する結果):
        assert_eq!(
            action,
            Ok(ConsoleAction::Issue {
                targets: vec![Target::All],
                command: Command::Alert("SYSTEM COMPROMISED".to_string()),
            })
        );
    }

    #[test]
    fn test_boolean_effect_toggles_without_payload() {
        // テスト項目: ペイロード省略時は現在のフラグを反転する
        // given (前提条件):
        let effects = Effects {
            matrix: true,
            ..Effects::default()
        };

        // when (操作):
        let matrix = parse_line("matrix", &sessions(), &effects);
        let invert = parse_line("invert", &sessions(), &effects);
        let explicit = parse_line("matrix on", &sessions(), &effects);

        // then (期待する結果):
        assert_eq!(
            matrix,
            Ok(ConsoleAction::Issue {
                targets: vec![Target::All],
                command: Command::Matrix(false),
            })
        );
        assert_eq!(
            invert,
            Ok(ConsoleAction::Issue {
                targets: vec![Target::All],
                command: Command::Invert(true),
            })
        );
        assert_eq!(
            explicit,
            Ok(ConsoleAction::Issue {
                targets: vec![Target::All],
                command: Command::Matrix(true),
            })
        );
    }

    #[test]
    fn test_targets_by_prefix_and_name() {
        // テスト項目: ID の一意な接頭辞または表示名で宛先を指定できる
        // when (操作):
        let by_prefix = parse("@3f2a kick");
        let by_name = parse("@Owl reload");
        let all = parse("@all reset");

        // then (期待する結果):
        assert_eq!(
            by_prefix,
            Ok(ConsoleAction::Issue {
                targets: vec![Target::Session {
                    id: "3f2a9c10-0000-4000-8000-000000000001".to_string(),
                    name: "Fox".to_string(),
                }],
                command: Command::Kick,
            })
        );
        assert!(matches!(
            by_name,
            Ok(ConsoleAction::Issue { ref targets, .. })
                if matches!(targets.as_slice(), [Target::Session { name, .. }] if name == "Owl")
        ));
        assert_eq!(
            all,
            Ok(ConsoleAction::Issue {
                targets: vec![Target::All],
                command: Command::Reset,
            })
        );
    }

    #[test]
    fn test_target_errors() {
        // テスト項目: 宛先が不正な場合はエラーになる
        // when (操作) / then (期待する結果):
        assert_eq!(
            parse("@3f kick"),
            Err(ConsoleError::AmbiguousTarget("3f".to_string()))
        );
        assert_eq!(
            parse("@zzz kick"),
            Err(ConsoleError::NoMatchingSession("zzz".to_string()))
        );
        assert_eq!(parse("@ kick"), Err(ConsoleError::MissingTarget));
        assert_eq!(
            parse("@Fox"),
            Err(ConsoleError::Usage("@<target>[,<target>...] <kind> [payload]"))
        );
    }

    #[test]
    fn test_comma_separated_targets() {
        // テスト項目: カンマ区切りで複数の宛先を指定できる
        // when (操作):
        let both = parse("@Fox,Owl matrix on");
        let mixed = parse("@3f2a,Owl,Fox kick");

        // then (期待する結果):
        let fox = Target::Session {
            id: "3f2a9c10-0000-4000-8000-000000000001".to_string(),
            name: "Fox".to_string(),
        };
        let owl = Target::Session {
            id: "3f7b1111-0000-4000-8000-000000000002".to_string(),
            name: "Owl".to_string(),
        };
        assert_eq!(
            both,
            Ok(ConsoleAction::Issue {
                targets: vec![fox.clone(), owl.clone()],
                command: Command::Matrix(true),
            })
        );
        assert_eq!(
            mixed,
            Ok(ConsoleAction::Issue {
                targets: vec![fox, owl],
                command: Command::Kick,
            })
        );
    }

    #[test]
    fn test_all_in_target_list_absorbs_sessions() {
        // テスト項目: 宛先リストに all を含むと全員宛て 1 件にまとまる
        // when (操作):
        let action = parse("@Fox,all reset");

        // then (期待する結果):
        assert_eq!(
            action,
            Ok(ConsoleAction::Issue {
                targets: vec![Target::All],
                command: Command::Reset,
            })
        );
    }

    #[test]
    fn test_target_list_errors() {
        // テスト項目: リスト中に不正な宛先があれば全体がエラーになる
        // when (操作) / then (期待する結果):
        assert_eq!(parse("@Fox, kick"), Err(ConsoleError::MissingTarget));
        assert_eq!(parse("@Fox,,Owl kick"), Err(ConsoleError::MissingTarget));
        assert_eq!(
            parse("@Fox,zzz kick"),
            Err(ConsoleError::NoMatchingSession("zzz".to_string()))
        );
        assert_eq!(
            parse("@Owl,3f kick"),
            Err(ConsoleError::AmbiguousTarget("3f".to_string()))
        );
    }

    #[test]
    fn test_payload_errors() {
        // テスト項目: 種別やペイロードが不正な場合はエラーになる
        // when (操作) / then (期待する結果):
        assert_eq!(
            parse("explode"),
            Err(ConsoleError::UnknownCommand("explode".to_string()))
        );
        assert_eq!(
            parse("rotate sideways"),
            Err(ConsoleError::InvalidPayload {
                kind: "rotate",
                expected: "on|off",
            })
        );
        assert!(matches!(
            parse("sound"),
            Err(ConsoleError::InvalidPayload { kind: "sound", .. })
        ));
    }

    #[test]
    fn test_target_selector_matches_wire_value() {
        // テスト項目: 送信時のターゲット値
        // when (操作) / then (期待する結果):
        assert_eq!(Target::All.selector(), "all");
        assert_eq!(
            Target::Session {
                id: "abc".to_string(),
                name: "Fox".to_string(),
            }
            .selector(),
            "abc"
        );
    }
}
