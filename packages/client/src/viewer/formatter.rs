//! Message formatting utilities for the viewer terminal.

use marionette_server::{
    domain::{Command, CommandPayload},
    infrastructure::dto::websocket::{ChatMessageDto, SessionDto},
};
use marionette_shared::time::format_clock_time;

use crate::animation::{AnimationScheduler, EntityKind};

const RULE: &str = "============================================================";

/// Message formatter for viewer display
pub struct ViewerFormatter;

impl ViewerFormatter {
    pub fn format_connected(session_id: &str, name: Option<&str>) -> String {
        format!(
            "\nConnected as '{}' (session {}).\n\
             Type to chat when chat is enabled. Commands: /dismiss /close /sync /name <name> /page <path> /status /help /quit\n",
            name.unwrap_or("Anonymous"),
            session_id
        )
    }

    /// Format the presence list, marking this viewer with "(me)"
    pub fn format_presence(sessions: &[SessionDto], current_session_id: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", RULE));
        output.push_str(&format!("Online ({}):\n", sessions.len()));

        if sessions.is_empty() {
            output.push_str("(No viewers)\n");
        } else {
            for session in sessions {
                let me_suffix = if session.id == current_session_id {
                    " (me)"
                } else {
                    ""
                };
                output.push_str(&format!(
                    "{}{} - {} on {} [{}]\n",
                    session.name, me_suffix, session.activity, session.page, session.device
                ));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    pub fn format_chat_message(message: &ChatMessageDto) -> String {
        let badge = if message.is_admin { "★ " } else { "" };
        format!(
            "\n[{}] {}@{}: {}\n",
            format_clock_time(message.sent_at),
            badge,
            message.sender_name,
            message.text
        )
    }

    pub fn format_chat_status(enabled: bool) -> String {
        if enabled {
            "\n* Chat enabled\n".to_string()
        } else {
            "\n* Chat disabled\n".to_string()
        }
    }

    /// One-line notice of an applied command
    pub fn format_command(command: &Command) -> String {
        match command {
            Command::Alert(text) => format!(
                "\n\n{}\n!!! {} !!!\n(type /dismiss to close)\n{}\n",
                RULE, text, RULE
            ),
            Command::OpenChat => "\n* Chat window opened\n".to_string(),
            other => match other.payload() {
                CommandPayload::Bool(on) => {
                    format!("\n⚡ {} {}\n", other.kind(), if on { "on" } else { "off" })
                }
                CommandPayload::Text(text) => format!("\n⚡ {} {}\n", other.kind(), text),
                CommandPayload::None => format!("\n⚡ {}\n", other.kind()),
            },
        }
    }

    /// Summary of the running animations
    pub fn format_status(scheduler: &AnimationScheduler) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", RULE));
        let rain = if scheduler.is_raining() { "on" } else { "off" };
        output.push_str(&format!(
            "Rain: {} ({} columns, {} frames",
            rain,
            scheduler.rain_columns(),
            scheduler.rain_frames()
        ));
        if let Some(frame) = scheduler.last_frame() {
            output.push_str(&format!(", last frame {} glyphs", frame.glyphs.len()));
        }
        output.push_str(")\n");

        let entities = scheduler.entities();
        output.push_str(&format!("Entities ({}):\n", entities.len()));
        for entity in &entities {
            let kind = match entity.kind {
                EntityKind::Image => "image",
                EntityKind::Video => "video",
            };
            output.push_str(&format!(
                "#{} {} at ({:.0}, {:.0}) {}\n",
                entity.id, kind, entity.position.x, entity.position.y, entity.content
            ));
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Viewport;
    use rand::{SeedableRng, rngs::StdRng};

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

    #[test]
    fn test_format_presence_with_empty_list() {
        // テスト項目: 接続者が空の場合、適切なメッセージが表示される
        // when (操作):
        let result = ViewerFormatter::format_presence(&[], "s-1");

        // then (期待する結果):
        assert!(result.contains("Online (0):"));
        assert!(result.contains("(No viewers)"));
    }

    #[test]
    fn test_format_presence_marks_me() {
        // テスト項目: 自分のセッションにだけ (me) が付く
        // given (前提条件):
        let sessions = vec![session("s-1", "Fox"), session("s-2", "Owl")];

        // when (操作):
        let result = ViewerFormatter::format_presence(&sessions, "s-1");

        // then (期待する結果):
        assert!(result.contains("Fox (me) - Idle on / [Unknown]"));
        assert!(result.contains("Owl - Idle"));
        assert!(!result.contains("Owl (me)"));
    }

    #[test]
    fn test_format_admin_chat_has_badge() {
        // テスト項目: 管理者のチャットには ★ が付く
        // given (前提条件):
        let message = ChatMessageDto {
            sender_name: "ADMIN".to_string(),
            sender_id: "op".to_string(),
            text: "hello".to_string(),
            is_admin: true,
            sent_at: 0,
        };

        // when (操作):
        let result = ViewerFormatter::format_chat_message(&message);

        // then (期待する結果):
        assert!(result.contains("★ @ADMIN: hello"));
    }

    #[test]
    fn test_format_command_variants() {
        // テスト項目: コマンドの種類ごとに通知文が整形される
        // when (操作) / then (期待する結果):
        assert_eq!(
            ViewerFormatter::format_command(&Command::Matrix(true)),
            "\n⚡ matrix on\n"
        );
        assert_eq!(
            ViewerFormatter::format_command(&Command::Sound("https://a/b.mp3".to_string())),
            "\n⚡ sound https://a/b.mp3\n"
        );
        assert_eq!(ViewerFormatter::format_command(&Command::Kick), "\n⚡ kick\n");
        assert!(ViewerFormatter::format_command(&Command::Alert("BOO".to_string()))
            .contains("!!! BOO !!!"));
    }

    #[test]
    fn test_format_status_of_idle_scheduler() {
        // テスト項目: アニメーションが無い場合はレイン停止・エンティティ 0 と表示される
        // given (前提条件):
        let scheduler = AnimationScheduler::new(Viewport::new(320.0, 240.0));

        // when (操作):
        let result = ViewerFormatter::format_status(&scheduler);

        // then (期待する結果):
        assert!(result.contains("Rain: off (20 columns, 0 frames)"));
        assert!(result.contains("Entities (0):"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_format_status_lists_rain_and_entities() {
        // テスト項目: レインのフレーム情報と各エンティティの位置が表示される
        // given (前提条件):
        let mut scheduler = AnimationScheduler::new(Viewport::new(320.0, 240.0));
        let mut rng = StdRng::seed_from_u64(4);
        scheduler.spawn_entity(EntityKind::Video, "clip.mp4".to_string(), &mut rng);
        scheduler.set_matrix(true);
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        // when (操作):
        let result = ViewerFormatter::format_status(&scheduler);

        // then (期待する結果):
        assert!(result.contains("Rain: on (20 columns, "));
        assert!(result.contains("last frame 20 glyphs"));
        assert!(result.contains("Entities (1):"));
        assert!(result.contains("#1 video at ("));
        assert!(result.contains("clip.mp4"));
    }
}
