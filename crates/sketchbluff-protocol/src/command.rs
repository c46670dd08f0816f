//! The inbound operation set at the gateway boundary.

use serde::{Deserialize, Serialize};

use crate::{PlayerId, RoomSettings, StrokeData};

/// Everything a connection can ask the core to do, one variant per
/// lifecycle/registry operation. The gateway resolves the caller's
/// [`PlayerId`] before the command reaches the core, so none of the
/// variants carry one.
///
/// Internally tagged (`{ "type": "draw_stroke", ... }`) to match the
/// client wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    CreateRoom {
        username: String,
        settings: RoomSettings,
    },
    JoinRoom {
        room_code: String,
        username: String,
    },
    UpdateSettings {
        settings: RoomSettings,
    },
    ToggleReady,
    StartGame,
    DrawStroke {
        stroke: StrokeData,
    },
    SubmitDrawing {
        canvas_snapshot: String,
    },
    SubmitGuess {
        guess: String,
    },
    VoteTarget {
        target_player_id: PlayerId,
    },
    ChatMessage {
        message: String,
    },
    LeaveRoom,
    Heartbeat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point, Tool};

    #[test]
    fn test_command_tag_is_snake_case() {
        let cmd = ClientCommand::ToggleReady;
        let json: serde_json::Value = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "toggle_ready");
    }

    #[test]
    fn test_join_room_json_shape() {
        let json = r#"{ "type": "join_room", "room_code": "XK29QA", "username": "maja" }"#;
        let cmd: ClientCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            ClientCommand::JoinRoom {
                room_code: "XK29QA".into(),
                username: "maja".into(),
            }
        );
    }

    #[test]
    fn test_draw_stroke_round_trip() {
        let cmd = ClientCommand::DrawStroke {
            stroke: StrokeData {
                id: "s-9".into(),
                player_id: PlayerId(1),
                points: vec![Point { x: 0.0, y: 0.0 }, Point { x: 5.0, y: 5.0 }],
                color: "#FF0000".into(),
                width: 2.5,
                tool: Tool::Pencil,
                timestamp: 10,
            },
        };
        let bytes = serde_json::to_vec(&cmd).unwrap();
        let decoded: ClientCommand = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(cmd, decoded);
    }

    #[test]
    fn test_unknown_command_rejected() {
        let json = r#"{ "type": "fly_to_moon" }"#;
        let result: Result<ClientCommand, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
