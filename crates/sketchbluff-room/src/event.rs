//! Outbound events at the gateway boundary.
//!
//! The core emits these after every accepted mutation; the gateway fans
//! them out per the attached [`Recipient`]. Serialize-only: nothing on
//! this path ever comes back in.

use serde::Serialize;
use sketchbluff_protocol::{ChatMessage, PlayerId, PlayerRole, Recipient, RoomId, StrokeData};

use crate::room::Room;
use crate::round::RoundResults;

/// One event addressed to some subset of a room.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEvent {
    pub room_id: RoomId,
    pub recipient: Recipient,
    pub event: GameEvent,
}

/// Everything the core tells the outside world. Internally tagged to
/// match the client wire format.
///
/// Room-carrying variants send a full snapshot; clients re-render from
/// the snapshot rather than patching.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    RoomCreated { room: Room },
    RoomJoined { room: Room },
    PlayerJoined { room: Room, player_id: PlayerId },
    RoomUpdated { room: Room },
    PlayerLeft { room: Room, player_id: PlayerId },
    HostChanged { room: Room, new_host: PlayerId },
    GameStarted { room: Room },
    /// Per-player: carries the recipient's own role and word.
    RoundStarted {
        room: Room,
        round: u32,
        role: PlayerRole,
        word: String,
    },
    StrokeAdded { stroke: StrokeData },
    /// Time bomb fired; all strokes of the current round are gone.
    CanvasCleared,
    RelayDrawerChanged { player_id: PlayerId },
    DrawingSubmitted { player_id: PlayerId },
    GuessingStarted { room: Room },
    PlayerGuessed { player_id: PlayerId },
    PlayerEliminated { player_id: PlayerId },
    VoteRecorded { player_id: PlayerId },
    /// Ping-pong looped back to another drawing phase.
    DrawingResumed { room: Room },
    RoundEnded { room: Room, results: RoundResults },
    GameEnded { room: Room },
    ChatMessage { message: ChatMessage },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tag_is_snake_case() {
        let ev = GameEvent::CanvasCleared;
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "canvas_cleared");
    }

    #[test]
    fn test_player_scoped_event_shape() {
        let ev = GameEvent::PlayerGuessed { player_id: PlayerId(4) };
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "player_guessed");
        assert_eq!(json["player_id"], 4);
    }
}
