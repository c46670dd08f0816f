//! Error types for registry and lifecycle operations.
//!
//! Every variant is ordinary control flow (spec'd precondition or
//! validation rejections); the gateway maps them to user-facing error
//! events or silence. Nothing here is crash-worthy.

use sketchbluff_protocol::{GamePhase, PlayerId, RoomId, SettingsError};

/// A rejected registry or lifecycle operation. State is untouched when
/// one of these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    /// No live room with that id or join code.
    #[error("room not found")]
    RoomNotFound,

    /// The player is not in any room (or not in the expected one).
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    /// The room has no free player slot.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// The player is already a member of a room.
    #[error("player {0} already in a room")]
    AlreadyInRoom(PlayerId),

    /// The operation is not legal in the room's current phase.
    #[error("operation requires phase {expected}, room is in {actual}")]
    WrongPhase { expected: GamePhase, actual: GamePhase },

    /// Host-only operation attempted by a non-host.
    #[error("player {0} is not the host")]
    NotHost(PlayerId),

    /// The host's ready flag is implicit and cannot be toggled.
    #[error("host cannot toggle ready")]
    HostCannotToggleReady,

    /// A game needs at least two players.
    #[error("not enough players to start")]
    NotEnoughPlayers,

    /// Some non-host human player has not readied up.
    #[error("not all players are ready")]
    PlayersNotReady,

    /// The word supplier found no pair for the room's filters.
    /// Fatal to the round start; the round counter is rolled back.
    #[error("no word pair matches the selected packs and language")]
    NoWordsAvailable,

    /// Per-player stroke rate limit exceeded.
    #[error("stroke throttled for player {0}")]
    Throttled(PlayerId),

    /// The active mode's input gating refused the stroke or submission.
    #[error("stroke rejected by game mode")]
    StrokeRejected,

    /// Settings failed bounds validation.
    #[error(transparent)]
    InvalidSettings(#[from] SettingsError),
}
