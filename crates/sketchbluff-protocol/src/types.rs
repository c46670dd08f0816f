//! Core identity and game-data types.
//!
//! These are the structures that travel between the gateway and the core,
//! so their serde representations are part of the wire contract: ids
//! serialize as plain numbers, enums as snake_case strings.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player (human or bot).
///
/// Newtype over `u64` so a player id can never be confused with a room id.
/// The gateway assigns ids to connections; the registry assigns them to
/// bots from the same space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unique identifier for a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

/// A human-readable 6-character join code, unique among live rooms.
///
/// Players type this to join; it is not the room's identity (that is
/// [`RoomId`]), just the lookup key shown in the lobby browser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(pub String);

impl RoomCode {
    /// Length of every generated code.
    pub const LEN: usize = 6;
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Game enums
// ---------------------------------------------------------------------------

/// Lifecycle phase of a room.
///
/// ```text
/// lobby → drawing → guessing → round_end → { drawing (next round) | results }
/// ```
///
/// `lobby` and `results` are the only phases without an automatic timed
/// exit; `results` is terminal for the room's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Lobby,
    Drawing,
    Guessing,
    RoundEnd,
    Results,
}

impl GamePhase {
    /// Returns `true` if the room is accepting new players.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Lobby)
    }

    /// Returns `true` if a round is in flight (per-round player fields
    /// are meaningful).
    pub fn in_round(&self) -> bool {
        matches!(self, Self::Drawing | Self::Guessing | Self::RoundEnd)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Lobby => "lobby",
            Self::Drawing => "drawing",
            Self::Guessing => "guessing",
            Self::RoundEnd => "round_end",
            Self::Results => "results",
        };
        f.write_str(s)
    }
}

/// The fifteen gameplay-modifier rule sets.
///
/// Most modes are view-level transforms on the client (mirror, echo, fog,
/// shadow); the ones with authoritative state get a `ModeData` variant in
/// the mode engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    ClassicDeceiver,
    RelayDraw,
    FogOfWar,
    DoubleDeceiver,
    ShadowLines,
    ToolLockout,
    TimeBomb,
    MirrorMayhem,
    WhisperHints,
    StencilZones,
    EraserRoulette,
    CamouflagePalette,
    EchoBrush,
    PingPongGuess,
    SuddenDeath,
}

impl GameMode {
    /// Number of deceiver roles dealt at round start.
    pub fn deceiver_count(&self) -> usize {
        match self {
            Self::DoubleDeceiver => 2,
            _ => 1,
        }
    }
}

/// The two mutually exclusive round roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    /// Received the real word.
    Target,
    /// Received the decoy word.
    Deceiver,
}

/// Word-pack categories selectable in room settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordCategory {
    Animals,
    Objects,
    Food,
    Actions,
    Places,
    Abstract,
}

/// Language filter for the word supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    Swedish,
    /// Matches words of either language.
    Both,
}

/// Decoy-similarity tier: how close the decoy word is to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Pencil,
    Brush,
    Eraser,
}

// ---------------------------------------------------------------------------
// Stroke data
// ---------------------------------------------------------------------------

/// A single point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One committed drawing stroke.
///
/// Strokes are immutable once accepted; undo/redo is a client-local view
/// and never reaches the authoritative state. The id is client-assigned
/// and opaque to the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeData {
    pub id: String,
    pub player_id: PlayerId,
    /// Ordered point sequence; a committed stroke has at least two.
    pub points: Vec<Point>,
    /// CSS-style hex color.
    pub color: String,
    pub width: f64,
    pub tool: Tool,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// One entry in a room's chat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub player_id: PlayerId,
    pub player_name: String,
    pub message: String,
    pub timestamp: u64,
}

// ---------------------------------------------------------------------------
// Gateway-boundary helpers
// ---------------------------------------------------------------------------

/// Specifies who should receive an outbound event.
///
/// The core tags each event it emits; the gateway decides delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    /// Every player in the room.
    All,
    /// One specific player.
    Player(PlayerId),
    /// Everyone except the specified player (e.g. a stroke's author).
    AllExcept(PlayerId),
}

/// A summary row for the public pre-join lobby browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomListEntry {
    pub code: RoomCode,
    pub player_count: usize,
    pub max_players: usize,
    pub game_mode: GameMode,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Wire-shape tests. The client speaks snake_case tags and plain-number
    //! ids; a serde attribute regression here breaks every client.

    use super::*;

    #[test]
    fn test_player_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&PlayerId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId(7).to_string(), "P-7");
    }

    #[test]
    fn test_room_code_serializes_transparently() {
        let json = serde_json::to_string(&RoomCode("AB12CD".into())).unwrap();
        assert_eq!(json, "\"AB12CD\"");
    }

    #[test]
    fn test_game_phase_snake_case() {
        let json = serde_json::to_string(&GamePhase::RoundEnd).unwrap();
        assert_eq!(json, "\"round_end\"");
        let back: GamePhase = serde_json::from_str("\"lobby\"").unwrap();
        assert_eq!(back, GamePhase::Lobby);
    }

    #[test]
    fn test_game_mode_snake_case() {
        let json = serde_json::to_string(&GameMode::PingPongGuess).unwrap();
        assert_eq!(json, "\"ping_pong_guess\"");
        let back: GameMode = serde_json::from_str("\"classic_deceiver\"").unwrap();
        assert_eq!(back, GameMode::ClassicDeceiver);
    }

    #[test]
    fn test_deceiver_count() {
        assert_eq!(GameMode::DoubleDeceiver.deceiver_count(), 2);
        assert_eq!(GameMode::ClassicDeceiver.deceiver_count(), 1);
        assert_eq!(GameMode::SuddenDeath.deceiver_count(), 1);
    }

    #[test]
    fn test_phase_is_joinable_only_in_lobby() {
        assert!(GamePhase::Lobby.is_joinable());
        assert!(!GamePhase::Drawing.is_joinable());
        assert!(!GamePhase::Results.is_joinable());
    }

    #[test]
    fn test_phase_in_round() {
        assert!(!GamePhase::Lobby.in_round());
        assert!(GamePhase::Drawing.in_round());
        assert!(GamePhase::Guessing.in_round());
        assert!(GamePhase::RoundEnd.in_round());
        assert!(!GamePhase::Results.in_round());
    }

    #[test]
    fn test_stroke_round_trip() {
        let stroke = StrokeData {
            id: "s-1".into(),
            player_id: PlayerId(3),
            points: vec![Point { x: 1.0, y: 2.0 }, Point { x: 3.0, y: 4.0 }],
            color: "#000000".into(),
            width: 3.0,
            tool: Tool::Brush,
            timestamp: 1_000,
        };
        let bytes = serde_json::to_vec(&stroke).unwrap();
        let decoded: StrokeData = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(stroke, decoded);
    }

    #[test]
    fn test_tool_snake_case() {
        assert_eq!(serde_json::to_string(&Tool::Eraser).unwrap(), "\"eraser\"");
    }

    #[test]
    fn test_decode_unknown_mode_returns_error() {
        let result: Result<GameMode, _> = serde_json::from_str("\"speed_run\"");
        assert!(result.is_err());
    }
}
