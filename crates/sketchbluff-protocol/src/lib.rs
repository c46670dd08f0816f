//! Shared data model for Sketchbluff.
//!
//! Everything the core and the session gateway both need to name: identity
//! newtypes, the phase and game-mode enums, stroke/chat data, room settings,
//! and the inbound command set. These types cross the gateway boundary, so
//! every one of them serializes to the wire format the clients speak
//! (snake_case tags, transparent id numbers).

mod command;
mod settings;
mod types;

pub use command::ClientCommand;
pub use settings::{RoomSettings, SettingsError};
pub use types::{
    ChatMessage, Difficulty, GameMode, GamePhase, Language, PlayerId, PlayerRole, Point,
    Recipient, RoomCode, RoomId, RoomListEntry, StrokeData, Tool, WordCategory,
};
