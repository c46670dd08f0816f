//! # Sketchbluff
//!
//! Authoritative game core for a real-time social-deduction drawing
//! game: one player set draws a shared secret word while hidden
//! deceivers draw a decoy; everyone guesses and votes.
//!
//! The core is transport-agnostic. A gateway resolves connections to
//! [`PlayerId`]s, feeds [`ClientCommand`]s into a [`GameServer`], and
//! fans out the [`OutboundEvent`] stream to its clients.
//!
//! ```rust,no_run
//! use sketchbluff::{GameServer, PlayerId, RoomSettings};
//!
//! # async fn demo() -> Result<(), sketchbluff::GameError> {
//! let (server, mut events) = GameServer::new();
//! let host = PlayerId(1);
//! server.create_room(host, "maja".into(), RoomSettings::default()).await?;
//!
//! tokio::spawn(async move {
//!     while let Some(event) = events.recv().await {
//!         // deliver to `event.recipient` over your transport
//!         let _ = event;
//!     }
//! });
//! # Ok(())
//! # }
//! ```

pub use sketchbluff_bots as bots;
pub use sketchbluff_modes as modes;
pub use sketchbluff_protocol as protocol;
pub use sketchbluff_room as room;
pub use sketchbluff_words as words;

pub use sketchbluff_protocol::{
    ChatMessage, ClientCommand, Difficulty, GameMode, GamePhase, Language, PlayerId, PlayerRole,
    Point, Recipient, RoomCode, RoomId, RoomListEntry, RoomSettings, StrokeData, Tool,
    WordCategory,
};
pub use sketchbluff_room::{
    GameError, GameEvent, GameServer, OutboundEvent, Player, Registry, Room, RoundData,
    RoundResults,
};
