//! Room registry, round lifecycle and the async game core.
//!
//! The [`registry::Registry`] is the synchronous heart: every rule of
//! the game lives there, driven by injected time and randomness. The
//! [`server::GameServer`] wraps it with the tokio mutex, the outbound
//! event channel, and the timer/bot task plumbing.

pub mod chat;
pub mod error;
pub mod event;
pub mod player;
pub mod registry;
pub mod room;
pub mod round;
pub mod server;
pub mod timers;

pub use chat::ChatLog;
pub use error::GameError;
pub use event::{GameEvent, OutboundEvent};
pub use player::Player;
pub use registry::{
    AFK_THRESHOLD_MS, Effect, MIN_PLAYERS_TO_START, Outcome, ROUND_ADVANCE_DELAY_MS, Registry,
    STROKE_LIMIT, STROKE_WINDOW_MS,
};
pub use room::Room;
pub use round::{RoundData, RoundResults};
pub use server::GameServer;
pub use timers::RoomTimers;
