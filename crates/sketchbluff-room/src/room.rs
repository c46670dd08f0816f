//! The room aggregate: membership, settings, phase, round history.

use serde::Serialize;
use sketchbluff_protocol::{GamePhase, PlayerId, RoomCode, RoomId, RoomSettings};

use crate::chat::ChatLog;
use crate::player::Player;
use crate::round::RoundData;

/// One game room and everything it owns. The registry is the only writer;
/// event payloads carry clones.
#[derive(Debug, Clone, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub code: RoomCode,
    pub host_id: PlayerId,
    pub settings: RoomSettings,
    pub players: Vec<Player>,
    pub phase: GamePhase,
    /// 1-based; 0 means no round has started.
    pub current_round: u32,
    pub rounds: Vec<RoundData>,
    pub created_at: u64,
    pub started_at: Option<u64>,
    /// Room-internal bookkeeping, not part of the wire snapshot.
    #[serde(skip)]
    pub chat: ChatLog,
}

impl Room {
    pub fn new(
        id: RoomId,
        code: RoomCode,
        host: Player,
        settings: RoomSettings,
        created_at: u64,
    ) -> Self {
        Self {
            id,
            code,
            host_id: host.id,
            settings,
            players: vec![host],
            phase: GamePhase::Lobby,
            current_round: 0,
            rounds: Vec::new(),
            created_at,
            started_at: None,
            chat: ChatLog::new(),
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.settings.max_players
    }

    pub fn bots(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_bot)
    }

    /// Current round's state, if a round has started.
    pub fn current_round_data(&self) -> Option<&RoundData> {
        let idx = self.current_round.checked_sub(1)? as usize;
        self.rounds.get(idx)
    }

    pub fn current_round_mut(&mut self) -> Option<&mut RoundData> {
        let idx = self.current_round.checked_sub(1)? as usize;
        self.rounds.get_mut(idx)
    }

    /// Start requirements beyond being in the lobby: at least two players
    /// and every non-host human ready. Bots and the host are implicitly
    /// ready.
    pub fn humans_ready(&self) -> bool {
        self.players
            .iter()
            .filter(|p| !p.is_host && !p.is_bot)
            .all(|p| p.is_ready)
    }

    pub fn all_submitted(&self) -> bool {
        self.players.iter().all(|p| p.has_submitted_drawing)
    }

    pub fn all_guessed(&self) -> bool {
        self.players.iter().all(|p| p.has_guessed)
    }
}
