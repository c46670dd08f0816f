//! The room registry and round lifecycle state machine.
//!
//! All game state lives here, owned by a single [`Registry`] instance.
//! Every operation is synchronous: it takes the caller-resolved player
//! id and the current time, validates preconditions, mutates, and
//! returns an [`Outcome`] — the events to broadcast plus the side
//! effects (timers to arm, bot actions to trigger) the async shell must
//! execute. A returned error means state is untouched.
//!
//! Keeping time and randomness injected (`now` parameters, the owned
//! seedable rng) makes the whole state machine testable without a
//! runtime.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use sketchbluff_modes::{ModeData, RelayAdvance};
use sketchbluff_protocol::{
    GameMode, GamePhase, PlayerId, PlayerRole, Recipient, RoomCode, RoomId, RoomListEntry,
    RoomSettings, StrokeData,
};
use sketchbluff_words::pick_word_pair;

use crate::error::GameError;
use crate::event::{GameEvent, OutboundEvent};
use crate::player::Player;
use crate::room::Room;
use crate::round::{RoundData, RoundResults};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Pause on `round_end` before the next round (or final results).
pub const ROUND_ADVANCE_DELAY_MS: u64 = 5_000;
/// No activity for this long marks a player disconnected.
pub const AFK_THRESHOLD_MS: u64 = 60_000;
/// Per-player stroke budget within the rolling window.
pub const STROKE_LIMIT: usize = 60;
pub const STROKE_WINDOW_MS: u64 = 1_000;
/// A game needs at least this many players (bots included).
pub const MIN_PLAYERS_TO_START: usize = 2;

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Bot ids are allocated from the top half of the id space so they never
/// collide with gateway-assigned connection ids.
const BOT_ID_BASE: u64 = 1 << 32;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Deferred side effects of an accepted operation. The registry never
/// performs I/O or spawns tasks itself; the async shell executes these
/// after the lock is released or within the same critical section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Schedule the round_end → next-round/results transition.
    ArmRoundAdvance { room_id: RoomId, round: u32, delay_ms: u64 },
    /// Start the 1 s time-bomb tick for this round.
    ArmTimeBomb { room_id: RoomId, round: u32 },
    /// The time-bomb tick is stale; let it wind down.
    StopTimeBomb { room_id: RoomId },
    /// Abort every timer the room owns; the room is gone.
    TeardownRoom { room_id: RoomId },
    /// Abort all bot tasks in the room.
    CancelBots { room_id: RoomId },
    /// Abort one bot's tasks.
    CancelBot { room_id: RoomId, bot: PlayerId },
    /// Arm a drawing burst for this bot.
    BotDraw { room_id: RoomId, bot: PlayerId, round: u32 },
    /// Arm a guess timer for this bot.
    BotGuess { room_id: RoomId, bot: PlayerId, round: u32 },
    /// Arm a vote timer for this bot.
    BotVote { room_id: RoomId, bot: PlayerId, round: u32 },
}

/// Events and effects produced by one accepted operation.
#[derive(Debug, Default)]
pub struct Outcome {
    pub events: Vec<OutboundEvent>,
    pub effects: Vec<Effect>,
}

impl Outcome {
    pub fn new() -> Self {
        Self::default()
    }

    fn event(&mut self, room_id: RoomId, recipient: Recipient, event: GameEvent) {
        self.events.push(OutboundEvent { room_id, recipient, event });
    }

    fn effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Owns every room and the player/code indexes. Constructed once at
/// process start; components receive a handle, never a global.
#[derive(Debug)]
pub struct Registry {
    rooms: HashMap<RoomId, Room>,
    codes: HashMap<String, RoomId>,
    player_rooms: HashMap<PlayerId, RoomId>,
    next_room_id: u64,
    next_bot_id: u64,
    rng: StdRng,
}

impl Registry {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Deterministic registry for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rooms: HashMap::new(),
            codes: HashMap::new(),
            player_rooms: HashMap::new(),
            next_room_id: 1,
            next_bot_id: BOT_ID_BASE,
            rng,
        }
    }

    // -- Reads --------------------------------------------------------------

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn room_by_code(&self, code: &str) -> Option<&Room> {
        let id = self.codes.get(&code.to_ascii_uppercase())?;
        self.rooms.get(id)
    }

    pub fn room_by_player(&self, player: PlayerId) -> Option<&Room> {
        let id = self.player_rooms.get(&player)?;
        self.rooms.get(id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Public lobby-phase rooms for the pre-join browser.
    pub fn list_public_rooms(&self) -> Vec<RoomListEntry> {
        self.rooms
            .values()
            .filter(|r| r.settings.is_public && r.phase.is_joinable())
            .map(|r| RoomListEntry {
                code: r.code.clone(),
                player_count: r.players.len(),
                max_players: r.settings.max_players,
                game_mode: r.settings.game_mode,
            })
            .collect()
    }

    // -- Lobby operations ---------------------------------------------------

    /// Creates a room with the caller as host. Bots are seeded right away
    /// when the settings enable them.
    pub fn create_room(
        &mut self,
        host_id: PlayerId,
        username: String,
        settings: RoomSettings,
        now: u64,
    ) -> Result<(RoomId, Outcome), GameError> {
        settings.validate()?;
        if self.player_rooms.contains_key(&host_id) {
            return Err(GameError::AlreadyInRoom(host_id));
        }

        let room_id = RoomId(self.next_room_id);
        self.next_room_id += 1;
        let code = self.generate_code();

        let host = Player::human(host_id, username, true, now, &mut self.rng);
        let room = Room::new(room_id, RoomCode(code.clone()), host, settings, now);
        info!(room_id = %room_id, code = %room.code, host = %host_id, "room created");

        self.rooms.insert(room_id, room);
        self.codes.insert(code, room_id);
        self.player_rooms.insert(host_id, room_id);

        let mut outcome = Outcome::new();
        if let Some(room) = self.rooms.get(&room_id) {
            if room.settings.bots_enabled && room.settings.bot_count > 0 {
                let count = room.settings.bot_count;
                self.add_bots_inner(room_id, count, now);
            }
        }
        if let Some(room) = self.rooms.get(&room_id) {
            outcome.event(
                room_id,
                Recipient::Player(host_id),
                GameEvent::RoomCreated { room: room.clone() },
            );
        }
        Ok((room_id, outcome))
    }

    /// Joins by code. Lobby phase only.
    pub fn join_room(
        &mut self,
        player_id: PlayerId,
        code: &str,
        username: String,
        now: u64,
    ) -> Result<Outcome, GameError> {
        if self.player_rooms.contains_key(&player_id) {
            return Err(GameError::AlreadyInRoom(player_id));
        }
        let room_id = *self
            .codes
            .get(&code.to_ascii_uppercase())
            .ok_or(GameError::RoomNotFound)?;
        let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        if !room.phase.is_joinable() {
            return Err(GameError::WrongPhase {
                expected: GamePhase::Lobby,
                actual: room.phase,
            });
        }
        if room.is_full() {
            return Err(GameError::RoomFull(room_id));
        }

        let player = Player::human(player_id, username, false, now, &mut self.rng);
        room.players.push(player);
        debug!(room_id = %room_id, player = %player_id, "player joined");

        let snapshot = room.clone();
        self.player_rooms.insert(player_id, room_id);

        let mut outcome = Outcome::new();
        outcome.event(
            room_id,
            Recipient::Player(player_id),
            GameEvent::RoomJoined { room: snapshot.clone() },
        );
        outcome.event(
            room_id,
            Recipient::AllExcept(player_id),
            GameEvent::PlayerJoined { room: snapshot, player_id },
        );
        Ok(outcome)
    }

    /// Host-only settings update; reconciles bot membership when the bot
    /// toggle or count changed.
    pub fn update_settings(
        &mut self,
        player_id: PlayerId,
        settings: RoomSettings,
        now: u64,
    ) -> Result<Outcome, GameError> {
        settings.validate()?;
        let room_id = self.room_id_of(player_id)?;
        let (prev_enabled, prev_count) = {
            let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
            expect_phase(room, GamePhase::Lobby)?;
            if room.host_id != player_id {
                return Err(GameError::NotHost(player_id));
            }
            let prev = (room.settings.bots_enabled, room.settings.bot_count);
            room.settings = settings;
            prev
        };

        let mut outcome = Outcome::new();
        let (enabled, count) = {
            let room = self.rooms.get(&room_id).ok_or(GameError::RoomNotFound)?;
            (room.settings.bots_enabled, room.settings.bot_count)
        };
        if enabled && !prev_enabled {
            self.add_bots_inner(room_id, count, now);
        } else if !enabled && prev_enabled {
            self.remove_bots_inner(room_id, &mut outcome);
        } else if enabled && count != prev_count {
            self.remove_bots_inner(room_id, &mut outcome);
            self.add_bots_inner(room_id, count, now);
        }

        if let Some(room) = self.rooms.get(&room_id) {
            outcome.event(room_id, Recipient::All, GameEvent::RoomUpdated { room: room.clone() });
        }
        Ok(outcome)
    }

    /// Adds up to `count` bots, clamped to the free slots. Lobby only.
    pub fn add_bots(
        &mut self,
        room_id: RoomId,
        count: usize,
        now: u64,
    ) -> Result<Outcome, GameError> {
        let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        expect_phase(room, GamePhase::Lobby)?;
        self.add_bots_inner(room_id, count, now);

        let mut outcome = Outcome::new();
        if let Some(room) = self.rooms.get(&room_id) {
            outcome.event(room_id, Recipient::All, GameEvent::RoomUpdated { room: room.clone() });
        }
        Ok(outcome)
    }

    /// Removes every bot and cancels their timers. Lobby only.
    pub fn remove_bots(&mut self, room_id: RoomId, _now: u64) -> Result<Outcome, GameError> {
        let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        expect_phase(room, GamePhase::Lobby)?;

        let mut outcome = Outcome::new();
        self.remove_bots_inner(room_id, &mut outcome);
        if let Some(room) = self.rooms.get(&room_id) {
            outcome.event(room_id, Recipient::All, GameEvent::RoomUpdated { room: room.clone() });
        }
        Ok(outcome)
    }

    fn add_bots_inner(&mut self, room_id: RoomId, count: usize, now: u64) {
        let Some(room) = self.rooms.get_mut(&room_id) else { return };
        let slots = room.settings.max_players.saturating_sub(room.players.len());
        let to_add = count.min(slots);
        let mut ids = Vec::with_capacity(to_add);
        for i in 0..to_add {
            let id = PlayerId(self.next_bot_id);
            self.next_bot_id += 1;
            room.players.push(Player::bot(id, i, now, &mut self.rng));
            ids.push(id);
        }
        debug!(room_id = %room_id, added = ids.len(), "bots added");
        for id in ids {
            self.player_rooms.insert(id, room_id);
        }
    }

    fn remove_bots_inner(&mut self, room_id: RoomId, outcome: &mut Outcome) {
        let Some(room) = self.rooms.get_mut(&room_id) else { return };
        let bot_ids: Vec<PlayerId> = room.bots().map(|b| b.id).collect();
        room.players.retain(|p| !p.is_bot);
        for id in &bot_ids {
            self.player_rooms.remove(id);
        }
        if !bot_ids.is_empty() {
            debug!(room_id = %room_id, removed = bot_ids.len(), "bots removed");
            outcome.effect(Effect::CancelBots { room_id });
        }
    }

    /// Non-host ready flip. The host is implicitly ready.
    pub fn toggle_ready(&mut self, player_id: PlayerId) -> Result<Outcome, GameError> {
        let room_id = self.room_id_of(player_id)?;
        let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        expect_phase(room, GamePhase::Lobby)?;
        let player = room
            .player_mut(player_id)
            .ok_or(GameError::PlayerNotFound(player_id))?;
        if player.is_host {
            return Err(GameError::HostCannotToggleReady);
        }
        player.is_ready = !player.is_ready;

        let mut outcome = Outcome::new();
        outcome.event(room_id, Recipient::All, GameEvent::RoomUpdated { room: room.clone() });
        Ok(outcome)
    }

    // -- Game start and rounds ----------------------------------------------

    /// Host starts the game: needs at least two players and every
    /// non-host human ready.
    pub fn start_game(&mut self, player_id: PlayerId, now: u64) -> Result<Outcome, GameError> {
        let room_id = self.room_id_of(player_id)?;
        {
            let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
            expect_phase(room, GamePhase::Lobby)?;
            if room.host_id != player_id {
                return Err(GameError::NotHost(player_id));
            }
            if room.players.len() < MIN_PLAYERS_TO_START {
                return Err(GameError::NotEnoughPlayers);
            }
            if !room.humans_ready() {
                return Err(GameError::PlayersNotReady);
            }
        }

        let mut outcome = self.start_round(room_id, now)?;
        let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        room.started_at = Some(now);
        info!(room_id = %room_id, players = room.players.len(), "game started");
        outcome.events.insert(
            0,
            OutboundEvent {
                room_id,
                recipient: Recipient::All,
                event: GameEvent::GameStarted { room: room.clone() },
            },
        );
        Ok(outcome)
    }

    /// Starts the next round: word pair, role fan-out, mode init, phase
    /// transition to `drawing`. Fails without mutating when the word
    /// supplier comes up empty.
    pub fn start_round(&mut self, room_id: RoomId, now: u64) -> Result<Outcome, GameError> {
        let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        let rng = &mut self.rng;

        // Word pair first: nothing below runs (and nothing needs rolling
        // back) when the selected packs have no words.
        let pair = pick_word_pair(
            &room.settings.word_packs,
            room.settings.language,
            room.settings.decoy_similarity,
            rng,
        )
        .ok_or(GameError::NoWordsAvailable)?;

        room.current_round += 1;

        let deceiver_count = room.settings.game_mode.deceiver_count().min(room.players.len());
        let mut order: Vec<PlayerId> = room.players.iter().map(|p| p.id).collect();
        order.shuffle(rng);

        for player in &mut room.players {
            player.reset_round_state();
            let idx = order.iter().position(|id| *id == player.id);
            let is_deceiver = idx.map(|i| i < deceiver_count).unwrap_or(false);
            if is_deceiver {
                player.role = Some(PlayerRole::Deceiver);
                player.assigned_word = Some(pair.decoy.clone());
            } else {
                player.role = Some(PlayerRole::Target);
                player.assigned_word = Some(pair.target.clone());
            }
        }

        let member_ids: Vec<PlayerId> = room.players.iter().map(|p| p.id).collect();
        let mode_data = ModeData::for_round(room.settings.game_mode, &member_ids, now, rng);
        let round = room.current_round;
        room.rounds.push(RoundData::new(
            round,
            pair.target,
            pair.decoy,
            pair.category,
            now,
            mode_data,
        ));
        room.phase = GamePhase::Drawing;
        info!(room_id = %room_id, round, mode = ?room.settings.game_mode, "round started");

        let mut outcome = Outcome::new();
        let snapshot = room.clone();
        for player in &room.players {
            if let (Some(role), Some(word)) = (player.role, player.assigned_word.clone()) {
                outcome.event(
                    room_id,
                    Recipient::Player(player.id),
                    GameEvent::RoundStarted { room: snapshot.clone(), round, role, word },
                );
            }
        }

        // Stale tasks from the previous round must not outlive it.
        outcome.effect(Effect::CancelBots { room_id });
        if room.settings.game_mode == GameMode::TimeBomb {
            outcome.effect(Effect::ArmTimeBomb { room_id, round });
        }
        push_bot_draw_effects(room, round, &mut outcome);
        Ok(outcome)
    }

    // -- Drawing phase ------------------------------------------------------

    /// Accepts a stroke: drawing phase, per-player rolling throttle, mode
    /// gating. The stroke must be the caller's own and carry at least two
    /// points. The timestamp is restamped with the server clock so the
    /// throttle cannot be evaded by back-dating.
    pub fn add_stroke(
        &mut self,
        player_id: PlayerId,
        mut stroke: StrokeData,
        now: u64,
    ) -> Result<Outcome, GameError> {
        let room_id = self.room_id_of(player_id)?;
        let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        expect_phase(room, GamePhase::Drawing)?;
        if stroke.player_id != player_id || stroke.points.len() < 2 {
            return Err(GameError::StrokeRejected);
        }
        if room.player(player_id).is_none() {
            return Err(GameError::PlayerNotFound(player_id));
        }
        stroke.timestamp = now;
        let round = room
            .current_round_mut()
            .ok_or(GameError::WrongPhase { expected: GamePhase::Drawing, actual: GamePhase::Lobby })?;

        let recent = round
            .strokes
            .iter()
            .filter(|s| s.player_id == player_id && now.saturating_sub(s.timestamp) < STROKE_WINDOW_MS)
            .count();
        if recent >= STROKE_LIMIT {
            return Err(GameError::Throttled(player_id));
        }

        round
            .mode_data
            .check_stroke(&stroke)
            .map_err(|_| GameError::StrokeRejected)?;

        round.strokes.push(stroke.clone());
        if let Some(p) = room.player_mut(player_id) {
            p.last_activity = now;
        }

        let mut outcome = Outcome::new();
        outcome.event(
            room_id,
            Recipient::AllExcept(player_id),
            GameEvent::StrokeAdded { stroke },
        );
        Ok(outcome)
    }

    /// Records a finished drawing. Relay mode passes the baton instead of
    /// running the all-submitted check, unless the order is exhausted.
    pub fn submit_drawing(
        &mut self,
        player_id: PlayerId,
        snapshot: String,
        now: u64,
    ) -> Result<Outcome, GameError> {
        let room_id = self.room_id_of(player_id)?;
        let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        expect_phase(room, GamePhase::Drawing)?;
        if room.player(player_id).is_none() {
            return Err(GameError::PlayerNotFound(player_id));
        }

        let mut outcome = Outcome::new();
        {
            let round = room
                .current_round_mut()
                .ok_or(GameError::WrongPhase { expected: GamePhase::Drawing, actual: GamePhase::Lobby })?;
            if !round.mode_data.may_submit_drawing(player_id) {
                return Err(GameError::StrokeRejected);
            }
            round.canvas_snapshots.insert(player_id, snapshot);
        }
        if let Some(p) = room.player_mut(player_id) {
            p.has_submitted_drawing = true;
            p.last_activity = now;
        }
        outcome.event(room_id, Recipient::All, GameEvent::DrawingSubmitted { player_id });

        let round_number = room.current_round;
        let advance = room
            .current_round_mut()
            .and_then(|r| r.mode_data.relay_advance(player_id));
        match advance {
            Some(RelayAdvance::NextDrawer(next)) => {
                // The baton holder draws fresh; their flag resets.
                let next_is_bot = match room.player_mut(next) {
                    Some(p) => {
                        p.has_submitted_drawing = false;
                        p.is_bot
                    }
                    None => false,
                };
                outcome.event(
                    room_id,
                    Recipient::All,
                    GameEvent::RelayDrawerChanged { player_id: next },
                );
                if next_is_bot {
                    outcome.effect(Effect::BotDraw { room_id, bot: next, round: round_number });
                }
                return Ok(outcome);
            }
            Some(RelayAdvance::Exhausted) | None => {}
        }

        if room.all_submitted() {
            enter_guessing(room, &mut outcome);
        }
        Ok(outcome)
    }

    // -- Guessing phase -----------------------------------------------------

    /// Records a free-text guess; applies sudden-death elimination; the
    /// all-guessed check can end the round.
    pub fn submit_guess(
        &mut self,
        player_id: PlayerId,
        guess: String,
        now: u64,
    ) -> Result<Outcome, GameError> {
        let room_id = self.room_id_of(player_id)?;
        let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        expect_phase(room, GamePhase::Guessing)?;
        if room.player(player_id).is_none() {
            return Err(GameError::PlayerNotFound(player_id));
        }

        let mut outcome = Outcome::new();
        let eliminated = {
            let round = room
                .current_round_mut()
                .ok_or(GameError::WrongPhase { expected: GamePhase::Guessing, actual: GamePhase::Lobby })?;
            let target = round.target_word.clone();
            round.mode_data.eliminate_if_wrong(player_id, &guess, &target)
        };
        if let Some(p) = room.player_mut(player_id) {
            p.guess = Some(guess);
            p.has_guessed = true;
            p.last_activity = now;
        }
        if eliminated {
            debug!(room_id = %room_id, player = %player_id, "player eliminated");
            outcome.event(room_id, Recipient::All, GameEvent::PlayerEliminated { player_id });
        }
        outcome.event(room_id, Recipient::All, GameEvent::PlayerGuessed { player_id });

        if room.all_guessed() {
            finish_round(room, now, &mut outcome);
        }
        Ok(outcome)
    }

    /// Records a vote (re-votes overwrite). Completion either loops back
    /// to drawing (ping-pong budget remaining) or scores the round.
    pub fn vote_target(
        &mut self,
        voter: PlayerId,
        votee: PlayerId,
        now: u64,
    ) -> Result<Outcome, GameError> {
        let room_id = self.room_id_of(voter)?;
        let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        expect_phase(room, GamePhase::Guessing)?;
        if room.player(votee).is_none() {
            return Err(GameError::PlayerNotFound(votee));
        }
        {
            let round = room
                .current_round_mut()
                .ok_or(GameError::WrongPhase { expected: GamePhase::Guessing, actual: GamePhase::Lobby })?;
            round.votes.insert(voter, votee);
        }
        if let Some(p) = room.player_mut(voter) {
            p.last_activity = now;
        }

        let mut outcome = Outcome::new();
        outcome.event(room_id, Recipient::All, GameEvent::VoteRecorded { player_id: voter });

        let all_voted = room
            .current_round_data()
            .map(|r| r.votes.len() == room.players.len())
            .unwrap_or(false);
        if !all_voted {
            return Ok(outcome);
        }

        let loop_back = room
            .current_round_mut()
            .map(|r| r.mode_data.ping_pong_take_toggle())
            .unwrap_or(false);
        if loop_back {
            for p in &mut room.players {
                p.has_submitted_drawing = false;
                p.has_guessed = false;
                p.guess = None;
            }
            if let Some(round) = room.current_round_mut() {
                round.votes.clear();
            }
            room.phase = GamePhase::Drawing;
            debug!(room_id = %room_id, "ping-pong loop back to drawing");
            outcome.event(
                room_id,
                Recipient::All,
                GameEvent::DrawingResumed { room: room.clone() },
            );
            let round = room.current_round;
            push_bot_draw_effects(room, round, &mut outcome);
        } else {
            finish_round(room, now, &mut outcome);
        }
        Ok(outcome)
    }

    // -- Timed transitions --------------------------------------------------

    /// The round_end advance timer fired. Stale firings (round moved on,
    /// phase changed, room reset) are silent no-ops.
    pub fn advance_after_round_end(
        &mut self,
        room_id: RoomId,
        expected_round: u32,
        now: u64,
    ) -> Result<Outcome, GameError> {
        let finished = {
            let room = self.rooms.get(&room_id).ok_or(GameError::RoomNotFound)?;
            if room.phase != GamePhase::RoundEnd || room.current_round != expected_round {
                return Ok(Outcome::new());
            }
            room.current_round >= room.settings.rounds
        };
        if finished {
            let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
            room.phase = GamePhase::Results;
            info!(room_id = %room_id, "game ended");
            let mut outcome = Outcome::new();
            outcome.event(room_id, Recipient::All, GameEvent::GameEnded { room: room.clone() });
            outcome.effect(Effect::CancelBots { room_id });
            Ok(outcome)
        } else {
            self.start_round(room_id, now)
        }
    }

    /// One tick of the time-bomb clock. Clears and rearms when due; asks
    /// the shell to stop ticking once the room leaves `drawing`.
    pub fn time_bomb_tick(&mut self, room_id: RoomId, now: u64) -> Result<Outcome, GameError> {
        let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        let mut outcome = Outcome::new();
        if room.phase != GamePhase::Drawing {
            outcome.effect(Effect::StopTimeBomb { room_id });
            return Ok(outcome);
        }
        let rng = &mut self.rng;
        if let Some(round) = room.current_round_mut() {
            if round.mode_data.time_bomb_due(now) {
                round.strokes.clear();
                round.mode_data.time_bomb_rearm(now, rng);
                debug!(room_id = %room_id, "time bomb cleared the canvas");
                outcome.event(room_id, Recipient::All, GameEvent::CanvasCleared);
            }
        } else {
            outcome.effect(Effect::StopTimeBomb { room_id });
        }
        Ok(outcome)
    }

    // -- Membership and ancillary -------------------------------------------

    /// Removes a player: host migration to the first remaining player,
    /// full teardown once no humans remain.
    pub fn remove_player(&mut self, player_id: PlayerId, _now: u64) -> Result<Outcome, GameError> {
        let room_id = self
            .player_rooms
            .remove(&player_id)
            .ok_or(GameError::PlayerNotFound(player_id))?;
        let mut outcome = Outcome::new();

        let (was_bot, teardown) = {
            let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
            let was_bot = room.player(player_id).map(|p| p.is_bot).unwrap_or(false);
            room.players.retain(|p| p.id != player_id);
            debug!(room_id = %room_id, player = %player_id, "player left");

            if room.host_id == player_id {
                if let Some(new_host) = room.players.iter_mut().find(|p| !p.is_bot) {
                    new_host.is_host = true;
                    new_host.is_ready = true;
                    room.host_id = new_host.id;
                    let new_host_id = new_host.id;
                    outcome.event(
                        room_id,
                        Recipient::All,
                        GameEvent::HostChanged { room: room.clone(), new_host: new_host_id },
                    );
                }
            }

            let humans_left = room.players.iter().any(|p| !p.is_bot);
            if humans_left {
                outcome.event(
                    room_id,
                    Recipient::All,
                    GameEvent::PlayerLeft { room: room.clone(), player_id },
                );
            }
            (was_bot, !humans_left)
        };

        if was_bot {
            outcome.effect(Effect::CancelBot { room_id, bot: player_id });
        }
        if teardown {
            self.teardown_room(room_id, &mut outcome);
        }
        Ok(outcome)
    }

    fn teardown_room(&mut self, room_id: RoomId, outcome: &mut Outcome) {
        if let Some(room) = self.rooms.remove(&room_id) {
            self.codes.remove(&room.code.0);
            for p in &room.players {
                self.player_rooms.remove(&p.id);
            }
            info!(room_id = %room_id, code = %room.code, "room torn down");
            outcome.effect(Effect::TeardownRoom { room_id });
        }
    }

    /// Activity ping: refreshes the AFK clock and reconnects the player.
    pub fn heartbeat(&mut self, player_id: PlayerId, now: u64) -> Result<Outcome, GameError> {
        let room_id = self.room_id_of(player_id)?;
        let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        if let Some(p) = room.player_mut(player_id) {
            p.last_activity = now;
            p.is_connected = true;
        }
        Ok(Outcome::new())
    }

    /// Sweeps every room, marking silent humans disconnected. Advisory:
    /// a disconnected player still occupies their slot and their round
    /// obligations.
    pub fn check_afk(&mut self, now: u64) -> Outcome {
        let mut outcome = Outcome::new();
        for room in self.rooms.values_mut() {
            let mut changed = false;
            for p in &mut room.players {
                if !p.is_bot
                    && p.is_connected
                    && now.saturating_sub(p.last_activity) > AFK_THRESHOLD_MS
                {
                    p.is_connected = false;
                    changed = true;
                }
            }
            if changed {
                outcome.event(
                    room.id,
                    Recipient::All,
                    GameEvent::RoomUpdated { room: room.clone() },
                );
            }
        }
        outcome
    }

    /// Appends to the room's capped chat log.
    pub fn send_chat(
        &mut self,
        player_id: PlayerId,
        message: String,
        now: u64,
    ) -> Result<Outcome, GameError> {
        let room_id = self.room_id_of(player_id)?;
        let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        let name = room
            .player(player_id)
            .map(|p| p.username.clone())
            .ok_or(GameError::PlayerNotFound(player_id))?;
        let entry = room.chat.push(player_id, &name, message, now);
        if let Some(p) = room.player_mut(player_id) {
            p.last_activity = now;
        }

        let mut outcome = Outcome::new();
        outcome.event(room_id, Recipient::All, GameEvent::ChatMessage { message: entry });
        Ok(outcome)
    }

    // -- Bot context getters (consumed by stale-safe bot tasks) -------------

    /// Mode state for a bot's next stroke, or `None` when the burst is
    /// stale (round moved on, bot gone, baton lost).
    pub fn bot_draw_mode(&self, room_id: RoomId, bot: PlayerId, round: u32) -> Option<ModeData> {
        let room = self.rooms.get(&room_id)?;
        if room.phase != GamePhase::Drawing || room.current_round != round {
            return None;
        }
        if !room.player(bot).map(|p| p.is_bot).unwrap_or(false) {
            return None;
        }
        let data = &room.current_round_data()?.mode_data;
        if let Some(current) = data.current_drawer() {
            if current != bot {
                return None;
            }
        }
        Some(data.clone())
    }

    /// Role and word pair for a bot's guess; `None` when stale, already
    /// guessed, or eliminated.
    pub fn bot_guess_view(
        &self,
        room_id: RoomId,
        bot: PlayerId,
        round: u32,
    ) -> Option<(PlayerRole, String, String)> {
        let room = self.rooms.get(&room_id)?;
        if room.phase != GamePhase::Guessing || room.current_round != round {
            return None;
        }
        let player = room.player(bot)?;
        if !player.is_bot || player.has_guessed {
            return None;
        }
        let data = room.current_round_data()?;
        if data.mode_data.is_eliminated(bot) {
            return None;
        }
        Some((player.role?, data.target_word.clone(), data.decoy_word.clone()))
    }

    /// Eligible vote candidates for a bot: connected, non-bot, non-self.
    /// `None` when stale or the bot already voted.
    pub fn bot_vote_candidates(
        &self,
        room_id: RoomId,
        bot: PlayerId,
        round: u32,
    ) -> Option<Vec<PlayerId>> {
        let room = self.rooms.get(&room_id)?;
        if room.phase != GamePhase::Guessing || room.current_round != round {
            return None;
        }
        if !room.player(bot).map(|p| p.is_bot).unwrap_or(false) {
            return None;
        }
        let data = room.current_round_data()?;
        if data.votes.contains_key(&bot) {
            return None;
        }
        Some(
            room.players
                .iter()
                .filter(|p| p.id != bot && p.is_connected && !p.is_bot)
                .map(|p| p.id)
                .collect(),
        )
    }

    // -- Internals ----------------------------------------------------------

    fn room_id_of(&self, player: PlayerId) -> Result<RoomId, GameError> {
        self.player_rooms
            .get(&player)
            .copied()
            .ok_or(GameError::RoomNotFound)
    }

    fn generate_code(&mut self) -> String {
        loop {
            let code: String = (0..RoomCode::LEN)
                .map(|_| {
                    let idx = self.rng.random_range(0..CODE_CHARSET.len());
                    CODE_CHARSET[idx] as char
                })
                .collect();
            if !self.codes.contains_key(&code) {
                return code;
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Free transition helpers
// ---------------------------------------------------------------------------

fn expect_phase(room: &Room, expected: GamePhase) -> Result<(), GameError> {
    if room.phase == expected {
        Ok(())
    } else {
        Err(GameError::WrongPhase { expected, actual: room.phase })
    }
}

/// Drawing → guessing: ping-pong bookkeeping, bot guess and vote timers.
fn enter_guessing(room: &mut Room, outcome: &mut Outcome) {
    let room_id = room.id;
    if let Some(round) = room.current_round_mut() {
        round.mode_data.note_guessing_entry();
    }
    room.phase = GamePhase::Guessing;
    debug!(room_id = %room_id, "guessing phase started");
    outcome.event(
        room_id,
        Recipient::All,
        GameEvent::GuessingStarted { room: room.clone() },
    );

    let round = room.current_round;
    let eliminated: Vec<PlayerId> = room
        .current_round_data()
        .map(|r| {
            room.players
                .iter()
                .filter(|p| r.mode_data.is_eliminated(p.id))
                .map(|p| p.id)
                .collect()
        })
        .unwrap_or_default();
    for bot in room.bots() {
        if !eliminated.contains(&bot.id) {
            outcome.effect(Effect::BotGuess { room_id, bot: bot.id, round });
        }
        outcome.effect(Effect::BotVote { room_id, bot: bot.id, round });
    }
}

/// Scores the round and freezes it: 100 points per vote received for
/// targets, 150 for deceivers; cumulative scores only ever grow.
fn finish_round(room: &mut Room, now: u64, outcome: &mut Outcome) {
    let room_id = room.id;
    let roles: HashMap<PlayerId, PlayerRole> = room
        .players
        .iter()
        .filter_map(|p| p.role.map(|r| (p.id, r)))
        .collect();

    let Some(round) = room.current_round_mut() else { return };
    if round.results.is_some() {
        return;
    }

    let mut correct_guesses = 0u32;
    let mut deceiver_successes = 0u32;
    for votee in round.votes.values() {
        match roles.get(votee) {
            Some(PlayerRole::Target) => correct_guesses += 1,
            Some(PlayerRole::Deceiver) => deceiver_successes += 1,
            None => {}
        }
    }

    let mut points_awarded: HashMap<PlayerId, u64> = HashMap::new();
    for (&id, &role) in &roles {
        let votes = round.votes_for(id) as u64;
        let points = match role {
            PlayerRole::Target => votes * 100,
            PlayerRole::Deceiver => votes * 150,
        };
        points_awarded.insert(id, points);
    }

    round.results = Some(RoundResults {
        correct_guesses,
        deceiver_successes,
        points_awarded: points_awarded.clone(),
    });
    round.end_time = Some(now);
    let results = round.results.clone();

    for p in &mut room.players {
        if let Some(points) = points_awarded.get(&p.id) {
            p.score += points;
        }
    }
    room.phase = GamePhase::RoundEnd;
    let round_number = room.current_round;
    info!(room_id = %room_id, round = round_number, "round ended");

    if let Some(results) = results {
        outcome.event(
            room_id,
            Recipient::All,
            GameEvent::RoundEnded { room: room.clone(), results },
        );
    }
    if room.settings.game_mode == GameMode::TimeBomb {
        outcome.effect(Effect::StopTimeBomb { room_id });
    }
    outcome.effect(Effect::ArmRoundAdvance {
        room_id,
        round: round_number,
        delay_ms: ROUND_ADVANCE_DELAY_MS,
    });
}

/// Arms drawing bursts for the bots allowed to draw: the baton holder
/// under relay, every bot otherwise.
fn push_bot_draw_effects(room: &Room, round: u32, outcome: &mut Outcome) {
    let room_id = room.id;
    let baton = room.current_round_data().and_then(|r| r.mode_data.current_drawer());
    match baton {
        Some(current) => {
            if room.player(current).map(|p| p.is_bot).unwrap_or(false) {
                outcome.effect(Effect::BotDraw { room_id, bot: current, round });
            }
        }
        None => {
            for bot in room.bots() {
                outcome.effect(Effect::BotDraw { room_id, bot: bot.id, round });
            }
        }
    }
}
