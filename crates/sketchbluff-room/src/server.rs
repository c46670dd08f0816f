//! The async shell around the registry.
//!
//! [`GameServer`] holds the registry behind a single tokio mutex and an
//! unbounded event channel the gateway drains. Mutating calls lock,
//! apply the registry operation, then execute the returned effects —
//! sending events, arming or aborting timer tasks, triggering bot
//! actions — before releasing the lock. One logical writer per room at
//! any instant; per-room action ordering is the lock's FIFO.
//!
//! Every spawned timer or bot task re-validates state under the lock
//! when it fires, so cancellation races resolve to silent no-ops.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::trace;

use sketchbluff_bots::BotTimers;
use sketchbluff_protocol::{ClientCommand, PlayerId, RoomId, RoomListEntry, RoomSettings, StrokeData};

use crate::error::GameError;
use crate::event::OutboundEvent;
use crate::registry::{Effect, Outcome, Registry};
use crate::room::Room;
use crate::timers::RoomTimers;

/// Time-bomb deadline granularity.
const TIME_BOMB_TICK_MS: u64 = 1_000;

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

struct State {
    registry: Registry,
    room_timers: HashMap<RoomId, RoomTimers>,
    bot_timers: HashMap<RoomId, BotTimers>,
}

struct Shared {
    state: Mutex<State>,
    events: UnboundedSender<OutboundEvent>,
}

/// Cloneable handle to the whole game core. The paired receiver yields
/// every outbound event; dropping it silently discards future events.
#[derive(Clone)]
pub struct GameServer {
    shared: Arc<Shared>,
}

impl GameServer {
    pub fn new() -> (Self, UnboundedReceiver<OutboundEvent>) {
        Self::from_registry(Registry::new())
    }

    /// Deterministic registry randomness for tests.
    pub fn with_seed(seed: u64) -> (Self, UnboundedReceiver<OutboundEvent>) {
        Self::from_registry(Registry::with_seed(seed))
    }

    fn from_registry(registry: Registry) -> (Self, UnboundedReceiver<OutboundEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let server = Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    registry,
                    room_timers: HashMap::new(),
                    bot_timers: HashMap::new(),
                }),
                events: tx,
            }),
        };
        (server, rx)
    }

    // -- Command entry point ------------------------------------------------

    /// Applies one gateway command for the resolved caller.
    pub async fn apply(&self, player: PlayerId, cmd: ClientCommand) -> Result<(), GameError> {
        match cmd {
            ClientCommand::CreateRoom { username, settings } => {
                self.create_room(player, username, settings).await.map(|_| ())
            }
            ClientCommand::JoinRoom { room_code, username } => {
                self.join_room(player, &room_code, username).await
            }
            ClientCommand::UpdateSettings { settings } => {
                self.update_settings(player, settings).await
            }
            ClientCommand::ToggleReady => self.toggle_ready(player).await,
            ClientCommand::StartGame => self.start_game(player).await,
            ClientCommand::DrawStroke { stroke } => self.add_stroke(player, stroke).await,
            ClientCommand::SubmitDrawing { canvas_snapshot } => {
                self.submit_drawing(player, canvas_snapshot).await
            }
            ClientCommand::SubmitGuess { guess } => self.submit_guess(player, guess).await,
            ClientCommand::VoteTarget { target_player_id } => {
                self.vote_target(player, target_player_id).await
            }
            ClientCommand::ChatMessage { message } => self.send_chat(player, message).await,
            ClientCommand::LeaveRoom => self.leave_room(player).await,
            ClientCommand::Heartbeat => self.heartbeat(player).await,
        }
    }

    // -- Operations ----------------------------------------------------------

    pub async fn create_room(
        &self,
        host: PlayerId,
        username: String,
        settings: RoomSettings,
    ) -> Result<RoomId, GameError> {
        let mut state = self.shared.state.lock().await;
        let (room_id, outcome) = state.registry.create_room(host, username, settings, now_ms())?;
        self.run_effects(&mut state, outcome);
        Ok(room_id)
    }

    pub async fn join_room(
        &self,
        player: PlayerId,
        code: &str,
        username: String,
    ) -> Result<(), GameError> {
        self.run(|reg, now| reg.join_room(player, code, username, now)).await
    }

    pub async fn update_settings(
        &self,
        player: PlayerId,
        settings: RoomSettings,
    ) -> Result<(), GameError> {
        self.run(|reg, now| reg.update_settings(player, settings, now)).await
    }

    pub async fn toggle_ready(&self, player: PlayerId) -> Result<(), GameError> {
        self.run(|reg, _| reg.toggle_ready(player)).await
    }

    pub async fn start_game(&self, player: PlayerId) -> Result<(), GameError> {
        self.run(|reg, now| reg.start_game(player, now)).await
    }

    pub async fn add_stroke(&self, player: PlayerId, stroke: StrokeData) -> Result<(), GameError> {
        self.run(|reg, now| reg.add_stroke(player, stroke, now)).await
    }

    pub async fn submit_drawing(
        &self,
        player: PlayerId,
        snapshot: String,
    ) -> Result<(), GameError> {
        self.run(|reg, now| reg.submit_drawing(player, snapshot, now)).await
    }

    pub async fn submit_guess(&self, player: PlayerId, guess: String) -> Result<(), GameError> {
        self.run(|reg, now| reg.submit_guess(player, guess, now)).await
    }

    pub async fn vote_target(&self, voter: PlayerId, votee: PlayerId) -> Result<(), GameError> {
        self.run(|reg, now| reg.vote_target(voter, votee, now)).await
    }

    pub async fn send_chat(&self, player: PlayerId, message: String) -> Result<(), GameError> {
        self.run(|reg, now| reg.send_chat(player, message, now)).await
    }

    pub async fn leave_room(&self, player: PlayerId) -> Result<(), GameError> {
        self.run(|reg, now| reg.remove_player(player, now)).await
    }

    pub async fn heartbeat(&self, player: PlayerId) -> Result<(), GameError> {
        self.run(|reg, now| reg.heartbeat(player, now)).await
    }

    pub async fn add_bots(&self, room_id: RoomId, count: usize) -> Result<(), GameError> {
        self.run(|reg, now| reg.add_bots(room_id, count, now)).await
    }

    pub async fn remove_bots(&self, room_id: RoomId) -> Result<(), GameError> {
        self.run(|reg, now| reg.remove_bots(room_id, now)).await
    }

    // -- Reads ----------------------------------------------------------------

    pub async fn list_public_rooms(&self) -> Vec<RoomListEntry> {
        let state = self.shared.state.lock().await;
        state.registry.list_public_rooms()
    }

    pub async fn room_snapshot(&self, room_id: RoomId) -> Option<Room> {
        let state = self.shared.state.lock().await;
        state.registry.room(room_id).cloned()
    }

    pub async fn room_snapshot_by_player(&self, player: PlayerId) -> Option<Room> {
        let state = self.shared.state.lock().await;
        state.registry.room_by_player(player).cloned()
    }

    // -- Background work -------------------------------------------------------

    /// Periodic AFK sweep over every room. The caller owns the handle.
    pub fn spawn_afk_sweep(&self, period: Duration) -> JoinHandle<()> {
        let server = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let mut state = server.shared.state.lock().await;
                let outcome = state.registry.check_afk(now_ms());
                server.run_effects(&mut state, outcome);
            }
        })
    }

    // -- Internals --------------------------------------------------------------

    async fn run<F>(&self, op: F) -> Result<(), GameError>
    where
        F: FnOnce(&mut Registry, u64) -> Result<Outcome, GameError>,
    {
        let mut state = self.shared.state.lock().await;
        let outcome = op(&mut state.registry, now_ms())?;
        self.run_effects(&mut state, outcome);
        Ok(())
    }

    /// Sends the events and executes the effects of an accepted
    /// operation. Called under the state lock; spawned tasks only take
    /// the lock later, when they fire.
    fn run_effects(&self, state: &mut State, outcome: Outcome) {
        for event in outcome.events {
            let _ = self.shared.events.send(event);
        }
        for effect in outcome.effects {
            match effect {
                Effect::ArmRoundAdvance { room_id, round, delay_ms } => {
                    trace!(room_id = %room_id, round, "arming round advance");
                    let server = self.clone();
                    let handle = tokio::spawn(async move {
                        sleep(Duration::from_millis(delay_ms)).await;
                        let mut state = server.shared.state.lock().await;
                        if let Ok(outcome) =
                            state.registry.advance_after_round_end(room_id, round, now_ms())
                        {
                            server.run_effects(&mut state, outcome);
                        }
                    });
                    state.room_timers.entry(room_id).or_default().set_advance(handle);
                }
                Effect::ArmTimeBomb { room_id, round: _ } => {
                    trace!(room_id = %room_id, "arming time bomb");
                    let server = self.clone();
                    let handle = tokio::spawn(async move {
                        loop {
                            sleep(Duration::from_millis(TIME_BOMB_TICK_MS)).await;
                            let mut state = server.shared.state.lock().await;
                            match state.registry.time_bomb_tick(room_id, now_ms()) {
                                Ok(outcome) => {
                                    let stop = outcome
                                        .effects
                                        .iter()
                                        .any(|e| matches!(e, Effect::StopTimeBomb { .. }));
                                    server.run_effects(&mut state, outcome);
                                    if stop {
                                        break;
                                    }
                                }
                                Err(_) => break,
                            }
                        }
                    });
                    state.room_timers.entry(room_id).or_default().set_time_bomb(handle);
                }
                Effect::StopTimeBomb { room_id } => {
                    if let Some(timers) = state.room_timers.get_mut(&room_id) {
                        timers.release_time_bomb();
                    }
                }
                Effect::TeardownRoom { room_id } => {
                    trace!(room_id = %room_id, "tearing down timers");
                    state.room_timers.remove(&room_id);
                    state.bot_timers.remove(&room_id);
                }
                Effect::CancelBots { room_id } => {
                    if let Some(timers) = state.bot_timers.get_mut(&room_id) {
                        timers.cancel_all();
                    }
                }
                Effect::CancelBot { room_id, bot } => {
                    if let Some(timers) = state.bot_timers.get_mut(&room_id) {
                        timers.cancel_bot(bot);
                    }
                }
                Effect::BotDraw { room_id, bot, round } => {
                    let handle = self.spawn_bot_draw(room_id, bot, round);
                    state.bot_timers.entry(room_id).or_default().set_draw(bot, handle);
                }
                Effect::BotGuess { room_id, bot, round } => {
                    let handle = self.spawn_bot_guess(room_id, bot, round);
                    state.bot_timers.entry(room_id).or_default().set_guess(bot, handle);
                }
                Effect::BotVote { room_id, bot, round } => {
                    let handle = self.spawn_bot_vote(room_id, bot, round);
                    state.bot_timers.entry(room_id).or_default().set_vote(bot, handle);
                }
            }
        }
    }

    fn spawn_bot_draw(&self, room_id: RoomId, bot: PlayerId, round: u32) -> JoinHandle<()> {
        let server = self.clone();
        tokio::spawn(async move {
            let mut rng = StdRng::from_os_rng();
            let plan = sketchbluff_bots::plan_burst(&mut rng);
            for _ in 0..plan.strokes {
                sleep(Duration::from_millis(plan.interval_ms)).await;
                let mut state = server.shared.state.lock().await;
                let Some(mode) = state.registry.bot_draw_mode(room_id, bot, round) else {
                    return;
                };
                let stroke = sketchbluff_bots::generate_stroke(bot, &mode, now_ms(), &mut rng);
                if let Ok(outcome) = state.registry.add_stroke(bot, stroke, now_ms()) {
                    server.run_effects(&mut state, outcome);
                }
            }
            sleep(Duration::from_millis(sketchbluff_bots::SUBMIT_PAUSE_MS)).await;
            let mut state = server.shared.state.lock().await;
            if state.registry.bot_draw_mode(room_id, bot, round).is_none() {
                return;
            }
            let snapshot = sketchbluff_bots::PLACEHOLDER_SNAPSHOT.to_string();
            if let Ok(outcome) = state.registry.submit_drawing(bot, snapshot, now_ms()) {
                server.run_effects(&mut state, outcome);
            }
        })
    }

    fn spawn_bot_guess(&self, room_id: RoomId, bot: PlayerId, round: u32) -> JoinHandle<()> {
        let server = self.clone();
        tokio::spawn(async move {
            let mut rng = StdRng::from_os_rng();
            let delay = sketchbluff_bots::guess_delay_ms(&mut rng);
            sleep(Duration::from_millis(delay)).await;
            let mut state = server.shared.state.lock().await;
            let Some((role, target, decoy)) = state.registry.bot_guess_view(room_id, bot, round)
            else {
                return;
            };
            let guess = sketchbluff_bots::choose_guess(role, &target, &decoy, &mut rng);
            if let Ok(outcome) = state.registry.submit_guess(bot, guess, now_ms()) {
                server.run_effects(&mut state, outcome);
            }
        })
    }

    fn spawn_bot_vote(&self, room_id: RoomId, bot: PlayerId, round: u32) -> JoinHandle<()> {
        let server = self.clone();
        tokio::spawn(async move {
            let mut rng = StdRng::from_os_rng();
            let delay = sketchbluff_bots::vote_delay_ms(&mut rng);
            sleep(Duration::from_millis(delay)).await;
            let mut state = server.shared.state.lock().await;
            let Some(candidates) = state.registry.bot_vote_candidates(room_id, bot, round) else {
                return;
            };
            let Some(choice) = sketchbluff_bots::choose_vote(&candidates, &mut rng) else {
                return;
            };
            if let Ok(outcome) = state.registry.vote_target(bot, choice, now_ms()) {
                server.run_effects(&mut state, outcome);
            }
        })
    }
}
