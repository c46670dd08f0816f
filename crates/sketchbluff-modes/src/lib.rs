//! The mode rule engine: per-mode round state and the three hook points.
//!
//! Every game mode plugs into the round lifecycle at exactly three places:
//!
//! 1. **Round init** — [`ModeData::for_round`] populates the mode's state.
//! 2. **Input gating** — [`ModeData::check_stroke`] validates a stroke
//!    before the lifecycle accepts it.
//! 3. **Transition effects** — the `relay_*`, `eliminate_if_wrong`,
//!    `note_guessing_entry` / ping-pong and time-bomb methods mutate mode
//!    state on phase changes.
//!
//! Everything here is pure over the passed-in state; no I/O, no timers.
//! The lifecycle owns when the hooks fire.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use sketchbluff_protocol::{GameMode, PlayerId, StrokeData, Tool};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Canvas dimensions the gating and the bot generator agree on.
pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Fixed visibility radius for fog-of-war.
pub const FOG_RADIUS: f64 = 100.0;

/// Time-bomb clears fire 5–15 seconds apart.
pub const TIME_BOMB_MIN_DELAY_MS: u64 = 5_000;
pub const TIME_BOMB_MAX_DELAY_MS: u64 = 15_000;

/// Ping-pong alternation budget.
pub const MAX_PHASE_TOGGLES: u32 = 4;

/// Near-analogous color sets for camouflage palette, one chosen per round.
const CAMOUFLAGE_SETS: [[&str; 4]; 5] = [
    ["#FF6B6B", "#FF8787", "#FFA5A5", "#FFC2C2"], // reds
    ["#4ECDC4", "#45B7AA", "#3DA99F", "#359B94"], // teals
    ["#FFE66D", "#FFD93D", "#FFCC00", "#F5C400"], // yellows
    ["#95E1D3", "#81D5C5", "#6DC9B7", "#59BDA9"], // mint greens
    ["#A8E6CF", "#8DD9BF", "#72CCAF", "#57BF9F"], // light greens
];

/// The fixed pool of whisper-hint strings; 2–3 are dealt per round.
const HINT_POOL: [&str; 7] = [
    "Look for the most detailed strokes",
    "Pay attention to confidence in the lines",
    "The deceiver may hesitate more",
    "Watch for unusual drawing patterns",
    "Trust your first instinct",
    "Look at the overall composition",
    "The target knows what they're drawing",
];

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// An axis-aligned stencil zone rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

// ---------------------------------------------------------------------------
// ModeData
// ---------------------------------------------------------------------------

/// Why a stroke was refused by the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeViolation {
    /// A point fell outside every allowed stencil zone.
    OutsideStencilZones,
    /// The author is not the current relay drawer.
    NotCurrentDrawer,
}

/// Per-round, per-mode auxiliary state.
///
/// One variant per mode that carries state; modes that are pure view
/// transforms on the client (mirror, echo, shadow, eraser roulette) and
/// the two classic role variants use [`ModeData::None`]. Keeping this a
/// tagged enum means a mode's fields cannot be consulted while another
/// mode is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ModeData {
    #[default]
    None,
    ToolLockout {
        disabled_tools: Vec<Tool>,
    },
    FogOfWar {
        fog_radius: f64,
    },
    StencilZones {
        zones: Vec<Rect>,
    },
    CamouflagePalette {
        colors: Vec<String>,
    },
    TimeBomb {
        /// Epoch-ms deadline of the next canvas clear.
        next_clear_at: u64,
    },
    RelayDraw {
        draw_order: Vec<PlayerId>,
        current_drawer: PlayerId,
    },
    WhisperHints {
        hints: Vec<String>,
    },
    SuddenDeath {
        eliminated: BTreeSet<PlayerId>,
    },
    PingPongGuess {
        toggles: u32,
        max_toggles: u32,
    },
}

/// Outcome of a relay submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayAdvance {
    /// The baton passed; this player draws next.
    NextDrawer(PlayerId),
    /// The order is exhausted; fall through to the all-submitted check.
    Exhausted,
}

impl ModeData {
    /// Round-init hook: builds the mode state for a fresh round.
    ///
    /// `players` is the room's membership in turn order; `now` is epoch ms.
    pub fn for_round<R: Rng + ?Sized>(
        mode: GameMode,
        players: &[PlayerId],
        now: u64,
        rng: &mut R,
    ) -> Self {
        match mode {
            GameMode::ToolLockout => {
                let mut tools = vec![Tool::Pencil, Tool::Brush, Tool::Eraser];
                tools.shuffle(rng);
                let disable_count = if rng.random_bool(0.5) { 1 } else { 2 };
                tools.truncate(disable_count);
                Self::ToolLockout { disabled_tools: tools }
            }
            GameMode::FogOfWar => Self::FogOfWar { fog_radius: FOG_RADIUS },
            GameMode::StencilZones => {
                let zone_count = rng.random_range(3..5);
                let zones = (0..zone_count)
                    .map(|_| Rect {
                        x: rng.random_range(0.0..600.0),
                        y: rng.random_range(0.0..400.0),
                        width: rng.random_range(100.0..200.0),
                        height: rng.random_range(100.0..200.0),
                    })
                    .collect();
                Self::StencilZones { zones }
            }
            GameMode::CamouflagePalette => {
                let set = CAMOUFLAGE_SETS
                    .choose(rng)
                    .map(|s| s.as_slice())
                    .unwrap_or_default();
                let keep = rng.random_range(3..5).min(set.len());
                Self::CamouflagePalette {
                    colors: set[..keep].iter().map(|c| c.to_string()).collect(),
                }
            }
            GameMode::TimeBomb => Self::TimeBomb {
                next_clear_at: now + next_clear_delay(rng),
            },
            GameMode::RelayDraw => {
                let mut order: Vec<PlayerId> = players.to_vec();
                order.shuffle(rng);
                match order.first().copied() {
                    Some(current) => Self::RelayDraw { draw_order: order, current_drawer: current },
                    None => Self::None,
                }
            }
            GameMode::WhisperHints => {
                let mut pool: Vec<&str> = HINT_POOL.to_vec();
                pool.shuffle(rng);
                let count = rng.random_range(2..4);
                Self::WhisperHints {
                    hints: pool[..count].iter().map(|h| h.to_string()).collect(),
                }
            }
            GameMode::SuddenDeath => Self::SuddenDeath { eliminated: BTreeSet::new() },
            GameMode::PingPongGuess => Self::PingPongGuess {
                toggles: 0,
                max_toggles: MAX_PHASE_TOGGLES,
            },
            // No authoritative state: role fan-out and view transforms only.
            GameMode::ClassicDeceiver
            | GameMode::DoubleDeceiver
            | GameMode::MirrorMayhem
            | GameMode::EchoBrush
            | GameMode::EraserRoulette
            | GameMode::ShadowLines => Self::None,
        }
    }

    // -- Input gating -------------------------------------------------------

    /// Validates a stroke against the active mode's input constraints.
    ///
    /// Stencil zones require every point to land inside at least one zone;
    /// relay draw requires the author to hold the baton. All other modes
    /// accept anything (fog/mirror/echo/shadow are view transforms applied
    /// by the consumer, not input constraints).
    pub fn check_stroke(&self, stroke: &StrokeData) -> Result<(), StrokeViolation> {
        match self {
            Self::StencilZones { zones } => {
                let all_inside = stroke
                    .points
                    .iter()
                    .all(|p| zones.iter().any(|z| z.contains(p.x, p.y)));
                if all_inside {
                    Ok(())
                } else {
                    Err(StrokeViolation::OutsideStencilZones)
                }
            }
            Self::RelayDraw { current_drawer, .. } => {
                if *current_drawer == stroke.player_id {
                    Ok(())
                } else {
                    Err(StrokeViolation::NotCurrentDrawer)
                }
            }
            _ => Ok(()),
        }
    }

    /// Relay gate for drawing submissions (same rule as strokes).
    pub fn may_submit_drawing(&self, player: PlayerId) -> bool {
        match self {
            Self::RelayDraw { current_drawer, .. } => *current_drawer == player,
            _ => true,
        }
    }

    // -- Transition side effects -------------------------------------------

    /// Advances the relay baton after `just_submitted` finished their turn.
    ///
    /// Returns `None` for non-relay modes. `Exhausted` means the order is
    /// spent and the lifecycle should run its normal all-submitted check.
    pub fn relay_advance(&mut self, just_submitted: PlayerId) -> Option<RelayAdvance> {
        let Self::RelayDraw { draw_order, current_drawer } = self else {
            return None;
        };
        let idx = draw_order.iter().position(|p| *p == just_submitted)?;
        match draw_order.get(idx + 1) {
            Some(next) => {
                *current_drawer = *next;
                Some(RelayAdvance::NextDrawer(*next))
            }
            None => Some(RelayAdvance::Exhausted),
        }
    }

    /// Sudden-death guess hook: eliminates the guesser when the guess
    /// misses the target word (case- and whitespace-insensitive).
    ///
    /// Returns `true` only when this guess newly eliminates the player,
    /// so repeated wrong guesses announce the elimination once.
    pub fn eliminate_if_wrong(
        &mut self,
        player: PlayerId,
        guess: &str,
        target_word: &str,
    ) -> bool {
        let Self::SuddenDeath { eliminated } = self else {
            return false;
        };
        let correct =
            guess.trim().eq_ignore_ascii_case(target_word.trim());
        !correct && eliminated.insert(player)
    }

    /// Whether a player has been eliminated this round (sudden death only).
    pub fn is_eliminated(&self, player: PlayerId) -> bool {
        match self {
            Self::SuddenDeath { eliminated } => eliminated.contains(&player),
            _ => false,
        }
    }

    /// Guessing-entry hook: ping-pong counts each entry into `guessing`.
    pub fn note_guessing_entry(&mut self) {
        if let Self::PingPongGuess { toggles, .. } = self {
            *toggles += 1;
        }
    }

    /// All-voted hook: `true` when ping-pong still has toggle budget and
    /// the round should loop back to `drawing` instead of scoring.
    /// Consumes one toggle when it loops.
    pub fn ping_pong_take_toggle(&mut self) -> bool {
        if let Self::PingPongGuess { toggles, max_toggles } = self {
            if *toggles < *max_toggles {
                *toggles += 1;
                return true;
            }
        }
        false
    }

    /// Time-bomb tick hook: `true` when the canvas is due for a clear.
    pub fn time_bomb_due(&self, now: u64) -> bool {
        matches!(self, Self::TimeBomb { next_clear_at } if now >= *next_clear_at)
    }

    /// Reschedules the next clear after one fired.
    pub fn time_bomb_rearm<R: Rng + ?Sized>(&mut self, now: u64, rng: &mut R) {
        if let Self::TimeBomb { next_clear_at } = self {
            *next_clear_at = now + next_clear_delay(rng);
        }
    }

    // -- Accessors shared with the bot driver ------------------------------

    /// Tools disabled this round (tool lockout), empty otherwise.
    pub fn disabled_tools(&self) -> &[Tool] {
        match self {
            Self::ToolLockout { disabled_tools } => disabled_tools,
            _ => &[],
        }
    }

    /// The restricted palette (camouflage), empty otherwise.
    pub fn limited_colors(&self) -> &[String] {
        match self {
            Self::CamouflagePalette { colors } => colors,
            _ => &[],
        }
    }

    /// Allowed stencil zones, empty when unrestricted.
    pub fn stencil_zones(&self) -> &[Rect] {
        match self {
            Self::StencilZones { zones } => zones,
            _ => &[],
        }
    }

    /// The relay baton holder, if relay draw is active.
    pub fn current_drawer(&self) -> Option<PlayerId> {
        match self {
            Self::RelayDraw { current_drawer, .. } => Some(*current_drawer),
            _ => None,
        }
    }
}

fn next_clear_delay<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.random_range(TIME_BOMB_MIN_DELAY_MS..TIME_BOMB_MAX_DELAY_MS)
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sketchbluff_protocol::Point;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn players(n: u64) -> Vec<PlayerId> {
        (1..=n).map(PlayerId).collect()
    }

    fn stroke(author: PlayerId, points: &[(f64, f64)]) -> StrokeData {
        StrokeData {
            id: "s".into(),
            player_id: author,
            points: points.iter().map(|&(x, y)| Point { x, y }).collect(),
            color: "#000000".into(),
            width: 2.0,
            tool: Tool::Pencil,
            timestamp: 0,
        }
    }

    #[test]
    fn test_stateless_modes_have_no_data() {
        for mode in [
            GameMode::ClassicDeceiver,
            GameMode::DoubleDeceiver,
            GameMode::MirrorMayhem,
            GameMode::EchoBrush,
            GameMode::EraserRoulette,
            GameMode::ShadowLines,
        ] {
            let data = ModeData::for_round(mode, &players(4), 0, &mut rng(1));
            assert_eq!(data, ModeData::None);
        }
    }

    #[test]
    fn test_tool_lockout_disables_one_or_two_tools() {
        for seed in 0..20 {
            let data =
                ModeData::for_round(GameMode::ToolLockout, &players(4), 0, &mut rng(seed));
            let ModeData::ToolLockout { disabled_tools } = &data else {
                panic!("wrong variant");
            };
            assert!((1..=2).contains(&disabled_tools.len()));
        }
    }

    #[test]
    fn test_fog_of_war_radius_is_fixed() {
        let data = ModeData::for_round(GameMode::FogOfWar, &players(4), 0, &mut rng(3));
        assert_eq!(data, ModeData::FogOfWar { fog_radius: 100.0 });
    }

    #[test]
    fn test_stencil_zones_within_bounds() {
        for seed in 0..20 {
            let data =
                ModeData::for_round(GameMode::StencilZones, &players(4), 0, &mut rng(seed));
            let ModeData::StencilZones { zones } = &data else {
                panic!("wrong variant");
            };
            assert!((3..=4).contains(&zones.len()));
            for z in zones {
                assert!((0.0..600.0).contains(&z.x));
                assert!((0.0..400.0).contains(&z.y));
                assert!((100.0..200.0).contains(&z.width));
                assert!((100.0..200.0).contains(&z.height));
                // Every zone fits on the canvas.
                assert!(z.x + z.width <= CANVAS_WIDTH);
                assert!(z.y + z.height <= CANVAS_HEIGHT);
            }
        }
    }

    #[test]
    fn test_camouflage_palette_draws_from_one_set() {
        for seed in 0..20 {
            let data = ModeData::for_round(
                GameMode::CamouflagePalette,
                &players(4),
                0,
                &mut rng(seed),
            );
            let ModeData::CamouflagePalette { colors } = &data else {
                panic!("wrong variant");
            };
            assert!((3..=4).contains(&colors.len()));
            let from_one_set = CAMOUFLAGE_SETS
                .iter()
                .any(|set| colors.iter().all(|c| set.contains(&c.as_str())));
            assert!(from_one_set);
        }
    }

    #[test]
    fn test_time_bomb_first_clear_window() {
        let now = 1_000_000;
        for seed in 0..20 {
            let data = ModeData::for_round(GameMode::TimeBomb, &players(4), now, &mut rng(seed));
            let ModeData::TimeBomb { next_clear_at } = data else {
                panic!("wrong variant");
            };
            assert!(next_clear_at >= now + TIME_BOMB_MIN_DELAY_MS);
            assert!(next_clear_at < now + TIME_BOMB_MAX_DELAY_MS);
        }
    }

    #[test]
    fn test_relay_order_is_permutation_of_players() {
        let ps = players(5);
        let data = ModeData::for_round(GameMode::RelayDraw, &ps, 0, &mut rng(9));
        let ModeData::RelayDraw { draw_order, current_drawer } = &data else {
            panic!("wrong variant");
        };
        assert_eq!(draw_order.len(), ps.len());
        let mut sorted = draw_order.clone();
        sorted.sort();
        assert_eq!(sorted, ps);
        assert_eq!(*current_drawer, draw_order[0]);
    }

    #[test]
    fn test_whisper_hints_come_from_pool() {
        let data = ModeData::for_round(GameMode::WhisperHints, &players(4), 0, &mut rng(4));
        let ModeData::WhisperHints { hints } = &data else {
            panic!("wrong variant");
        };
        assert!((2..=3).contains(&hints.len()));
        for h in hints {
            assert!(HINT_POOL.contains(&h.as_str()));
        }
    }

    #[test]
    fn test_stencil_gating_rejects_outside_points() {
        let data = ModeData::StencilZones {
            zones: vec![Rect { x: 100.0, y: 100.0, width: 100.0, height: 100.0 }],
        };
        let inside = stroke(PlayerId(1), &[(150.0, 150.0), (180.0, 120.0)]);
        assert_eq!(data.check_stroke(&inside), Ok(()));

        let partly_outside = stroke(PlayerId(1), &[(150.0, 150.0), (500.0, 500.0)]);
        assert_eq!(
            data.check_stroke(&partly_outside),
            Err(StrokeViolation::OutsideStencilZones)
        );
    }

    #[test]
    fn test_relay_gating_rejects_non_current_drawer() {
        let data = ModeData::RelayDraw {
            draw_order: players(3),
            current_drawer: PlayerId(1),
        };
        assert_eq!(data.check_stroke(&stroke(PlayerId(1), &[(0.0, 0.0)])), Ok(()));
        assert_eq!(
            data.check_stroke(&stroke(PlayerId(2), &[(0.0, 0.0)])),
            Err(StrokeViolation::NotCurrentDrawer)
        );
        assert!(data.may_submit_drawing(PlayerId(1)));
        assert!(!data.may_submit_drawing(PlayerId(2)));
    }

    #[test]
    fn test_relay_advance_walks_order_then_exhausts() {
        let mut data = ModeData::RelayDraw {
            draw_order: players(3),
            current_drawer: PlayerId(1),
        };
        assert_eq!(
            data.relay_advance(PlayerId(1)),
            Some(RelayAdvance::NextDrawer(PlayerId(2)))
        );
        assert_eq!(data.current_drawer(), Some(PlayerId(2)));
        assert_eq!(
            data.relay_advance(PlayerId(2)),
            Some(RelayAdvance::NextDrawer(PlayerId(3)))
        );
        assert_eq!(data.relay_advance(PlayerId(3)), Some(RelayAdvance::Exhausted));
    }

    #[test]
    fn test_sudden_death_elimination_fires_once() {
        let mut data = ModeData::SuddenDeath { eliminated: BTreeSet::new() };
        assert!(data.eliminate_if_wrong(PlayerId(1), "WRONG", "ELEPHANT"));
        // Already eliminated: no new elimination to announce.
        assert!(!data.eliminate_if_wrong(PlayerId(1), "ALSO WRONG", "ELEPHANT"));
        let ModeData::SuddenDeath { eliminated } = &data else { unreachable!() };
        assert_eq!(eliminated.len(), 1);
        assert!(data.is_eliminated(PlayerId(1)));
    }

    #[test]
    fn test_sudden_death_compare_ignores_case_and_whitespace() {
        let mut data = ModeData::SuddenDeath { eliminated: BTreeSet::new() };
        assert!(!data.eliminate_if_wrong(PlayerId(1), "  elephant ", "ELEPHANT"));
        assert!(!data.is_eliminated(PlayerId(1)));
    }

    #[test]
    fn test_ping_pong_toggle_budget() {
        let mut data = ModeData::PingPongGuess { toggles: 0, max_toggles: 4 };
        data.note_guessing_entry(); // 1
        assert!(data.ping_pong_take_toggle()); // 2, loops
        data.note_guessing_entry(); // 3
        assert!(data.ping_pong_take_toggle()); // 4, loops
        data.note_guessing_entry(); // 5
        assert!(!data.ping_pong_take_toggle()); // budget spent, score
    }

    #[test]
    fn test_time_bomb_due_and_rearm() {
        let mut data = ModeData::TimeBomb { next_clear_at: 10_000 };
        assert!(!data.time_bomb_due(9_999));
        assert!(data.time_bomb_due(10_000));
        data.time_bomb_rearm(10_000, &mut rng(2));
        let ModeData::TimeBomb { next_clear_at } = data else { unreachable!() };
        assert!(next_clear_at >= 10_000 + TIME_BOMB_MIN_DELAY_MS);
    }

    #[test]
    fn test_mode_data_serializes_with_mode_tag() {
        let data = ModeData::FogOfWar { fog_radius: 100.0 };
        let json: serde_json::Value = serde_json::to_value(&data).unwrap();
        assert_eq!(json["mode"], "fog_of_war");
        assert_eq!(json["fog_radius"], 100.0);
    }
}
