//! Synthetic player driver: the pure half of bot behavior.
//!
//! Everything here is a generator — given the active mode state and an
//! rng, produce a stroke, a guess, a vote, or a timing plan. The async
//! wiring (who arms which timer, how stale timers detect the round moved
//! on) lives with the lifecycle; keeping the generators pure makes every
//! behavioral range testable without a runtime.
//!
//! Bots act through the same lifecycle operations as humans. The
//! generators honor the active mode's constraints (stencil zones, tool
//! lockout, camouflage palette, relay baton) so a bot's action is
//! accepted by the same gating a human's would be.

mod timers;

use rand::Rng;
use rand::seq::IndexedRandom;
use sketchbluff_modes::{CANVAS_HEIGHT, CANVAS_WIDTH, ModeData, Rect};
use sketchbluff_protocol::{PlayerId, PlayerRole, Point, StrokeData, Tool};

pub use timers::BotTimers;

// ---------------------------------------------------------------------------
// Timing ranges
// ---------------------------------------------------------------------------

/// A drawing burst spans 3–8 seconds…
pub const DRAW_BURST_MIN_MS: u64 = 3_000;
pub const DRAW_BURST_MAX_MS: u64 = 8_000;
/// …split into 4–11 strokes.
pub const BURST_MIN_STROKES: usize = 4;
pub const BURST_MAX_STROKES: usize = 11;
/// Pause between the last stroke and the snapshot submission.
pub const SUBMIT_PAUSE_MS: u64 = 500;
/// Guess delay range.
pub const GUESS_DELAY_MIN_MS: u64 = 1_000;
pub const GUESS_DELAY_MAX_MS: u64 = 5_000;
/// Vote delay range.
pub const VOTE_DELAY_MIN_MS: u64 = 1_000;
pub const VOTE_DELAY_MAX_MS: u64 = 4_000;

/// Probability a bot guesses its own assigned word rather than the other
/// one. Conditioning on role yields realistic label noise without any
/// visual analysis.
pub const OWN_WORD_PROBABILITY: f64 = 0.75;

/// Fixed 1x1 transparent PNG submitted as every bot's canvas snapshot.
pub const PLACEHOLDER_SNAPSHOT: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Default stroke palette when no mode restricts colors.
const DEFAULT_COLORS: [&str; 6] = [
    "#000000", "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF",
];

/// How a single drawing burst is paced: `strokes` strokes, one every
/// `interval_ms` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstPlan {
    pub strokes: usize,
    pub interval_ms: u64,
}

/// Rolls the pacing for one drawing burst.
pub fn plan_burst<R: Rng + ?Sized>(rng: &mut R) -> BurstPlan {
    let total_ms = rng.random_range(DRAW_BURST_MIN_MS..DRAW_BURST_MAX_MS);
    let strokes = rng.random_range(BURST_MIN_STROKES..=BURST_MAX_STROKES);
    BurstPlan { strokes, interval_ms: total_ms / strokes as u64 }
}

pub fn guess_delay_ms<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.random_range(GUESS_DELAY_MIN_MS..GUESS_DELAY_MAX_MS)
}

pub fn vote_delay_ms<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.random_range(VOTE_DELAY_MIN_MS..VOTE_DELAY_MAX_MS)
}

// ---------------------------------------------------------------------------
// Stroke generation
// ---------------------------------------------------------------------------

/// Generates one bot stroke respecting the active mode's constraints.
///
/// Stencil zones confine the pattern to one random zone (squiggles and
/// lines only; circles would spill). Tool lockout filters the pencil/brush
/// pool; camouflage palette replaces the default colors.
pub fn generate_stroke<R: Rng + ?Sized>(
    bot: PlayerId,
    mode: &ModeData,
    now: u64,
    rng: &mut R,
) -> StrokeData {
    let zones = mode.stencil_zones();
    let points = if let Some(zone) = zones.choose(rng) {
        let start_x = zone.x + rng.random_range(0.0..zone.width);
        let start_y = zone.y + rng.random_range(0.0..zone.height);
        if rng.random_range(0..3) == 0 {
            squiggle(start_x, start_y, Some(*zone), rng)
        } else {
            line(start_x, start_y, Some(*zone), rng)
        }
    } else {
        let start_x = rng.random_range(0.0..CANVAS_WIDTH);
        let start_y = rng.random_range(0.0..CANVAS_HEIGHT);
        match rng.random_range(0..3) {
            0 => squiggle(start_x, start_y, None, rng),
            1 => circle(start_x, start_y, rng),
            _ => line(start_x, start_y, None, rng),
        }
    };

    let pool: Vec<Tool> = [Tool::Pencil, Tool::Brush]
        .into_iter()
        .filter(|t| !mode.disabled_tools().contains(t))
        .collect();
    let tool = pool.choose(rng).copied().unwrap_or(Tool::Pencil);

    let limited = mode.limited_colors();
    let color = if limited.is_empty() {
        DEFAULT_COLORS.choose(rng).copied().unwrap_or("#000000").to_string()
    } else {
        limited.choose(rng).cloned().unwrap_or_else(|| "#000000".to_string())
    };

    StrokeData {
        id: format!("bot-{}-{}", bot.0, rng.random_range(0..u32::MAX)),
        player_id: bot,
        points,
        color,
        width: rng.random_range(2.0..5.0),
        tool,
        timestamp: now,
    }
}

/// Random walk of 10–24 points with ±15 px steps, clamped to the zone or
/// the canvas.
fn squiggle<R: Rng + ?Sized>(
    start_x: f64,
    start_y: f64,
    zone: Option<Rect>,
    rng: &mut R,
) -> Vec<Point> {
    let steps = rng.random_range(10..25);
    let mut points = Vec::with_capacity(steps);
    let mut x = start_x;
    let mut y = start_y;
    for _ in 0..steps {
        points.push(Point { x, y });
        x += rng.random_range(-15.0..15.0);
        y += rng.random_range(-15.0..15.0);
        match zone {
            Some(z) => {
                x = x.clamp(z.x, z.x + z.width);
                y = y.clamp(z.y, z.y + z.height);
            }
            None => {
                x = x.clamp(0.0, CANVAS_WIDTH);
                y = y.clamp(0.0, CANVAS_HEIGHT);
            }
        }
    }
    points
}

/// 30-segment circle, radius 20–70.
fn circle<R: Rng + ?Sized>(center_x: f64, center_y: f64, rng: &mut R) -> Vec<Point> {
    let radius = rng.random_range(20.0..70.0);
    let steps = 30;
    (0..=steps)
        .map(|i| {
            let angle = (i as f64 / steps as f64) * std::f64::consts::TAU;
            Point {
                x: center_x + angle.cos() * radius,
                y: center_y + angle.sin() * radius,
            }
        })
        .collect()
}

/// 20-segment straight line to a random end point.
fn line<R: Rng + ?Sized>(
    start_x: f64,
    start_y: f64,
    zone: Option<Rect>,
    rng: &mut R,
) -> Vec<Point> {
    let (end_x, end_y) = match zone {
        Some(z) => (
            z.x + rng.random_range(0.0..z.width),
            z.y + rng.random_range(0.0..z.height),
        ),
        None => (
            rng.random_range(0.0..CANVAS_WIDTH),
            rng.random_range(0.0..CANVAS_HEIGHT),
        ),
    };
    let steps = 20;
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            Point {
                x: start_x + (end_x - start_x) * t,
                y: start_y + (end_y - start_y) * t,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Guessing and voting
// ---------------------------------------------------------------------------

/// Picks the bot's guess: its own assigned word with 75% probability, the
/// other word otherwise.
pub fn choose_guess<R: Rng + ?Sized>(
    role: PlayerRole,
    target_word: &str,
    decoy_word: &str,
    rng: &mut R,
) -> String {
    let own_word = rng.random_bool(OWN_WORD_PROBABILITY);
    let pick = match (role, own_word) {
        (PlayerRole::Target, true) | (PlayerRole::Deceiver, false) => target_word,
        (PlayerRole::Target, false) | (PlayerRole::Deceiver, true) => decoy_word,
    };
    pick.to_string()
}

/// Picks a uniform random vote from the eligible candidates, or `None` to
/// abstain. The caller filters candidates to connected, non-bot,
/// non-self players.
pub fn choose_vote<R: Rng + ?Sized>(candidates: &[PlayerId], rng: &mut R) -> Option<PlayerId> {
    candidates.choose(rng).copied()
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sketchbluff_protocol::GameMode;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_burst_plan_ranges() {
        for seed in 0..50 {
            let plan = plan_burst(&mut rng(seed));
            assert!((BURST_MIN_STROKES..=BURST_MAX_STROKES).contains(&plan.strokes));
            let total = plan.interval_ms * plan.strokes as u64;
            assert!(total < DRAW_BURST_MAX_MS);
        }
    }

    #[test]
    fn test_delay_ranges() {
        for seed in 0..50 {
            let g = guess_delay_ms(&mut rng(seed));
            assert!((GUESS_DELAY_MIN_MS..GUESS_DELAY_MAX_MS).contains(&g));
            let v = vote_delay_ms(&mut rng(seed));
            assert!((VOTE_DELAY_MIN_MS..VOTE_DELAY_MAX_MS).contains(&v));
        }
    }

    #[test]
    fn test_stroke_stays_on_canvas() {
        for seed in 0..30 {
            let stroke = generate_stroke(PlayerId(1), &ModeData::None, 0, &mut rng(seed));
            assert!(stroke.points.len() >= 2);
            for p in &stroke.points {
                assert!((0.0..=CANVAS_WIDTH).contains(&p.x));
                assert!((0.0..=CANVAS_HEIGHT).contains(&p.y));
            }
            assert!((2.0..5.0).contains(&stroke.width));
            assert!(matches!(stroke.tool, Tool::Pencil | Tool::Brush));
        }
    }

    #[test]
    fn test_stencil_stroke_confined_to_a_zone() {
        let zone = Rect { x: 200.0, y: 150.0, width: 120.0, height: 110.0 };
        let mode = ModeData::StencilZones { zones: vec![zone] };
        for seed in 0..30 {
            let stroke = generate_stroke(PlayerId(1), &mode, 0, &mut rng(seed));
            for p in &stroke.points {
                assert!(zone.contains(p.x, p.y), "point ({}, {}) escaped", p.x, p.y);
            }
            assert_eq!(mode.check_stroke(&stroke), Ok(()));
        }
    }

    #[test]
    fn test_tool_lockout_respected() {
        let mode = ModeData::ToolLockout { disabled_tools: vec![Tool::Brush] };
        for seed in 0..30 {
            let stroke = generate_stroke(PlayerId(1), &mode, 0, &mut rng(seed));
            assert_eq!(stroke.tool, Tool::Pencil);
        }
    }

    #[test]
    fn test_both_drawing_tools_disabled_falls_back_to_pencil() {
        let mode = ModeData::ToolLockout { disabled_tools: vec![Tool::Pencil, Tool::Brush] };
        let stroke = generate_stroke(PlayerId(1), &mode, 0, &mut rng(1));
        assert_eq!(stroke.tool, Tool::Pencil);
    }

    #[test]
    fn test_camouflage_palette_respected() {
        let colors = vec!["#FF6B6B".to_string(), "#FF8787".to_string()];
        let mode = ModeData::CamouflagePalette { colors: colors.clone() };
        for seed in 0..30 {
            let stroke = generate_stroke(PlayerId(1), &mode, 0, &mut rng(seed));
            assert!(colors.contains(&stroke.color));
        }
    }

    #[test]
    fn test_guess_is_biased_toward_own_word() {
        let mut rng = rng(11);
        let mut own = 0;
        let n = 1_000;
        for _ in 0..n {
            let g = choose_guess(PlayerRole::Target, "ELEPHANT", "HIPPO", &mut rng);
            if g == "ELEPHANT" {
                own += 1;
            }
        }
        // 75% +/- generous slack for a seeded run.
        assert!((650..=850).contains(&own), "own-word count {own}");
    }

    #[test]
    fn test_deceiver_guesses_decoy_most_of_the_time() {
        let mut rng = rng(12);
        let mut decoy = 0;
        for _ in 0..1_000 {
            let g = choose_guess(PlayerRole::Deceiver, "ELEPHANT", "HIPPO", &mut rng);
            if g == "HIPPO" {
                decoy += 1;
            }
        }
        assert!((650..=850).contains(&decoy), "decoy count {decoy}");
    }

    #[test]
    fn test_vote_abstains_with_no_candidates() {
        assert_eq!(choose_vote(&[], &mut rng(1)), None);
    }

    #[test]
    fn test_vote_picks_from_candidates() {
        let candidates = [PlayerId(2), PlayerId(5)];
        for seed in 0..20 {
            let v = choose_vote(&candidates, &mut rng(seed)).unwrap();
            assert!(candidates.contains(&v));
        }
    }

    #[test]
    fn test_generated_stroke_passes_its_own_gating() {
        // A freshly generated stroke must be acceptable to the same mode
        // that constrained it, for every stateful mode.
        let players = [PlayerId(1)];
        for mode in [GameMode::StencilZones, GameMode::ToolLockout, GameMode::CamouflagePalette] {
            let data = ModeData::for_round(mode, &players, 0, &mut rng(3));
            let stroke = generate_stroke(PlayerId(1), &data, 0, &mut rng(4));
            assert_eq!(data.check_stroke(&stroke), Ok(()));
        }
    }
}
