//! Per-round state and results.

use std::collections::HashMap;

use serde::Serialize;
use sketchbluff_modes::ModeData;
use sketchbluff_protocol::{PlayerId, StrokeData, WordCategory};

/// Everything that happened in one round. Appended to the room's round
/// history at round start and frozen (via `results`/`end_time`) when the
/// round is scored.
#[derive(Debug, Clone, Serialize)]
pub struct RoundData {
    pub round_number: u32,
    pub target_word: String,
    pub decoy_word: String,
    pub category: WordCategory,
    /// Epoch ms of the round start.
    pub start_time: u64,
    pub end_time: Option<u64>,
    /// Append-only, except the time-bomb clear.
    pub strokes: Vec<StrokeData>,
    /// Opaque base64 snapshots, one per submitter, last write wins.
    pub canvas_snapshots: HashMap<PlayerId, String>,
    /// Voter to votee. One vote per voter; re-votes overwrite.
    pub votes: HashMap<PlayerId, PlayerId>,
    pub results: Option<RoundResults>,
    pub mode_data: ModeData,
}

impl RoundData {
    pub fn new(
        round_number: u32,
        target_word: String,
        decoy_word: String,
        category: WordCategory,
        start_time: u64,
        mode_data: ModeData,
    ) -> Self {
        Self {
            round_number,
            target_word,
            decoy_word,
            category,
            start_time,
            end_time: None,
            strokes: Vec::new(),
            canvas_snapshots: HashMap::new(),
            votes: HashMap::new(),
            results: None,
            mode_data,
        }
    }

    /// Votes currently cast for one player.
    pub fn votes_for(&self, player: PlayerId) -> usize {
        self.votes.values().filter(|&&v| v == player).count()
    }
}

/// The scoring summary frozen at round end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundResults {
    /// Votes that landed on a target player.
    pub correct_guesses: u32,
    /// Votes that landed on a deceiver.
    pub deceiver_successes: u32,
    /// Points each player earned this round (zero entries included).
    pub points_awarded: HashMap<PlayerId, u64>,
}
