//! Room settings and their validation bounds.

use serde::{Deserialize, Serialize};

use crate::{Difficulty, GameMode, Language, WordCategory};

/// Host-chosen configuration for a room.
///
/// Validated at the gateway boundary before reaching the registry;
/// [`RoomSettings::validate`] is the single source of the bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSettings {
    pub max_players: usize,
    pub rounds: u32,
    /// Seconds per round overall.
    pub round_time: u32,
    /// Seconds of the drawing phase.
    pub drawing_time: u32,
    pub decoy_similarity: Difficulty,
    /// Selected word-pack categories. Must be non-empty for a round to
    /// start, but an empty selection is legal in the lobby.
    pub word_packs: Vec<WordCategory>,
    pub language: Language,
    pub is_public: bool,
    pub game_mode: GameMode,
    #[serde(default)]
    pub bots_enabled: bool,
    #[serde(default)]
    pub bot_count: usize,
}

/// A settings field outside its allowed range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("max_players must be between {min} and {max}, got {got}")]
    MaxPlayers { min: usize, max: usize, got: usize },

    #[error("rounds must be between {min} and {max}, got {got}")]
    Rounds { min: u32, max: u32, got: u32 },

    #[error("round_time must be between {min} and {max} seconds, got {got}")]
    RoundTime { min: u32, max: u32, got: u32 },

    #[error("drawing_time must be between {min} and {max} seconds, got {got}")]
    DrawingTime { min: u32, max: u32, got: u32 },

    #[error("bot_count {got} exceeds limit {max}")]
    BotCount { max: usize, got: usize },
}

impl RoomSettings {
    pub const MIN_PLAYERS: usize = 4;
    pub const MAX_PLAYERS: usize = 12;
    pub const MIN_ROUNDS: u32 = 3;
    pub const MAX_ROUNDS: u32 = 10;
    pub const MIN_ROUND_TIME: u32 = 30;
    pub const MAX_ROUND_TIME: u32 = 180;
    pub const MIN_DRAWING_TIME: u32 = 15;
    pub const MAX_DRAWING_TIME: u32 = 120;
    pub const MAX_BOTS: usize = 8;

    /// Checks every bound. Bot count is capped both by the absolute limit
    /// and by `max_players - 1` (the host's slot is never a bot's).
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(Self::MIN_PLAYERS..=Self::MAX_PLAYERS).contains(&self.max_players) {
            return Err(SettingsError::MaxPlayers {
                min: Self::MIN_PLAYERS,
                max: Self::MAX_PLAYERS,
                got: self.max_players,
            });
        }
        if !(Self::MIN_ROUNDS..=Self::MAX_ROUNDS).contains(&self.rounds) {
            return Err(SettingsError::Rounds {
                min: Self::MIN_ROUNDS,
                max: Self::MAX_ROUNDS,
                got: self.rounds,
            });
        }
        if !(Self::MIN_ROUND_TIME..=Self::MAX_ROUND_TIME).contains(&self.round_time) {
            return Err(SettingsError::RoundTime {
                min: Self::MIN_ROUND_TIME,
                max: Self::MAX_ROUND_TIME,
                got: self.round_time,
            });
        }
        if !(Self::MIN_DRAWING_TIME..=Self::MAX_DRAWING_TIME).contains(&self.drawing_time) {
            return Err(SettingsError::DrawingTime {
                min: Self::MIN_DRAWING_TIME,
                max: Self::MAX_DRAWING_TIME,
                got: self.drawing_time,
            });
        }
        let bot_limit = Self::MAX_BOTS.min(self.max_players - 1);
        if self.bot_count > bot_limit {
            return Err(SettingsError::BotCount {
                max: bot_limit,
                got: self.bot_count,
            });
        }
        Ok(())
    }
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            max_players: 8,
            rounds: 3,
            round_time: 90,
            drawing_time: 60,
            decoy_similarity: Difficulty::Medium,
            word_packs: vec![WordCategory::Animals, WordCategory::Objects, WordCategory::Food],
            language: Language::English,
            is_public: true,
            game_mode: GameMode::ClassicDeceiver,
            bots_enabled: false,
            bot_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert_eq!(RoomSettings::default().validate(), Ok(()));
    }

    #[test]
    fn test_max_players_bounds() {
        let mut s = RoomSettings::default();
        s.max_players = 3;
        assert!(matches!(s.validate(), Err(SettingsError::MaxPlayers { .. })));
        s.max_players = 13;
        assert!(matches!(s.validate(), Err(SettingsError::MaxPlayers { .. })));
        s.max_players = 4;
        assert_eq!(s.validate(), Ok(()));
    }

    #[test]
    fn test_rounds_bounds() {
        let mut s = RoomSettings::default();
        s.rounds = 2;
        assert!(matches!(s.validate(), Err(SettingsError::Rounds { .. })));
        s.rounds = 10;
        assert_eq!(s.validate(), Ok(()));
    }

    #[test]
    fn test_bot_count_capped_by_max_players() {
        let mut s = RoomSettings::default();
        s.max_players = 4;
        s.bots_enabled = true;
        s.bot_count = 4; // limit is min(8, 4 - 1) = 3
        assert!(matches!(s.validate(), Err(SettingsError::BotCount { .. })));
        s.bot_count = 3;
        assert_eq!(s.validate(), Ok(()));
    }

    #[test]
    fn test_bot_count_absolute_cap() {
        let mut s = RoomSettings::default();
        s.max_players = 12;
        s.bot_count = 9; // limit is min(8, 11) = 8
        assert!(matches!(s.validate(), Err(SettingsError::BotCount { .. })));
    }

    #[test]
    fn test_bot_fields_default_when_missing() {
        // Older clients omit the bot fields entirely.
        let json = r#"{
            "max_players": 8, "rounds": 3, "round_time": 90,
            "drawing_time": 60, "decoy_similarity": "medium",
            "word_packs": ["animals"], "language": "english",
            "is_public": true, "game_mode": "classic_deceiver"
        }"#;
        let s: RoomSettings = serde_json::from_str(json).unwrap();
        assert!(!s.bots_enabled);
        assert_eq!(s.bot_count, 0);
    }
}
