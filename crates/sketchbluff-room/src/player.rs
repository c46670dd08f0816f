//! Player entity and avatar generation.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use sketchbluff_protocol::{PlayerId, PlayerRole};

/// Avatar background palette; one color picked per player at creation.
const AVATAR_COLORS: [&str; 10] = [
    "#6C5CE7", "#A29BFE", "#00CEC9", "#81ECEC", "#FDCB6E",
    "#FF7675", "#FD79A8", "#00B894", "#55EFC4", "#74B9FF",
];

/// Name pool for generated bots.
const BOT_NAMES: [&str; 8] = [
    "Pixel", "Sketch", "Doodle", "Canvas", "Brush", "Ink", "Shade", "Line",
];

/// A room member, human or bot.
///
/// Bots and humans flow through the same lifecycle operations; `is_bot`
/// is consulted only when deciding whether the synthetic driver should
/// self-generate actions for the player.
///
/// The `role`/`assigned_word`/`has_submitted_drawing`/`guess`/`has_guessed`
/// fields are per-round transients: reset at every round start and
/// meaningless outside `drawing`/`guessing`/`round_end`.
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub username: String,
    pub avatar_initials: String,
    pub avatar_color: String,
    pub is_host: bool,
    pub is_ready: bool,
    pub is_connected: bool,
    pub is_bot: bool,
    /// Epoch ms of the last activity ping; drives the AFK check.
    pub last_activity: u64,
    /// Cumulative score, monotonically non-decreasing.
    pub score: u64,
    pub role: Option<PlayerRole>,
    pub assigned_word: Option<String>,
    pub has_submitted_drawing: bool,
    pub guess: Option<String>,
    pub has_guessed: bool,
}

impl Player {
    /// Creates a human player. Hosts are implicitly ready.
    pub fn human<R: Rng + ?Sized>(
        id: PlayerId,
        username: String,
        is_host: bool,
        now: u64,
        rng: &mut R,
    ) -> Self {
        let avatar_initials = initials(&username);
        Self {
            id,
            username,
            avatar_initials,
            avatar_color: random_color(rng),
            is_host,
            is_ready: is_host,
            is_connected: true,
            is_bot: false,
            last_activity: now,
            score: 0,
            role: None,
            assigned_word: None,
            has_submitted_drawing: false,
            guess: None,
            has_guessed: false,
        }
    }

    /// Creates a bot. Bots are always ready and never host.
    pub fn bot<R: Rng + ?Sized>(id: PlayerId, index: usize, now: u64, rng: &mut R) -> Self {
        let name = BOT_NAMES.choose(rng).copied().unwrap_or("Pixel");
        Self {
            id,
            username: format!("Bot {}-{}", name, index + 1),
            avatar_initials: name.chars().take(2).collect::<String>().to_uppercase(),
            avatar_color: random_color(rng),
            is_host: false,
            is_ready: true,
            is_connected: true,
            is_bot: true,
            last_activity: now,
            score: 0,
            role: None,
            assigned_word: None,
            has_submitted_drawing: false,
            guess: None,
            has_guessed: false,
        }
    }

    /// Clears the per-round transients at round start.
    pub fn reset_round_state(&mut self) {
        self.role = None;
        self.assigned_word = None;
        self.has_submitted_drawing = false;
        self.guess = None;
        self.has_guessed = false;
    }
}

/// First letters of the first and last word of the username; two leading
/// characters for single-word names.
fn initials(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.as_slice() {
        [] => String::new(),
        [only] => only.chars().take(2).collect::<String>().to_uppercase(),
        [first, .., last] => {
            let mut s = String::new();
            s.extend(first.chars().next());
            s.extend(last.chars().next());
            s.to_uppercase()
        }
    }
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    AVATAR_COLORS.choose(rng).copied().unwrap_or("#6C5CE7").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_initials_single_word() {
        assert_eq!(initials("maja"), "MA");
    }

    #[test]
    fn test_initials_two_words() {
        assert_eq!(initials("Ada Lovelace"), "AL");
    }

    #[test]
    fn test_initials_many_words_uses_first_and_last() {
        assert_eq!(initials("jean luc picard"), "JP");
    }

    #[test]
    fn test_host_is_implicitly_ready() {
        let mut rng = StdRng::seed_from_u64(1);
        let host = Player::human(PlayerId(1), "host".into(), true, 0, &mut rng);
        assert!(host.is_ready);
        let guest = Player::human(PlayerId(2), "guest".into(), false, 0, &mut rng);
        assert!(!guest.is_ready);
    }

    #[test]
    fn test_bot_is_ready_and_flagged() {
        let mut rng = StdRng::seed_from_u64(1);
        let bot = Player::bot(PlayerId(9), 0, 0, &mut rng);
        assert!(bot.is_bot);
        assert!(bot.is_ready);
        assert!(!bot.is_host);
        assert!(bot.username.starts_with("Bot "));
        assert!(bot.username.ends_with("-1"));
    }

    #[test]
    fn test_reset_round_state_clears_transients() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = Player::human(PlayerId(1), "x".into(), false, 0, &mut rng);
        p.role = Some(PlayerRole::Deceiver);
        p.assigned_word = Some("HIPPO".into());
        p.has_submitted_drawing = true;
        p.guess = Some("ELEPHANT".into());
        p.has_guessed = true;
        p.score = 300;

        p.reset_round_state();
        assert_eq!(p.role, None);
        assert_eq!(p.assigned_word, None);
        assert!(!p.has_submitted_drawing);
        assert_eq!(p.guess, None);
        assert!(!p.has_guessed);
        // Score survives round resets.
        assert_eq!(p.score, 300);
    }
}
