//! The word supplier: a static target/decoy dictionary and a pure lookup.
//!
//! Each entry pairs a drawable target word with two decoys per similarity
//! tier — `easy` decoys are visually distant, `hard` decoys are close
//! enough to make the deceiver's job subtle. The round lifecycle asks for
//! one pair per round via [`pick_word_pair`].

mod table;

use rand::Rng;
use rand::seq::IndexedRandom;
use sketchbluff_protocol::{Difficulty, Language, WordCategory};

pub use table::WORD_TABLE;

/// One dictionary entry. The table is compiled in; there is no runtime
/// loading or persistence.
#[derive(Debug, Clone, Copy)]
pub struct WordEntry {
    pub target: &'static str,
    pub easy: [&'static str; 2],
    pub medium: [&'static str; 2],
    pub hard: [&'static str; 2],
    pub category: WordCategory,
    pub language: Language,
}

impl WordEntry {
    fn decoys(&self, difficulty: Difficulty) -> &[&'static str; 2] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    fn matches(&self, categories: &[WordCategory], language: Language) -> bool {
        categories.contains(&self.category)
            && (language == Language::Both || self.language == language)
    }
}

/// The pair handed to a round: the real word and its decoy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPair {
    pub target: String,
    pub decoy: String,
    pub category: WordCategory,
}

/// Picks a uniform random word pair matching the filters.
///
/// Returns `None` when no entry matches — an empty category selection,
/// or a language with no words in the chosen packs. The caller treats
/// that as fatal to the round start.
pub fn pick_word_pair<R: Rng + ?Sized>(
    categories: &[WordCategory],
    language: Language,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<WordPair> {
    let candidates: Vec<&WordEntry> = WORD_TABLE
        .iter()
        .filter(|e| e.matches(categories, language))
        .collect();
    let entry = candidates.choose(rng)?;
    let decoy = entry.decoys(difficulty).choose(rng)?;
    Some(WordPair {
        target: entry.target.to_string(),
        decoy: decoy.to_string(),
        category: entry.category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_empty_categories_yield_none() {
        let pair = pick_word_pair(&[], Language::English, Difficulty::Easy, &mut rng());
        assert_eq!(pair, None);
    }

    #[test]
    fn test_pick_respects_category_filter() {
        let mut rng = rng();
        for _ in 0..50 {
            let pair = pick_word_pair(
                &[WordCategory::Animals],
                Language::English,
                Difficulty::Medium,
                &mut rng,
            )
            .unwrap();
            assert_eq!(pair.category, WordCategory::Animals);
        }
    }

    #[test]
    fn test_pick_respects_language_filter() {
        // The Swedish animal targets never appear under an English filter.
        let mut rng = rng();
        for _ in 0..50 {
            let pair = pick_word_pair(
                &[WordCategory::Animals],
                Language::Swedish,
                Difficulty::Easy,
                &mut rng,
            )
            .unwrap();
            assert!(
                WORD_TABLE.iter().any(|e| {
                    e.target == pair.target && e.language == Language::Swedish
                }),
                "picked {} which is not a Swedish entry",
                pair.target
            );
        }
    }

    #[test]
    fn test_both_matches_either_language() {
        let all = [
            WordCategory::Animals,
            WordCategory::Objects,
            WordCategory::Food,
            WordCategory::Actions,
            WordCategory::Places,
            WordCategory::Abstract,
        ];
        let pair = pick_word_pair(&all, Language::Both, Difficulty::Hard, &mut rng());
        assert!(pair.is_some());
    }

    #[test]
    fn test_decoy_comes_from_requested_tier() {
        let mut rng = rng();
        for _ in 0..50 {
            let pair = pick_word_pair(
                &[WordCategory::Food],
                Language::English,
                Difficulty::Hard,
                &mut rng,
            )
            .unwrap();
            let entry = WORD_TABLE
                .iter()
                .find(|e| e.target == pair.target && e.language == Language::English)
                .unwrap();
            assert!(entry.hard.contains(&pair.decoy.as_str()));
        }
    }

    #[test]
    fn test_decoy_never_equals_target() {
        let mut rng = rng();
        let all = [
            WordCategory::Animals,
            WordCategory::Objects,
            WordCategory::Food,
            WordCategory::Actions,
            WordCategory::Places,
            WordCategory::Abstract,
        ];
        for _ in 0..200 {
            let pair =
                pick_word_pair(&all, Language::Both, Difficulty::Easy, &mut rng).unwrap();
            assert_ne!(pair.target, pair.decoy);
        }
    }

    #[test]
    fn test_every_category_has_words_in_both_languages() {
        for cat in [
            WordCategory::Animals,
            WordCategory::Objects,
            WordCategory::Food,
            WordCategory::Actions,
            WordCategory::Places,
            WordCategory::Abstract,
        ] {
            for lang in [Language::English, Language::Swedish] {
                assert!(
                    WORD_TABLE
                        .iter()
                        .any(|e| e.category == cat && e.language == lang),
                    "no {lang:?} words in {cat:?}"
                );
            }
        }
    }
}
