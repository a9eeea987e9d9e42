//! Candidate scoring and selection
//!
//! Surviving candidates are ranked by a small additive score: containing
//! the exact phrase dominates, then source quality (paid > community >
//! dictionary), then mild bonuses for comfortable length. Ties keep
//! retrieval order (the sort is stable), so equally scored candidates from
//! an earlier source win.

use crate::types::{CandidateExample, ProviderId, ScoredExample};

const EXACT_PHRASE_BONUS: i32 = 100;
const LENGTH_BONUS: i32 = 5;
const TOKEN_COUNT_BONUS: i32 = 10;
const SHORT_SENTENCE_PENALTY: i32 = -20;

/// Candidates scoring at or below this are dropped outright
const EXCLUSION_THRESHOLD: i32 = -10;

/// Per-source quality weight
fn source_weight(provider: ProviderId) -> i32 {
    match provider {
        ProviderId::WordsApi => 50,
        ProviderId::Tatoeba => 30,
        ProviderId::Mock => 25,
        ProviderId::Wordnik => 20,
        ProviderId::FreeDictionary => 5,
    }
}

fn score_candidate(candidate: &CandidateExample, word_lower: &str) -> i32 {
    let text_lower = candidate.text.to_lowercase();
    let mut score = source_weight(candidate.source);

    if text_lower.contains(word_lower) {
        score += EXACT_PHRASE_BONUS;
    }

    let char_count = candidate.text.chars().count();
    if (20..=80).contains(&char_count) {
        score += LENGTH_BONUS;
    }

    let token_count = candidate.text.split_whitespace().count();
    if (6..=15).contains(&token_count) {
        score += TOKEN_COUNT_BONUS;
    } else if token_count <= 3 {
        score += SHORT_SENTENCE_PENALTY;
    }

    score
}

/// Score and rank candidates, best first. Candidates at or below the
/// exclusion threshold are dropped.
pub fn rank(candidates: Vec<CandidateExample>, word: &str) -> Vec<ScoredExample> {
    let word_lower = word.trim().to_lowercase();
    let mut scored: Vec<ScoredExample> = candidates
        .into_iter()
        .map(|candidate| {
            let score = score_candidate(&candidate, &word_lower);
            ScoredExample { candidate, score }
        })
        .filter(|scored| scored.score > EXCLUSION_THRESHOLD)
        .collect();
    // stable: ties keep retrieval order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// The top-ranked candidate, if any survives
pub fn select_best(candidates: Vec<CandidateExample>, word: &str) -> Option<ScoredExample> {
    rank(candidates, word).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(text: &str, source: ProviderId) -> CandidateExample {
        CandidateExample::new(text, source)
    }

    #[test]
    fn test_exact_phrase_dominates_source_weight() {
        let ranked = rank(
            vec![
                candidate("A feline curled up by the fire.", ProviderId::WordsApi),
                candidate("The cat curled up by the fire.", ProviderId::FreeDictionary),
            ],
            "cat",
        );
        assert_eq!(ranked[0].candidate.source, ProviderId::FreeDictionary);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_source_weight_orders_equal_candidates() {
        let ranked = rank(
            vec![
                candidate("The cat sat quietly on the mat.", ProviderId::FreeDictionary),
                candidate("The cat slept softly on the couch.", ProviderId::WordsApi),
                candidate("The cat played gently with the yarn.", ProviderId::Tatoeba),
            ],
            "cat",
        );
        assert_eq!(ranked[0].candidate.source, ProviderId::WordsApi);
        assert_eq!(ranked[1].candidate.source, ProviderId::Tatoeba);
        assert_eq!(ranked[2].candidate.source, ProviderId::FreeDictionary);
    }

    #[test]
    fn test_comfortable_length_bonus() {
        let word = "cat";
        let short = rank(vec![candidate("A cat sat now.", ProviderId::Tatoeba)], word);
        let comfy = rank(
            vec![candidate(
                "The striped cat stretched out in the warm sun.",
                ProviderId::Tatoeba,
            )],
            word,
        );
        assert!(comfy[0].score > short[0].score);
    }

    #[test]
    fn test_very_short_candidate_excluded() {
        // dictionary weight 5, three tokens, word absent: 5 - 20 = -15
        let ranked = rank(
            vec![candidate("Dog ran off.", ProviderId::FreeDictionary)],
            "cat",
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_tie_keeps_retrieval_order() {
        let first = candidate("The cat sat calmly on the red mat.", ProviderId::Tatoeba);
        let second = candidate("The cat lay calmly on the red rug.", ProviderId::Tatoeba);
        let ranked = rank(vec![first.clone(), second], "cat");
        assert_eq!(ranked[0].candidate, first);
    }

    #[test]
    fn test_empty_input_selects_nothing() {
        assert!(select_best(Vec::new(), "cat").is_none());
    }

    #[test]
    fn test_select_best_returns_top() {
        let best = select_best(
            vec![
                candidate("A feline curled up by the fire.", ProviderId::Wordnik),
                candidate("The cat curled up near the fire.", ProviderId::Wordnik),
            ],
            "cat",
        )
        .unwrap();
        assert_eq!(best.candidate.text, "The cat curled up near the fire.");
    }
}
