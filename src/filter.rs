//! Candidate quality filtering
//!
//! A sequential chain of predicate stages; a candidate is accepted only if
//! every stage passes, evaluated in a fixed order with short-circuit on the
//! first rejection:
//!
//! 1. **Basic quality** - length bounds, no meta-commentary, proper ending
//! 2. **Word presence** - the target word (or an accepted compound form) occurs
//! 3. **Compound/variant rejection** - the word must occur in its exact form,
//!    not buried in a longer word or replaced by an inflected variant
//! 4. **Category context** - curated cue lists disambiguate known tricky words
//! 5. **Complexity** - readable length, plain vocabulary, early word placement
//!
//! Rejections are silent booleans; the rejecting stage is traced at debug
//! level for diagnosis.

use crate::category::WordCategory;
use regex::Regex;
use tracing::debug;

// Stage 1 bounds: anything outside is garbage, not an example
const MIN_WORDS: usize = 3;
const MAX_WORDS: usize = 25;

// Stage 5 bounds: readable-for-a-learner window
const MIN_READABLE_WORDS: usize = 5;
const MAX_READABLE_WORDS: usize = 20;
const LONG_TOKEN_CHARS: usize = 8;
const LONG_TOKEN_RATIO: f32 = 0.2;
const LATEST_PLACEMENT_RATIO: f32 = 0.7;

/// Phrases that mark dictionary/reference prose rather than example usage
const META_MARKERS: &[&str] = &[
    "example of",
    "examples of",
    "for example",
    "e.g.",
    "definition",
    "dictionary",
    "wikipedia",
    "thesaurus",
    "synonym",
    "http",
    "www.",
];

/// Plural forms accepted in place of the exact word because they name the
/// same thing
const ALLOWED_VARIANTS: &[(&str, &[&str])] = &[
    ("shoe", &["shoes"]),
    ("sock", &["socks"]),
    ("glove", &["gloves"]),
    ("boot", &["boots"]),
    ("earring", &["earrings"]),
    ("mitten", &["mittens"]),
    ("sandal", &["sandals"]),
];

/// Irregular inflections the suffix rules cannot derive
const IRREGULAR_VARIANTS: &[(&str, &str)] = &[
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("person", "people"),
];

/// Context cues for words whose surface form is ambiguous across senses.
/// A candidate must contain at least one required cue and none of the
/// forbidden ones. Kept as data so new special cases are new rows, not new
/// control flow.
struct ContextRule {
    word: &'static str,
    category: WordCategory,
    required_any: &'static [&'static str],
    forbidden_any: &'static [&'static str],
}

const CONTEXT_RULES: &[ContextRule] = &[
    ContextRule {
        word: "bear",
        category: WordCategory::Animal,
        required_any: &[
            "zoo", "forest", "wild", "cub", "honey", "fur", "polar", "grizzly", "teddy", "cave",
            "woods", "animal",
        ],
        forbidden_any: &[
            "bear in mind",
            "bear with",
            "must bear",
            "to bear",
            "cannot bear",
            "can't bear",
            "bear the cost",
            "bear witness",
            "bear fruit",
            "bear responsibility",
        ],
    },
    ContextRule {
        word: "mouse",
        category: WordCategory::Animal,
        required_any: &[
            "cheese", "cat", "tail", "squeak", "trap", "hole", "field", "little", "tiny", "gray",
            "grey",
        ],
        forbidden_any: &[
            "computer", "click", "cursor", "keyboard", "wireless", "usb", "scroll",
        ],
    },
    ContextRule {
        word: "bat",
        category: WordCategory::Animal,
        required_any: &[
            "cave", "night", "wings", "fly", "flew", "vampire", "fruit", "hangs", "hanging",
        ],
        forbidden_any: &["baseball", "cricket", "swing", "swung", "hit", "ball"],
    },
    ContextRule {
        word: "chicken",
        category: WordCategory::Animal,
        required_any: &[
            "farm", "coop", "egg", "eggs", "feathers", "cluck", "hen", "yard", "pecked",
        ],
        forbidden_any: &[
            "fried",
            "grilled",
            "roast",
            "roasted",
            "soup",
            "sandwich",
            "curry",
            "recipe",
            "delicious",
            "dinner",
        ],
    },
    ContextRule {
        word: "top",
        category: WordCategory::Clothing,
        required_any: &[
            "wear", "wore", "wearing", "shirt", "outfit", "dress", "skirt", "cotton", "silk",
            "sleeve", "bought", "matches", "new",
        ],
        forbidden_any: &[
            "on top of",
            "top of the",
            "at the top",
            "to the top",
            "from the top",
            "top speed",
            "top ten",
            "spinning top",
            "mountain top",
        ],
    },
    ContextRule {
        word: "tie",
        category: WordCategory::Clothing,
        required_any: &[
            "wear", "wore", "wearing", "neck", "suit", "silk", "shirt", "collar", "knot",
        ],
        forbidden_any: &[
            "tie the knot",
            "tie up",
            "tie down",
            "to tie",
            "tied the",
            "tie the game",
            "tie your",
        ],
    },
    ContextRule {
        word: "watch",
        category: WordCategory::Jewelry,
        required_any: &[
            "wrist", "wear", "wore", "wearing", "gold", "silver", "strap", "leather", "time",
            "new",
        ],
        forbidden_any: &[
            "watch the",
            "watch tv",
            "watch television",
            "watch out",
            "watching",
            "watched",
            "watch him",
            "watch her",
            "watch your",
        ],
    },
    ContextRule {
        word: "glasses",
        category: WordCategory::Eyewear,
        required_any: &[
            "wear",
            "wore",
            "wearing",
            "read",
            "see",
            "eyes",
            "vision",
            "prescription",
            "pair",
            "new",
            "lost",
        ],
        forbidden_any: &[
            "wine", "water", "drinking", "filled", "empty", "raised", "champagne", "beer",
        ],
    },
];

/// The sequential quality filter
#[derive(Debug, Default)]
pub struct QualityFilter;

impl QualityFilter {
    pub fn new() -> Self {
        QualityFilter
    }

    /// Accept or reject one candidate for one word/category. Pure: the same
    /// inputs always produce the same answer.
    pub fn accepts(&self, text: &str, word: &str, category: WordCategory) -> bool {
        let text_lower = text.to_lowercase();
        let word_lower = word.trim().to_lowercase();
        if word_lower.is_empty() {
            return false;
        }

        if !basic_quality(text, &text_lower) {
            debug!(word = %word_lower, "Rejected: basic quality");
            return false;
        }
        if !word_presence(&text_lower, &word_lower) {
            debug!(word = %word_lower, "Rejected: word not present");
            return false;
        }
        if !exact_form(&text_lower, &word_lower) {
            debug!(word = %word_lower, "Rejected: compound or variant form only");
            return false;
        }
        if !context_cues(&text_lower, &word_lower, category) {
            debug!(word = %word_lower, category = %category, "Rejected: context cues");
            return false;
        }
        if !readable(&text_lower, &word_lower) {
            debug!(word = %word_lower, "Rejected: complexity");
            return false;
        }
        true
    }
}

// ========== Stage 1: basic quality ==========

fn basic_quality(text: &str, text_lower: &str) -> bool {
    let word_count = text.split_whitespace().count();
    if !(MIN_WORDS..=MAX_WORDS).contains(&word_count) {
        return false;
    }
    if text.contains(';') {
        return false;
    }
    if META_MARKERS.iter().any(|marker| text_lower.contains(marker)) {
        return false;
    }
    if text_lower.trim_start().starts_with("note:") {
        return false;
    }
    // Parentheticals that survived normalization read as citations
    if text.contains(['(', ')']) {
        return false;
    }
    text.trim_end().ends_with(['.', '!', '?'])
}

// ========== Stage 2: word presence ==========

fn word_presence(text_lower: &str, word_lower: &str) -> bool {
    if !word_lower.contains(' ') {
        // The word in some form: exact, embedded in a longer token, or an
        // inflected variant. Stage 3 decides whether the form is acceptable.
        return text_lower.contains(word_lower)
            || morphological_variants(word_lower)
                .iter()
                .any(|variant| contains_token(text_lower, variant));
    }

    // Compound word: the full phrase, a hyphenated spelling, or the final
    // (most load-bearing) token
    if text_lower.contains(word_lower) {
        return true;
    }
    if text_lower.contains(&word_lower.replace(' ', "-")) {
        return true;
    }
    match word_lower.split_whitespace().last() {
        Some(last) if last.len() > 3 => contains_token(text_lower, last),
        _ => false,
    }
}

// ========== Stage 3: compound/variant rejection ==========

fn exact_form(text_lower: &str, word_lower: &str) -> bool {
    if word_lower.contains(' ') {
        // Compound acceptance rules were already settled by stage 2
        return true;
    }
    if contains_token(text_lower, word_lower) {
        return true;
    }

    // The word only occurs embedded in longer tokens or as an inflected
    // variant; only whitelisted identical-meaning forms survive
    let allowed: &[&str] = ALLOWED_VARIANTS
        .iter()
        .find(|(base, _)| *base == word_lower)
        .map(|(_, forms)| *forms)
        .unwrap_or(&[]);

    tokens(text_lower).any(|token| allowed.contains(&token))
}

/// Inflected forms of a word that would make a sentence about something
/// other than the exact word: plural/singular flips, -ing/-ed verb forms,
/// comparatives/superlatives and irregulars.
pub(crate) fn morphological_variants(word: &str) -> Vec<String> {
    let mut variants = Vec::new();
    let mut push = |v: String| {
        if v.len() > 1 && v != word && !variants.contains(&v) {
            variants.push(v);
        }
    };

    // plural
    push(format!("{}s", word));
    push(format!("{}es", word));
    if let Some(stem) = word.strip_suffix('y') {
        if stem
            .chars()
            .last()
            .map(|c| !"aeiou".contains(c))
            .unwrap_or(false)
        {
            push(format!("{}ies", stem));
        }
    }
    // singular
    if let Some(stem) = word.strip_suffix("ies") {
        push(format!("{}y", stem));
    }
    if let Some(stem) = word.strip_suffix("es") {
        push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix('s') {
        push(stem.to_string());
    }
    // verb forms
    push(format!("{}ing", word));
    push(format!("{}ed", word));
    if let Some(stem) = word.strip_suffix('e') {
        push(format!("{}ing", stem));
        push(format!("{}ed", stem));
    }
    if let Some(last) = word.chars().last() {
        if !"aeiou".contains(last) {
            push(format!("{}{}ing", word, last));
            push(format!("{}{}ed", word, last));
        }
    }
    // comparative/superlative
    push(format!("{}er", word));
    push(format!("{}est", word));
    if let Some(stem) = word.strip_suffix('y') {
        push(format!("{}ier", stem));
        push(format!("{}iest", stem));
    }
    // irregulars, both directions
    for (singular, plural) in IRREGULAR_VARIANTS {
        if *singular == word {
            push(plural.to_string());
        }
        if *plural == word {
            push(singular.to_string());
        }
    }
    variants
}

// ========== Stage 4: category context ==========

fn context_cues(text_lower: &str, word_lower: &str, category: WordCategory) -> bool {
    let rule = CONTEXT_RULES
        .iter()
        .find(|rule| rule.word == word_lower && rule.category == category);
    let Some(rule) = rule else {
        return true;
    };

    if rule
        .forbidden_any
        .iter()
        .any(|cue| text_lower.contains(cue))
    {
        return false;
    }
    rule.required_any.iter().any(|cue| text_lower.contains(cue))
}

// ========== Stage 5: complexity/readability ==========

fn readable(text_lower: &str, word_lower: &str) -> bool {
    let token_list: Vec<&str> = tokens(text_lower).collect();
    let word_count = token_list.len();
    if !(MIN_READABLE_WORDS..=MAX_READABLE_WORDS).contains(&word_count) {
        return false;
    }

    let non_target: Vec<&&str> = token_list.iter().filter(|t| **t != word_lower).collect();
    if !non_target.is_empty() {
        let long = non_target
            .iter()
            .filter(|t| t.chars().count() > LONG_TOKEN_CHARS)
            .count();
        if long as f32 / non_target.len() as f32 > LONG_TOKEN_RATIO {
            return false;
        }
    }

    // A learner needs the word early enough to have context after it
    if let Some(position) = find_token(text_lower, word_lower) {
        let ratio = position as f32 / text_lower.len() as f32;
        if ratio > LATEST_PLACEMENT_RATIO {
            return false;
        }
    }
    true
}

// ========== Token helpers ==========

fn tokens(text_lower: &str) -> impl Iterator<Item = &str> {
    text_lower
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
        .filter(|t| !t.is_empty())
}

fn contains_token(text_lower: &str, token: &str) -> bool {
    find_token(text_lower, token).is_some()
}

/// Byte offset of the first word-boundary occurrence of `token`
fn find_token(text_lower: &str, token: &str) -> Option<usize> {
    let pattern = format!(r"\b{}\b", regex::escape(token));
    Regex::new(&pattern)
        .ok()
        .and_then(|re| re.find(text_lower).map(|m| m.start()))
}
