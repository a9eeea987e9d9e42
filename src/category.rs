//! Word categorization
//!
//! Maps a learned word to a coarse semantic category that drives
//! context-aware filtering and template selection. The mapping is total:
//! lookup tables and morphological heuristics are tried in a fixed order
//! and anything unrecognized falls back to `Noun`.

/// Semantic category of a learned word, valid for one pipeline call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordCategory {
    Person,
    Animal,
    Clothing,
    Eyewear,
    Jewelry,
    Tool,
    Toy,
    UncountableClothing,
    Verb,
    Adjective,
    Noun,
    General,
}

impl WordCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordCategory::Person => "person",
            WordCategory::Animal => "animal",
            WordCategory::Clothing => "clothing",
            WordCategory::Eyewear => "eyewear",
            WordCategory::Jewelry => "jewelry",
            WordCategory::Tool => "tool",
            WordCategory::Toy => "toy",
            WordCategory::UncountableClothing => "uncountable-clothing",
            WordCategory::Verb => "verb",
            WordCategory::Adjective => "adjective",
            WordCategory::Noun => "noun",
            WordCategory::General => "general",
        }
    }
}

impl std::fmt::Display for WordCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WordCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "person" => Ok(WordCategory::Person),
            "animal" => Ok(WordCategory::Animal),
            "clothing" => Ok(WordCategory::Clothing),
            "eyewear" => Ok(WordCategory::Eyewear),
            "jewelry" | "jewellery" => Ok(WordCategory::Jewelry),
            "tool" => Ok(WordCategory::Tool),
            "toy" => Ok(WordCategory::Toy),
            "uncountable-clothing" | "uncountable_clothing" => {
                Ok(WordCategory::UncountableClothing)
            }
            "verb" => Ok(WordCategory::Verb),
            "adjective" => Ok(WordCategory::Adjective),
            "noun" => Ok(WordCategory::Noun),
            "general" => Ok(WordCategory::General),
            other => Err(format!("Unknown word category: {}", other)),
        }
    }
}

// Ambiguous words resolved by their primary classroom sense. Checked before
// every other rule.
const OVERRIDES: &[(&str, WordCategory)] = &[
    ("mouse", WordCategory::Animal),
    ("bat", WordCategory::Animal),
    ("bear", WordCategory::Animal),
    ("seal", WordCategory::Animal),
    ("duck", WordCategory::Animal),
    ("fox", WordCategory::Animal),
    ("crane", WordCategory::Animal),
    ("top", WordCategory::Clothing),
    ("tie", WordCategory::Clothing),
    ("watch", WordCategory::Jewelry),
    ("ring", WordCategory::Jewelry),
    ("glasses", WordCategory::Eyewear),
];

const PERSONS: &[&str] = &[
    "person", "man", "woman", "boy", "girl", "child", "baby", "friend", "teacher", "doctor",
    "nurse", "farmer", "student", "chef", "police officer", "firefighter", "neighbor", "artist",
];

const ANIMALS: &[&str] = &[
    "cat", "dog", "bird", "horse", "sheep", "cow", "elephant", "zebra", "giraffe", "rabbit",
    "lion", "tiger", "deer", "monkey", "frog", "chicken", "pig", "owl", "wolf", "snake", "turtle",
    "fish", "penguin", "dolphin", "whale", "bee", "butterfly", "squirrel", "hamster", "goat",
];

const CLOTHING: &[&str] = &[
    "shirt", "dress", "jacket", "coat", "hat", "skirt", "sweater", "scarf", "sock", "shoe",
    "boot", "glove", "belt", "suit", "cap", "hoodie", "blouse", "vest", "mitten", "sandal",
];

const UNCOUNTABLE_CLOTHING: &[&str] = &[
    "clothing",
    "underwear",
    "swimwear",
    "knitwear",
    "footwear",
    "outerwear",
    "sportswear",
];

const EYEWEAR: &[&str] = &["spectacles", "monocle", "eyeglasses"];

const JEWELRY: &[&str] = &[
    "necklace", "bracelet", "earring", "pendant", "brooch", "jewel", "locket", "anklet",
];

const TOOLS: &[&str] = &[
    "hammer",
    "screwdriver",
    "wrench",
    "saw",
    "drill",
    "shovel",
    "rake",
    "chisel",
    "file",
    "clamp",
    "crowbar",
];

const TOYS: &[&str] = &[
    "ball", "doll", "kite", "puzzle", "frisbee", "marble", "rattle", "slinky", "spinner",
];

const VERBS: &[&str] = &[
    "run", "jump", "eat", "drink", "sleep", "read", "write", "swim", "sing", "dance", "cook",
    "walk", "talk", "play", "climb", "draw", "paint", "throw", "catch", "teach", "build", "drive",
    "bake", "clean", "work", "farm", "fish",
];

const ADJECTIVES: &[&str] = &[
    "big", "small", "happy", "sad", "red", "blue", "green", "yellow", "fast", "slow", "hot",
    "cold", "tall", "short", "soft", "hard", "loud", "quiet", "beautiful", "bright", "dark",
];

// Compound names checked by containment, for multi-word detections coming
// out of the object recognizer.
const COMPOUND_CATEGORIES: &[(&str, WordCategory)] = &[
    ("teddy bear", WordCategory::Toy),
    ("stuffed animal", WordCategory::Toy),
    ("toy car", WordCategory::Toy),
    ("remote control", WordCategory::Tool),
    ("hair drier", WordCategory::Tool),
    ("hair dryer", WordCategory::Tool),
];

// Words that normally appear in plural form, split into disjoint sub-lists
// so the plural route lands on the right category.
const PLURAL_TOOLS: &[&str] = &["scissors", "pliers", "tweezers", "tongs", "shears", "clippers"];

const PLURAL_EYEWEAR: &[&str] = &["glasses", "sunglasses", "goggles", "bifocals"];

const PLURAL_CLOTHING: &[&str] = &[
    "pants", "jeans", "shorts", "trousers", "leggings", "overalls", "pajamas", "tights",
];

// Common nouns that end in -ing and must not be mistaken for verbs.
const ING_NOUNS: &[&str] = &[
    "thing", "king", "wing", "spring", "string", "morning", "evening", "building", "ceiling",
    "painting", "wedding", "pudding", "darling",
];

/// True when the word conventionally takes plural agreement ("glasses are")
pub fn is_typically_plural(word: &str) -> bool {
    let w = word.trim().to_lowercase();
    PLURAL_TOOLS.contains(&w.as_str())
        || PLURAL_EYEWEAR.contains(&w.as_str())
        || PLURAL_CLOTHING.contains(&w.as_str())
}

/// Categorize a word. Total: always returns a category, defaulting to `Noun`.
pub fn categorize(word: &str) -> WordCategory {
    let w = word.trim().to_lowercase();
    if w.is_empty() {
        return WordCategory::Noun;
    }

    // 1. Explicit overrides win over everything else
    if let Some((_, category)) = OVERRIDES.iter().find(|(candidate, _)| *candidate == w) {
        return *category;
    }

    // 2. Exact membership tables
    if PERSONS.contains(&w.as_str()) {
        return WordCategory::Person;
    }
    if ANIMALS.contains(&w.as_str()) {
        return WordCategory::Animal;
    }
    if CLOTHING.contains(&w.as_str()) {
        return WordCategory::Clothing;
    }
    if UNCOUNTABLE_CLOTHING.contains(&w.as_str()) {
        return WordCategory::UncountableClothing;
    }
    if EYEWEAR.contains(&w.as_str()) {
        return WordCategory::Eyewear;
    }
    if JEWELRY.contains(&w.as_str()) {
        return WordCategory::Jewelry;
    }
    if TOOLS.contains(&w.as_str()) {
        return WordCategory::Tool;
    }
    if TOYS.contains(&w.as_str()) {
        return WordCategory::Toy;
    }
    if VERBS.contains(&w.as_str()) {
        return WordCategory::Verb;
    }
    if ADJECTIVES.contains(&w.as_str()) {
        return WordCategory::Adjective;
    }

    // 3. Multi-word compounds by containment
    for (compound, category) in COMPOUND_CATEGORIES {
        if w.contains(compound) {
            return *category;
        }
    }

    // 4. Typically-plural route with disjoint sub-lists
    if PLURAL_TOOLS.contains(&w.as_str()) {
        return WordCategory::Tool;
    }
    if PLURAL_EYEWEAR.contains(&w.as_str()) {
        return WordCategory::Eyewear;
    }
    if PLURAL_CLOTHING.contains(&w.as_str()) {
        return WordCategory::Clothing;
    }

    // 5. Suffix heuristics
    if let Some(category) = categorize_by_suffix(&w) {
        return category;
    }

    WordCategory::Noun
}

fn categorize_by_suffix(word: &str) -> Option<WordCategory> {
    // -ing is usually a verb form, except for everyday -ing nouns
    if word.len() > 5 && word.ends_with("ing") && !ING_NOUNS.contains(&word) {
        return Some(WordCategory::Verb);
    }

    // -er is an agent noun when the stem is a known verb ("teacher"),
    // otherwise treated as a comparative adjective ("bigger")
    if word.len() > 3 && word.ends_with("er") {
        if agent_verb_stem(word).is_some() {
            return Some(WordCategory::Person);
        }
        return Some(WordCategory::Adjective);
    }

    if word.len() > 4 && word.ends_with("est") {
        return Some(WordCategory::Adjective);
    }

    None
}

/// Resolve the verb stem of an -er agent noun, if any: "teacher" → "teach",
/// "baker" → "bake", "runner" → "run".
fn agent_verb_stem(word: &str) -> Option<&'static str> {
    let stem = &word[..word.len() - 2];

    if let Some(found) = VERBS.iter().find(|v| **v == stem) {
        return Some(found);
    }
    // e-final stems lose their "e" before -er
    let with_e = format!("{}e", stem);
    if let Some(found) = VERBS.iter().find(|v| **v == with_e) {
        return Some(found);
    }
    // doubled final consonant: "runner" → "runn" → "run"
    let bytes = stem.as_bytes();
    if bytes.len() >= 2 && bytes[bytes.len() - 1] == bytes[bytes.len() - 2] {
        let undoubled = &stem[..stem.len() - 1];
        if let Some(found) = VERBS.iter().find(|v| **v == undoubled) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Override Tests ==========

    #[test]
    fn test_overrides_take_precedence() {
        // "mouse" is also a computer device; "top" is also a position
        assert_eq!(categorize("mouse"), WordCategory::Animal);
        assert_eq!(categorize("top"), WordCategory::Clothing);
        assert_eq!(categorize("watch"), WordCategory::Jewelry);
        assert_eq!(categorize("bear"), WordCategory::Animal);
    }

    #[test]
    fn test_override_beats_suffix_heuristic() {
        // "tie" would otherwise fall through to the noun default,
        // and "ring" must not be treated as an -ing verb
        assert_eq!(categorize("tie"), WordCategory::Clothing);
        assert_eq!(categorize("ring"), WordCategory::Jewelry);
    }

    // ========== Table Tests ==========

    #[test]
    fn test_basic_tables() {
        assert_eq!(categorize("cat"), WordCategory::Animal);
        assert_eq!(categorize("jacket"), WordCategory::Clothing);
        assert_eq!(categorize("hammer"), WordCategory::Tool);
        assert_eq!(categorize("doll"), WordCategory::Toy);
        assert_eq!(categorize("necklace"), WordCategory::Jewelry);
        assert_eq!(categorize("teacher"), WordCategory::Person);
        assert_eq!(categorize("run"), WordCategory::Verb);
        assert_eq!(categorize("happy"), WordCategory::Adjective);
        assert_eq!(categorize("clothing"), WordCategory::UncountableClothing);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(categorize("  CAT  "), WordCategory::Animal);
        assert_eq!(categorize("Elephant"), WordCategory::Animal);
    }

    #[test]
    fn test_unknown_defaults_to_noun() {
        assert_eq!(categorize("zyzzyva"), WordCategory::Noun);
        assert_eq!(categorize("table"), WordCategory::Noun);
        assert_eq!(categorize(""), WordCategory::Noun);
    }

    // ========== Compound Tests ==========

    #[test]
    fn test_compound_containment() {
        assert_eq!(categorize("teddy bear"), WordCategory::Toy);
        assert_eq!(categorize("brown teddy bear"), WordCategory::Toy);
        assert_eq!(categorize("remote control"), WordCategory::Tool);
    }

    // ========== Plural Route Tests ==========

    #[test]
    fn test_typically_plural_routing() {
        assert_eq!(categorize("scissors"), WordCategory::Tool);
        assert_eq!(categorize("sunglasses"), WordCategory::Eyewear);
        assert_eq!(categorize("glasses"), WordCategory::Eyewear);
        assert_eq!(categorize("jeans"), WordCategory::Clothing);
        assert_eq!(categorize("pliers"), WordCategory::Tool);
    }

    #[test]
    fn test_is_typically_plural() {
        assert!(is_typically_plural("glasses"));
        assert!(is_typically_plural("scissors"));
        assert!(is_typically_plural("pants"));
        assert!(!is_typically_plural("cat"));
        assert!(!is_typically_plural("shoe"));
    }

    // ========== Suffix Heuristic Tests ==========

    #[test]
    fn test_ing_suffix() {
        assert_eq!(categorize("running"), WordCategory::Verb);
        assert_eq!(categorize("jumping"), WordCategory::Verb);
        // common -ing nouns are not verbs
        assert_eq!(categorize("morning"), WordCategory::Noun);
        assert_eq!(categorize("building"), WordCategory::Noun);
        assert_eq!(categorize("king"), WordCategory::Noun);
    }

    #[test]
    fn test_er_agent_nouns() {
        assert_eq!(categorize("baker"), WordCategory::Person);
        assert_eq!(categorize("runner"), WordCategory::Person);
        assert_eq!(categorize("dancer"), WordCategory::Person);
        assert_eq!(categorize("painter"), WordCategory::Person);
    }

    #[test]
    fn test_er_comparatives() {
        assert_eq!(categorize("bigger"), WordCategory::Adjective);
        assert_eq!(categorize("smaller"), WordCategory::Adjective);
    }

    #[test]
    fn test_est_superlatives() {
        assert_eq!(categorize("tallest"), WordCategory::Adjective);
        assert_eq!(categorize("fastest"), WordCategory::Adjective);
    }

    // ========== Parsing Tests ==========

    #[test]
    fn test_category_round_trip() {
        for name in [
            "person",
            "animal",
            "clothing",
            "eyewear",
            "jewelry",
            "tool",
            "toy",
            "uncountable-clothing",
            "verb",
            "adjective",
            "noun",
            "general",
        ] {
            let category: WordCategory = name.parse().unwrap();
            assert_eq!(category.as_str(), name);
        }
    }

    #[test]
    fn test_category_parse_rejects_unknown() {
        assert!("color".parse::<WordCategory>().is_err());
    }
}
