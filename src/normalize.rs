//! Sentence normalization
//!
//! External sources return ragged fragments: stray ellipses, bracketed
//! citations, broken spacing, missing capitalization. This module repairs
//! what it can and validates the result; anything still structurally broken
//! after repair is reported as invalid (`None`) and discarded by callers.
//!
//! Repair stages, applied in order:
//! 1. Collapse pathological ellipsis/dot runs, normalize a trailing run to a period
//! 2. Strip list prefixes, bracketed spans, citation parentheticals, wrapping quotes
//! 3. Normalize whitespace and spacing around punctuation, collapse repeated marks
//! 4. Capitalize sentence starts
//! 5. Append a terminal period when no end punctuation survived

use regex::Regex;
use std::sync::OnceLock;

fn re(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static regex must compile"))
}

static RE_TRAILING_DOTS: OnceLock<Regex> = OnceLock::new();
static RE_LEADING_DOTS: OnceLock<Regex> = OnceLock::new();
static RE_INTERNAL_DOTS: OnceLock<Regex> = OnceLock::new();
static RE_LIST_PREFIX: OnceLock<Regex> = OnceLock::new();
static RE_BRACKET_SPAN: OnceLock<Regex> = OnceLock::new();
static RE_CITATION: OnceLock<Regex> = OnceLock::new();
static RE_WHITESPACE: OnceLock<Regex> = OnceLock::new();
static RE_SPACE_BEFORE_PUNCT: OnceLock<Regex> = OnceLock::new();
static RE_REPEATED_PUNCT: OnceLock<Regex> = OnceLock::new();
static RE_MISSING_SPACE_AFTER: OnceLock<Regex> = OnceLock::new();

/// Clean a raw sentence fragment. Returns `None` when the input cannot be
/// repaired into a usable sentence.
pub fn clean_sentence(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut text = collapse_ellipses(trimmed);
    text = strip_structural_noise(&text);
    text = normalize_spacing(&text);
    text = capitalize_sentences(&text);
    text = ensure_terminal_punctuation(text);

    if is_valid(&text) { Some(text) } else { None }
}

fn collapse_ellipses(text: &str) -> String {
    let text = text.replace('\u{2026}', "...");
    let text = re(&RE_TRAILING_DOTS, r"\s*\.{3,}\s*$").replace(&text, ".");
    let text = re(&RE_LEADING_DOTS, r"^(?:\s*\.{3,})+\s*").replace(&text, "");
    re(&RE_INTERNAL_DOTS, r"\s*\.{3,}\s*")
        .replace_all(&text, " ")
        .into_owned()
}

fn strip_structural_noise(text: &str) -> String {
    let text = re(&RE_LIST_PREFIX, r"^\s*\d+[.)]\s+").replace(text, "");
    let text = re(&RE_BRACKET_SPAN, r"\[[^\]]*\]|\{[^}]*\}|<[^>]*>").replace_all(&text, "");
    // Citation parentheticals: "(Jones 2001)", "(Jones - 2001)", "(p. 12)"
    let text = re(
        &RE_CITATION,
        r"\(\s*[^()]*\d{4}[^()]*\)|\(\s*p{1,2}\.\s*\d+\s*\)",
    )
    .replace_all(&text, "");
    text.trim_matches(['"', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'])
        .to_string()
}

fn normalize_spacing(text: &str) -> String {
    let text = re(&RE_WHITESPACE, r"\s+").replace_all(text, " ");
    let text = re(&RE_SPACE_BEFORE_PUNCT, r"\s+([,.!?;:])").replace_all(&text, "$1");
    let text = re(&RE_REPEATED_PUNCT, r"([,.!?;:])[,.!?;:]+").replace_all(&text, "$1");
    let text = re(&RE_MISSING_SPACE_AFTER, r"([,.!?;:])([A-Za-z])").replace_all(&text, "$1 $2");
    text.trim().to_string()
}

fn capitalize_sentences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut capitalize_next = true;
    for c in text.chars() {
        if capitalize_next && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            if matches!(c, '.' | '!' | '?') {
                capitalize_next = true;
            }
            out.push(c);
        }
    }
    out
}

fn ensure_terminal_punctuation(text: String) -> String {
    let mut text = text.trim_end_matches([',', ';', ':', ' ']).to_string();
    if !text.ends_with(['.', '!', '?']) {
        text.push('.');
    }
    text
}

fn is_valid(text: &str) -> bool {
    if text.chars().count() < 3 {
        return false;
    }
    let word_count = text.split_whitespace().count();
    if word_count < 2 {
        return false;
    }
    let punct_count = text.chars().filter(|c| c.is_ascii_punctuation()).count();
    if punct_count as f32 / word_count as f32 > 0.5 {
        return false;
    }
    // Structural leftovers mean the repair failed
    if text.contains("...") || text.contains(['[', ']', '{', '}', '<', '>']) {
        return false;
    }
    match text.chars().next() {
        Some(first) if first.is_ascii_punctuation() => false,
        Some(first) if first.is_alphabetic() && first.is_lowercase() => false,
        Some(_) => true,
        None => false,
    }
}
