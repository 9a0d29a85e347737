//! Text normalization and whole-word phrase matching
//!
//! Every scorer counts mentions through [`count_word_hits`] so that the
//! deterministic scorer, the memory ranker and the helper inferencer agree
//! on what a "mention" is.

use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// Compiled whole-word patterns keyed by normalized phrase. Phrases come from
/// the routing tables and the installed catalog.
fn patterns() -> &'static RwLock<HashMap<String, Regex>> {
    static PATTERNS: OnceLock<RwLock<HashMap<String, Regex>>> = OnceLock::new();
    PATTERNS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Whole-word, case-insensitive pattern for an already-normalized phrase.
fn word_pattern(phrase: &str) -> Result<Regex, regex::Error> {
    if let Some(re) = patterns()
        .read()
        .ok()
        .and_then(|cache| cache.get(phrase).cloned())
    {
        return Ok(re);
    }

    let re = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(phrase)))
        .case_insensitive(true)
        .build()?;
    if let Ok(mut cache) = patterns().write() {
        cache.insert(phrase.to_string(), re.clone());
    }
    Ok(re)
}

/// Lowercase the text and collapse every whitespace run into a single space.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count whole-word occurrences of `phrase` in `text`, case-insensitively.
///
/// Matches are non-overlapping: each match consumes its span. Empty or
/// whitespace-only phrases never match. Internal whitespace in the phrase is
/// collapsed the same way [`normalize`] collapses the text.
pub fn count_word_hits(text: &str, phrase: &str) -> usize {
    let phrase = normalize(phrase);
    if phrase.is_empty() || text.is_empty() {
        return 0;
    }

    match word_pattern(&phrase) {
        Ok(re) => re.find_iter(text).count(),
        Err(e) => {
            tracing::warn!(phrase = %phrase, error = %e, "Unmatchable phrase skipped");
            0
        }
    }
}

/// True when `phrase` occurs at least once as a whole word in `text`.
pub fn contains_word(text: &str, phrase: &str) -> bool {
    count_word_hits(text, phrase) > 0
}
