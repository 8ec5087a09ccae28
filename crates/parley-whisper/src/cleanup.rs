//! Post-processing for raw transcription text.
//!
//! The server emits segment timestamps in square brackets and breaks lines
//! at `max_len`, which can split a sentence of Chinese or Japanese in the
//! middle. These passes strip the tags and re-join such splits while
//! keeping line breaks that separate words of spaced scripts.

use std::sync::LazyLock;

use regex::Regex;

/// Bracketed tags such as `[00:01]` or `[00:00:00.000 --> 00:00:02.000]`.
static BRACKET_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]\n]*\]").expect("Invalid bracket tag regex"));

/// A newline between two Han or kana characters. These scripts are written
/// without inter-word spaces, so joining across the break never merges two
/// words. `ー` (U+30FC) belongs to neither script but only occurs in kana runs.
static SPLIT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([\p{Han}\p{Hiragana}\p{Katakana}\x{30FC}])\n([\p{Han}\p{Hiragana}\p{Katakana}\x{30FC}])",
    )
    .expect("Invalid split line regex")
});

/// Remove every bracketed tag.
pub fn strip_tags(text: &str) -> String {
    BRACKET_TAG.replace_all(text, "").into_owned()
}

/// Remove newlines that split a run of unspaced-script text.
pub fn join_split_lines(text: &str) -> String {
    let mut joined = text.to_string();
    // Matches cannot overlap, so "a\nb\nc" needs a second pass for the
    // newline that shares `b` with the first match.
    while SPLIT_LINE.is_match(&joined) {
        joined = SPLIT_LINE.replace_all(&joined, "${1}${2}").into_owned();
    }
    joined
}

/// Full cleanup applied to a transcription: tags, split lines, then trim.
pub fn clean_transcript(raw: &str) -> String {
    let stripped = strip_tags(raw);
    join_split_lines(&stripped).trim().to_string()
}
