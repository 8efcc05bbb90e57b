use std::sync::LazyLock;

use regex::Regex;

/// Literal token marking a fill-in position in cloze text.
pub const BLANK_MARKER: &str = "___";

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(BLANK_MARKER).expect("marker pattern is valid"));

/// Number of blank markers in `text`. Matches are non-overlapping, so four
/// consecutive underscores count as a single marker.
pub fn blank_count(text: &str) -> usize {
    MARKER.find_iter(text).count()
}

/// Reconcile a blank answer list with the markers in `text`.
///
/// The resize is positional: values survive at their index, trailing
/// entries are dropped when markers disappear, and new trailing markers
/// start empty. Inserting a marker mid-text does not shift existing
/// answers to follow it.
pub fn derive_blanks(existing: &[String], text: &str) -> Vec<String> {
    let mut blanks = existing.to_vec();
    blanks.resize(blank_count(text), String::new());
    blanks
}

/// Text fragments surrounding the markers, in order. A text with `n`
/// markers yields `n + 1` fragments; blanks are numbered left to right
/// between them.
pub fn split_segments(text: &str) -> Vec<&str> {
    MARKER.split(text).collect()
}
