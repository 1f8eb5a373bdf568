//! Lyrics text extraction
//!
//! Turns the text scraped from a provider's song page into clean lyrics:
//! leading page metadata is cut at the first section marker, junk and prose
//! lines are filtered out, section markers are put on their own lines and
//! blank-line runs are collapsed.
//!
//! The junk phrases and the line length limit were tuned against Genius page
//! text. They are heuristics and are kept as literal constants.

use regex::Regex;
use std::sync::OnceLock;

/// Section labels that may start the lyrics body, e.g. `[Chorus]` or `[Verse 2]`.
pub const SECTION_LABELS: [&str; 7] = [
    "Verse",
    "Chorus",
    "Refrain",
    "Bridge",
    "Outro",
    "Intro",
    "Pre-Chorus",
];

/// Lines containing any of these (case-insensitive) are dropped.
pub const JUNK_PHRASES: [&str; 8] = [
    "Contributors",
    "Translations",
    "Read More",
    "Español",
    "You might also like",
    "Lyrics by",
    "Produced by",
    "Genius",
];

/// Lines longer than this (in characters) without a bracketed tag are dropped.
pub const MAX_UNTAGGED_LINE_CHARS: usize = 120;

static SECTION_MARKER_REGEX: OnceLock<Regex> = OnceLock::new();
static BRACKET_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static TAG_WITH_PADDING_REGEX: OnceLock<Regex> = OnceLock::new();
static BLANK_RUN_REGEX: OnceLock<Regex> = OnceLock::new();
static NON_WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn section_marker_regex() -> &'static Regex {
    SECTION_MARKER_REGEX.get_or_init(|| {
        let labels = SECTION_LABELS
            .iter()
            .map(|label| regex::escape(label))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\[(?:{})\b[^\]\n]*\]", labels))
            .expect("section marker pattern is valid")
    })
}

fn bracket_tag_regex() -> &'static Regex {
    BRACKET_TAG_REGEX.get_or_init(|| Regex::new(r"\[[^\]\n]*\]").expect("tag pattern is valid"))
}

fn tag_with_padding_regex() -> &'static Regex {
    TAG_WITH_PADDING_REGEX.get_or_init(|| {
        Regex::new(r"[ \t]*(\[[^\]\n]*\])[ \t]*").expect("padded tag pattern is valid")
    })
}

fn blank_run_regex() -> &'static Regex {
    BLANK_RUN_REGEX.get_or_init(|| Regex::new(r"\n{3,}").expect("blank run pattern is valid"))
}

fn non_word_regex() -> &'static Regex {
    NON_WORD_REGEX.get_or_init(|| Regex::new(r"[^\w\s]").expect("non-word pattern is valid"))
}

/// Normalize a free-text query for searching and cache lookups.
///
/// Strips everything that is neither a word character nor whitespace and
/// trims the result. `\w` is Unicode-aware, so accented letters survive.
pub fn normalize(query: &str) -> String {
    non_word_regex().replace_all(query, "").trim().to_string()
}

/// Extract clean lyrics from a raw scraped text blob.
///
/// Never fails. Input without any section marker is only line-filtered and
/// formatted.
pub fn extract(raw: &str) -> String {
    let body = trim_head(raw);
    let filtered = filter_lines(body);
    format_markers(&filtered)
}

/// Drop everything before the first recognised section marker.
fn trim_head(raw: &str) -> &str {
    match section_marker_regex().find(raw) {
        Some(marker) if marker.start() > 0 => &raw[marker.start()..],
        _ => raw,
    }
}

fn filter_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| keep_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn keep_line(line: &str) -> bool {
    if line.is_empty() {
        return false;
    }

    let lowered = line.to_lowercase();
    if JUNK_PHRASES
        .iter()
        .any(|phrase| lowered.contains(&phrase.to_lowercase()))
    {
        return false;
    }

    !(line.chars().count() > MAX_UNTAGGED_LINE_CHARS && !bracket_tag_regex().is_match(line))
}

/// Isolate every bracketed tag on its own line and collapse blank-line runs.
///
/// Stable under re-application: formatting already formatted text is a no-op.
pub fn format_markers(text: &str) -> String {
    let spaced = tag_with_padding_regex().replace_all(text, "\n\n$1\n\n");
    blank_run_regex()
        .replace_all(&spaced, "\n\n")
        .trim()
        .to_string()
}
