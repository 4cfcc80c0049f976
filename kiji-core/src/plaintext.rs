//! Markdown to plain text reduction for search.

use regex::Regex;
use std::sync::OnceLock;

static FENCED_CODE: OnceLock<Regex> = OnceLock::new();
static INLINE_CODE: OnceLock<Regex> = OnceLock::new();
static IMAGE: OnceLock<Regex> = OnceLock::new();
static LINK: OnceLock<Regex> = OnceLock::new();
static HTML_TAG: OnceLock<Regex> = OnceLock::new();
static MARKER: OnceLock<Regex> = OnceLock::new();
static WHITESPACE: OnceLock<Regex> = OnceLock::new();

fn fenced_code() -> &'static Regex {
    FENCED_CODE.get_or_init(|| Regex::new(r"(?s)```.*?```").unwrap())
}

fn inline_code() -> &'static Regex {
    INLINE_CODE.get_or_init(|| Regex::new(r"`[^`]*`").unwrap())
}

fn image() -> &'static Regex {
    IMAGE.get_or_init(|| Regex::new(r"!\[[^\]]*\]\([^)]+\)").unwrap())
}

fn link() -> &'static Regex {
    LINK.get_or_init(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap())
}

fn html_tag() -> &'static Regex {
    HTML_TAG.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

fn marker() -> &'static Regex {
    MARKER.get_or_init(|| Regex::new(r"[#>*_~`]").unwrap())
}

fn whitespace() -> &'static Regex {
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Strip Markdown syntax from a body, leaving searchable prose.
///
/// The substitutions run in a fixed order — code before markers, links
/// before tags — because each step assumes the previous ones already ran.
/// Output is meant for case-insensitive substring search, not display.
pub fn to_plain_text(markdown: &str) -> String {
    let text = fenced_code().replace_all(markdown, " ");
    let text = inline_code().replace_all(&text, " ");
    let text = image().replace_all(&text, " ");
    let text = link().replace_all(&text, "$1");
    let text = html_tag().replace_all(&text, " ");
    let text = marker().replace_all(&text, " ");
    let text = whitespace().replace_all(&text, " ");
    text.trim().to_string()
}
