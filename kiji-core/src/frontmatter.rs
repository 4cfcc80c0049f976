//! Frontmatter parsing from content files.
//!
//! Parsing is deliberately permissive: malformed frontmatter degrades to
//! empty metadata fields, never an error. A broken header must not take a
//! page render down with it.

use crate::models::{PageMeta, PostMeta};

const DELIMITER: &str = "---";

/// Parse a post file into metadata and the Markdown body.
///
/// `fallback_slug` is the filename stem; it fills `slug` whenever the
/// frontmatter does not provide one. All other fields default to `""`.
///
/// # Example
///
/// ```
/// use kiji_core::frontmatter::parse_post;
///
/// let raw = "---\ntitle: My Post\ndate: 2024-01-01\n---\n# Hello\n";
/// let (meta, body) = parse_post(raw, "my-post");
/// assert_eq!(meta.title, "My Post");
/// assert_eq!(meta.slug, "my-post");
/// assert!(body.starts_with("# Hello"));
/// ```
pub fn parse_post(raw: &str, fallback_slug: &str) -> (PostMeta, String) {
    let mut meta = PostMeta::default();
    let body = parse_fields(raw, |key, value| apply_post_field(&mut meta, key, value));
    if meta.slug.is_empty() {
        meta.slug = fallback_slug.to_string();
    }
    (meta, body)
}

/// Parse a page file into metadata and the Markdown body.
///
/// Pages carry no date or category; everything else behaves as
/// [`parse_post`].
pub fn parse_page(raw: &str, fallback_slug: &str) -> (PageMeta, String) {
    let mut meta = PageMeta::default();
    let body = parse_fields(raw, |key, value| apply_page_field(&mut meta, key, value));
    if meta.slug.is_empty() {
        meta.slug = fallback_slug.to_string();
    }
    (meta, body)
}

/// Known post fields, applied by name. Unknown keys are a no-op by contract.
fn apply_post_field(meta: &mut PostMeta, key: &str, value: &str) {
    match key {
        "title" => meta.title = value.to_string(),
        "date" => meta.date = value.to_string(),
        "category" => meta.category = value.to_string(),
        "description" => meta.description = value.to_string(),
        "slug" => meta.slug = value.to_string(),
        _ => {}
    }
}

/// Known page fields, applied by name. Unknown keys are a no-op by contract.
fn apply_page_field(meta: &mut PageMeta, key: &str, value: &str) {
    match key {
        "title" => meta.title = value.to_string(),
        "description" => meta.description = value.to_string(),
        "slug" => meta.slug = value.to_string(),
        _ => {}
    }
}

/// Split `raw` into frontmatter pairs and the body, feeding each pair to
/// `apply`, and return the body.
///
/// Without an opening `---` line, or without a closing one, the whole
/// (trimmed) text is the body and no pairs are produced.
fn parse_fields<F: FnMut(&str, &str)>(raw: &str, mut apply: F) -> String {
    let normalized = raw.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    if lines.first().copied() != Some(DELIMITER) {
        return normalized.trim().to_string();
    }

    let Some(close) = lines[1..].iter().position(|line| *line == DELIMITER) else {
        return normalized.trim().to_string();
    };
    let close = close + 1;

    for line in &lines[1..close] {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(colon) = line.find(':') else {
            continue;
        };
        let key = line[..colon].trim();
        let value = strip_quote_pair(line[colon + 1..].trim());
        apply(key, value);
    }

    lines[close + 1..].join("\n").trim_start().to_string()
}

/// Strip one matching pair of surrounding quote characters, if present.
fn strip_quote_pair(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
