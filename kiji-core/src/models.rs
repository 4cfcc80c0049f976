//! Content model structs for posts, pages, and derived listings.

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Frontmatter metadata for a blog post.
///
/// Every field is a plain string; missing or malformed frontmatter leaves a
/// field empty rather than failing the load. `slug` always carries a value —
/// the filename stem when the frontmatter does not provide one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMeta {
    pub title: String,

    /// ISO-ish date string as written by the author; may be malformed.
    pub date: String,

    pub category: String,

    pub description: String,

    /// URL-safe identifier, unique across the content source by convention.
    pub slug: String,
}

impl PostMeta {
    /// Sort key in seconds since the epoch. Unparseable dates collapse to
    /// zero so they sink to the end of date-descending listings.
    pub fn sort_timestamp(&self) -> i64 {
        parse_date(&self.date)
            .map(|d| d.and_time(NaiveTime::MIN).and_utc().timestamp())
            .unwrap_or(0)
    }
}

/// Frontmatter metadata for a standalone page (no date, no category).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub slug: String,
}

/// A post with its raw Markdown body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub meta: PostMeta,
    pub body: String,
}

/// A page with its raw Markdown body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub meta: PageMeta,
    pub body: String,
}

/// A post paired with its reduced plain body text for substring search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSearchItem {
    pub meta: PostMeta,
    pub search_text: String,
}

/// Number of posts in one category. Derived on each query, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// One entry of a document outline.
///
/// `id` matches the anchor the renderer assigns to the same heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    pub id: String,
    pub text: String,
    /// Heading depth, 2 or 3. Other levels are never collected.
    pub level: u8,
}

/// Total order for post listings: date descending, slug ascending tiebreak.
///
/// Two posts compare equal only when their slugs are equal.
pub fn compare_posts(a: &PostMeta, b: &PostMeta) -> Ordering {
    b.sort_timestamp()
        .cmp(&a.sort_timestamp())
        .then_with(|| a.slug.cmp(&b.slug))
}

/// Parse an author-written date string.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` / `YYYY/MM/DD` dates.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    None
}

/// Format a date string as `YYYY/MM/DD` for display.
///
/// Unparseable input is echoed back untouched.
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%Y/%m/%d").to_string(),
        None => raw.to_string(),
    }
}
