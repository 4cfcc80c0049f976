//! Slug generation and per-document collision handling.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

static HYPHEN_RUN: OnceLock<Regex> = OnceLock::new();

fn hyphen_run() -> &'static Regex {
    HYPHEN_RUN.get_or_init(|| Regex::new(r"-+").unwrap())
}

/// Convert a string to a URL-safe slug
///
/// Rules:
/// - Lowercase
/// - Replace whitespace and underscores with hyphens
/// - Remove special characters (except hyphens)
/// - Collapse multiple hyphens
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use kiji_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Rust & Safety"), "rust-safety");
/// assert_eq!(slugify("C++ Programming"), "c-programming");
/// ```
pub fn slugify(input: &str) -> String {
    let lowercased = input.to_lowercase();

    let with_hyphens = lowercased
        .graphemes(true)
        .map(|g| match g {
            " " | "_" | "\t" | "\n" => "-",
            _ => g,
        })
        .collect::<String>();

    // Keep ASCII alphanumerics, hyphens, and unicode alphabetics
    let cleaned = with_hyphens
        .graphemes(true)
        .filter_map(|g| {
            let c = g.chars().next()?;
            if c.is_ascii_alphanumeric() || c == '-' || c.is_alphabetic() {
                Some(g)
            } else {
                None
            }
        })
        .collect::<String>();

    let collapsed = hyphen_run().replace_all(&cleaned, "-");

    collapsed.trim_matches('-').to_string()
}

/// Document-scoped slugger that keeps heading anchors unique.
///
/// The first occurrence of a slug is used as-is; repeats get a numeric
/// suffix (`intro`, `intro-1`, `intro-2`, ...). Generated slugs are also
/// reserved, so a later heading that literally slugs to `intro-1` cannot
/// collide with a suffix handed out earlier.
#[derive(Debug, Default)]
pub struct Slugger {
    taken: HashSet<String>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug `text` and return an identifier unused so far in this document.
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut candidate = base.clone();
        let mut suffix = 0usize;

        while self.taken.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}-{}", base, suffix);
        }

        self.taken.insert(candidate.clone());
        candidate
    }
}
