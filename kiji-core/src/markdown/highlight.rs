//! Code syntax highlighting using syntect.

use super::html_escape;
use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME: OnceLock<Theme> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> &'static Theme {
    THEME.get_or_init(|| {
        let theme_set = ThemeSet::load_defaults();
        // Fixed dark theme for all rendered code blocks
        theme_set
            .themes
            .get("base16-ocean.dark")
            .or_else(|| theme_set.themes.get("base16-eighties.dark"))
            .unwrap()
            .clone()
    })
}

/// Highlight one code block, returning a `<pre>` HTML fragment.
///
/// An empty or unrecognized language renders as plain text. A highlighter
/// failure falls back to the escaped, unhighlighted code for this block
/// only — it never fails the surrounding document.
pub(crate) fn highlight_block(code: &str, lang: &str) -> String {
    let ss = syntax_set();
    let syntax = if lang.is_empty() {
        ss.find_syntax_plain_text()
    } else {
        ss.find_syntax_by_token(lang)
            .or_else(|| ss.find_syntax_by_extension(lang))
            .unwrap_or_else(|| ss.find_syntax_plain_text())
    };

    match highlighted_html_for_string(code, ss, syntax, theme()) {
        Ok(html) => html,
        Err(err) => {
            tracing::warn!("syntax highlighting failed, using plain block: {}", err);
            format!("<pre><code>{}</code></pre>", html_escape(code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_known_language() {
        let html = highlight_block("fn main() {}", "rust");
        assert!(html.contains("<pre"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_unknown_language_degrades_to_plain() {
        let html = highlight_block("some words", "no-such-language");
        assert!(html.contains("<pre"));
        assert!(html.contains("some words"));
    }

    #[test]
    fn test_empty_language_is_plain_text() {
        let html = highlight_block("a < b", "");
        assert!(html.contains("<pre"));
        // The comparison operator must come out escaped, not as a tag
        assert!(html.contains("&lt;"));
    }
}
