//! Table-of-contents extraction.

use crate::markdown::{self, outline_from_events};
use crate::models::TocItem;
use pulldown_cmark::{Event, Parser};

/// Derive the outline of a Markdown body without rendering it.
///
/// Collects level-2 and level-3 headings in document order. Ids come from
/// the same outline collector the renderer uses, so an anchor link built
/// from a [`TocItem`] always resolves in the rendered HTML.
pub fn extract_toc(markdown: &str) -> Vec<TocItem> {
    let events: Vec<Event<'_>> = Parser::new_ext(markdown, markdown::default_options()).collect();
    outline_from_events(&events)
}
