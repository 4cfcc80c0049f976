//! Markdown rendering pipeline.
//!
//! Rendering is an explicit sequence of pure stages over the parsed event
//! vector: outline collection, heading-id attachment, code-block
//! enrichment, HTML serialization. The stage order is load-bearing —
//! heading ids must exist before serialization, and code blocks are
//! replaced wholesale before the HTML pass ever sees them.

pub mod codeblock;
pub mod highlight;

#[cfg(test)]
mod test_integration;

use crate::models::TocItem;
use crate::slug::Slugger;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Markdown to HTML converter.
///
/// Pure with respect to its input; a single processor is safe to share
/// across concurrent renders.
pub struct MarkdownProcessor {
    options: Options,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        Self {
            options: default_options(),
        }
    }

    /// Convert a Markdown body into an HTML string.
    ///
    /// Raw embedded HTML passes through verbatim. Level-2/3 headings get
    /// anchor ids matching [`crate::toc::extract_toc`] output for the same
    /// input.
    pub fn render(&self, markdown: &str) -> String {
        let events: Vec<Event<'_>> = Parser::new_ext(markdown, self.options).collect();

        let outline = outline_from_events(&events);
        let events = attach_heading_ids(events, &outline);
        let events = codeblock::transform(events);

        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        out
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn default_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// Collect the document outline: level-2/3 headings in document order,
/// each with a collision-free anchor id.
///
/// Both the renderer and the TOC extractor go through this function, which
/// is what keeps their ids byte-identical.
pub(crate) fn outline_from_events(events: &[Event<'_>]) -> Vec<TocItem> {
    let mut slugger = Slugger::new();
    let mut items = Vec::new();
    let mut current: Option<(u8, String)> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let depth = *level as u8;
                if depth == 2 || depth == 3 {
                    current = Some((depth, String::new()));
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buffer)) = current.as_mut() {
                    buffer.push_str(text.as_ref());
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = current.take() {
                    items.push(TocItem {
                        id: slugger.slug(&text),
                        text,
                        level,
                    });
                }
            }
            _ => {}
        }
    }

    items
}

/// Attach outline ids to level-2/3 heading tags, in document order.
pub(crate) fn attach_heading_ids<'a>(
    events: Vec<Event<'a>>,
    outline: &[TocItem],
) -> Vec<Event<'a>> {
    let mut ids = outline.iter();
    let mut result = Vec::with_capacity(events.len());

    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) if matches!(level as u8, 2 | 3) => {
                let id = id.or_else(|| ids.next().map(|item| CowStr::from(item.id.clone())));
                result.push(Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }));
            }
            other => result.push(other),
        }
    }

    result
}

pub(crate) fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
