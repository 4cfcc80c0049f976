//! Code block enrichment: filename annotations, highlighting, wrapping.

use super::{highlight, html_escape};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};
use regex::Regex;
use std::sync::OnceLock;

static FILENAME_QUOTED: OnceLock<Regex> = OnceLock::new();
static FILENAME_BARE: OnceLock<Regex> = OnceLock::new();

fn filename_quoted() -> &'static Regex {
    FILENAME_QUOTED.get_or_init(|| Regex::new(r#"filename="([^"]+)""#).unwrap())
}

fn filename_bare() -> &'static Regex {
    FILENAME_BARE.get_or_init(|| Regex::new(r"filename=(\S+)").unwrap())
}

/// Language and filename annotation parsed from a fence info string.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct CodeFence {
    pub lang: String,
    pub filename: Option<String>,
}

/// Parse a fence info string such as `rust filename="main.rs"`.
///
/// The first whitespace token is the language; a `filename="..."` or bare
/// `filename=...` annotation anywhere in the string names the file. An
/// unparseable annotation simply yields no filename.
pub(crate) fn parse_fence(info: &str) -> CodeFence {
    let lang = info
        .split_whitespace()
        .next()
        .filter(|token| !token.starts_with("filename="))
        .unwrap_or("")
        .to_string();

    let filename = filename_quoted()
        .captures(info)
        .or_else(|| filename_bare().captures(info))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    CodeFence { lang, filename }
}

/// Replace each code block with a highlighted, wrapped HTML fragment.
///
/// Sub-steps run in a fixed order per block: annotation extraction, syntax
/// highlighting, structural wrapping. A highlighter failure downgrades the
/// affected block to escaped plain text; the rest of the document renders
/// unchanged.
pub(crate) fn transform<'a>(events: Vec<Event<'a>>) -> Vec<Event<'a>> {
    let mut result = Vec::with_capacity(events.len());
    let mut block: Option<(CodeFence, String)> = None;

    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let fence = match kind {
                    CodeBlockKind::Fenced(info) => parse_fence(&info),
                    CodeBlockKind::Indented => CodeFence::default(),
                };
                block = Some((fence, String::new()));
            }
            Event::Text(text) if block.is_some() => {
                if let Some((_, code)) = block.as_mut() {
                    code.push_str(text.as_ref());
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((fence, code)) = block.take() {
                    let pre = highlight::highlight_block(&code, &fence.lang);
                    let wrapped = wrap_code_block(&pre, fence.filename.as_deref());
                    result.push(Event::Html(CowStr::from(wrapped)));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Wrap a rendered `<pre>` in the code-block container: a header row with
/// the filename label (or the literal "Code") and the copy trigger, then a
/// content row holding the block itself. The code content is untouched.
fn wrap_code_block(pre_html: &str, filename: Option<&str>) -> String {
    let label = html_escape(filename.unwrap_or("Code"));
    format!(
        "<div class=\"code-block\" data-code-block=\"true\">\
         <div class=\"code-block__header\">\
         <span class=\"code-block__filename\">{label}</span>\
         <button type=\"button\" class=\"code-block__copy\" data-code-copy=\"true\">Copy</button>\
         </div>\
         <div class=\"code-block__content\">{pre_html}</div>\
         </div>"
    )
}
