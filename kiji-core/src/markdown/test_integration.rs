//! End-to-end checks across the renderer, TOC extractor, and reducer.

use crate::markdown::MarkdownProcessor;
use crate::plaintext::to_plain_text;
use crate::toc::extract_toc;

const ARTICLE: &str = r#"# Release notes

Intro paragraph with **bold** and a [link](https://example.com).

## Getting started

Some setup prose.

```bash filename="install.sh"
cargo install kiji
```

### Getting started

Same heading text again, deeper.

## Reference

<aside>raw html stays</aside>

```text
no language label here
```
"#;

#[test]
fn renderer_anchors_match_toc_ids() {
    let processor = MarkdownProcessor::new();
    let html = processor.render(ARTICLE);
    let toc = extract_toc(ARTICLE);

    assert_eq!(toc.len(), 3);
    for item in &toc {
        let anchor = format!("id=\"{}\"", item.id);
        assert!(html.contains(&anchor), "missing anchor for {:?}", item);
    }
}

#[test]
fn repeated_heading_text_disambiguates_in_both() {
    let toc = extract_toc(ARTICLE);
    let ids: Vec<&str> = toc.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["getting-started", "getting-started-1", "reference"]);

    let html = MarkdownProcessor::new().render(ARTICLE);
    assert!(html.contains(r#"<h2 id="getting-started">"#));
    assert!(html.contains(r#"<h3 id="getting-started-1">"#));
}

#[test]
fn code_blocks_are_wrapped_with_headers() {
    let html = MarkdownProcessor::new().render(ARTICLE);
    assert_eq!(html.matches("data-code-block=\"true\"").count(), 2);
    assert!(html.contains(r#"<span class="code-block__filename">install.sh</span>"#));
    assert_eq!(html.matches("data-code-copy=\"true\"").count(), 2);
}

#[test]
fn raw_html_survives_rendering() {
    let html = MarkdownProcessor::new().render(ARTICLE);
    assert!(html.contains("<aside>raw html stays</aside>"));
}

#[test]
fn reduced_text_is_searchable() {
    let text = to_plain_text(ARTICLE);
    assert!(text.contains("Getting started"));
    assert!(text.contains("link"));
    assert!(!text.contains("cargo install"));
    assert!(!text.contains("https://example.com"));
    assert!(!text.contains('#'));
}

#[test]
fn rendering_is_deterministic() {
    let processor = MarkdownProcessor::new();
    assert_eq!(processor.render(ARTICLE), processor.render(ARTICLE));
}
