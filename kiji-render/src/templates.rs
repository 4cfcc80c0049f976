//! Askama template definitions.

use askama::Template;
use kiji_core::{format_date, slugify, CategoryCount, PostMeta, TocItem};

/// A post entry for display in lists and prev/next navigation.
#[derive(Debug, Clone)]
pub struct PostEntry {
    pub url: String,
    pub title: String,
    pub date: String,
    pub category: String,
    pub description: String,
}

impl PostEntry {
    pub fn from_meta(meta: &PostMeta, base_url: &str) -> Self {
        Self {
            url: format!("{}posts/{}/", base_url, meta.slug),
            title: meta.title.clone(),
            date: format_date(&meta.date),
            category: meta.category.clone(),
            description: meta.description.clone(),
        }
    }
}

/// A sidebar category link with its post count.
#[derive(Debug, Clone)]
pub struct CategoryEntry {
    pub url: String,
    pub name: String,
    pub count: usize,
}

impl CategoryEntry {
    pub fn from_count(count: &CategoryCount, base_url: &str) -> Self {
        Self {
            url: format!("{}category/{}/", base_url, slugify(&count.name)),
            name: count.name.clone(),
            count: count.count,
        }
    }
}

/// Render a document outline to a `<nav>` fragment for the post sidebar.
///
/// Empty outlines render to an empty string; the template skips the block.
pub fn render_toc_html(items: &[TocItem]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut html = String::from(r#"<nav class="toc-nav"><h2>Contents</h2><ul class="toc-list">"#);
    for item in items {
        html.push_str(&format!(
            r##"<li class="toc-level-{}"><a href="#{}">{}</a></li>"##,
            item.level,
            item.id,
            html_escape(&item.text)
        ));
    }
    html.push_str("</ul></nav>");
    html
}

/// Listing page template: paginated post cards plus the category sidebar.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub site_title: String,
    pub site_description: String,
    pub base_url: String,

    /// Listing heading ("Latest posts" or the active category name).
    pub heading: String,

    pub posts: Vec<PostEntry>,
    pub categories: Vec<CategoryEntry>,

    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub prev_url: String,
    pub has_next: bool,
    pub next_url: String,
}

/// Post page template.
#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub site_title: String,
    pub base_url: String,

    pub title: String,
    pub date: String,
    pub category: String,
    pub has_category: bool,
    pub description: String,

    /// Trusted HTML from the renderer, inserted verbatim.
    pub content: String,

    /// Pre-rendered outline fragment; empty when the post has no headings.
    pub toc_html: String,
    pub has_toc: bool,

    pub categories: Vec<CategoryEntry>,

    pub has_newer: bool,
    pub newer_url: String,
    pub newer_title: String,
    pub newer_date: String,

    pub has_older: bool,
    pub older_url: String,
    pub older_title: String,
    pub older_date: String,
}

/// Standalone page template.
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub site_title: String,
    pub base_url: String,

    pub title: String,
    pub description: String,

    /// Trusted HTML from the renderer, inserted verbatim.
    pub content: String,
}

/// 404 error page template.
#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub site_title: String,
    pub base_url: String,
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
