//! Build command implementation.

use anyhow::{Context, Result};
use askama::Template;
use include_dir::{include_dir, Dir};
use kiji_core::models::parse_date;
use kiji_core::{
    extract_toc, format_date, slugify, Config, ContentStore, MarkdownProcessor, PostMeta,
    PostQuery,
};
use kiji_render::{
    render_toc_html, CategoryEntry, IndexTemplate, NotFoundTemplate, PageTemplate, PostEntry,
    PostTemplate,
};
use serde::Serialize;
use std::fs;
use std::path::Path;

// Embed CSS/JS assets at compile time so they're available after cargo install
static STATIC_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");

/// Entry of the search-index.json artifact the listing pages search over.
#[derive(Debug, Serialize)]
struct SearchIndexEntry {
    slug: String,
    url: String,
    title: String,
    date: String,
    category: String,
    description: String,
    text: String,
}

/// Build the static site into the configured output directory.
pub fn build_site(config_path: &Path) -> Result<()> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let base_url = config.normalized_base_url();
    let store = ContentStore::from_config(&config);
    let processor = MarkdownProcessor::new();

    tracing::info!("Building site: {}", config.site.title);

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    let posts = store.posts();
    let categories: Vec<CategoryEntry> = store
        .category_counts()
        .iter()
        .map(|count| CategoryEntry::from_count(count, &base_url))
        .collect();

    // Paginated listings: the front page plus one set per category
    render_listing_pages(&config, &store, &categories, &base_url, None)?;
    for count in store.category_counts() {
        render_listing_pages(&config, &store, &categories, &base_url, Some(&count.name))?;
    }

    for position in 0..posts.len() {
        render_post_page(
            &config,
            &store,
            &processor,
            &posts,
            position,
            &categories,
            &base_url,
        )
        .with_context(|| format!("Failed to render post '{}'", posts[position].slug))?;
    }

    for page in store.pages() {
        render_standalone_page(&config, &processor, &base_url, &page)
            .with_context(|| format!("Failed to render page '{}'", page.meta.slug))?;
    }

    render_404_page(&config, &base_url)?;
    generate_search_index(&config, &store, &base_url)?;
    generate_sitemap(&config, &store)?;
    copy_assets(&config)?;

    tracing::info!("✓ Built {} posts", posts.len());
    tracing::info!("✓ Output written to {:?}", output_dir);

    Ok(())
}

/// Directory of a listing page relative to the output root.
///
/// Page 1 lives at the listing root; later pages under `page/<n>/`.
fn listing_rel_dir(category: Option<&str>, page: usize) -> String {
    let prefix = match category {
        Some(name) => format!("category/{}/", slugify(name)),
        None => String::new(),
    };
    if page <= 1 {
        prefix
    } else {
        format!("{}page/{}/", prefix, page)
    }
}

fn render_listing_pages(
    config: &Config,
    store: &ContentStore,
    categories: &[CategoryEntry],
    base_url: &str,
    category: Option<&str>,
) -> Result<()> {
    let heading = match category {
        Some(name) => format!("Category: {}", name),
        None => String::from("Latest posts"),
    };

    let mut page = 1;
    loop {
        let listing = store.query(&PostQuery {
            category: category.map(|c| c.to_string()),
            search: None,
            page,
        });

        let has_prev = listing.page > 1;
        let has_next = listing.page < listing.total_pages;

        let template = IndexTemplate {
            site_title: config.site.title.clone(),
            site_description: config.site.description.clone(),
            base_url: base_url.to_string(),
            heading: heading.clone(),
            posts: listing
                .items
                .iter()
                .map(|meta| PostEntry::from_meta(meta, base_url))
                .collect(),
            categories: categories.to_vec(),
            page: listing.page,
            total_pages: listing.total_pages,
            has_prev,
            prev_url: format!(
                "{}{}",
                base_url,
                listing_rel_dir(category, listing.page.saturating_sub(1))
            ),
            has_next,
            next_url: format!("{}{}", base_url, listing_rel_dir(category, listing.page + 1)),
        };

        let out = config
            .output_dir()
            .join(listing_rel_dir(category, listing.page))
            .join("index.html");
        write_page(&out, &template.render()?)?;

        if page >= listing.total_pages {
            break;
        }
        page += 1;
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn render_post_page(
    config: &Config,
    store: &ContentStore,
    processor: &MarkdownProcessor,
    posts: &[PostMeta],
    position: usize,
    categories: &[CategoryEntry],
    base_url: &str,
) -> Result<()> {
    let meta = &posts[position];
    let Some(post) = store.post_by_slug(&meta.slug) else {
        tracing::warn!("post '{}' disappeared during build, skipping", meta.slug);
        return Ok(());
    };

    let toc = extract_toc(&post.body);
    let toc_html = render_toc_html(&toc);
    let content = processor.render(&post.body);

    // Adjacent posts in index order (posts[0] is the newest)
    let newer = position
        .checked_sub(1)
        .map(|i| PostEntry::from_meta(&posts[i], base_url));
    let older = posts
        .get(position + 1)
        .map(|m| PostEntry::from_meta(m, base_url));
    let (has_newer, newer_url, newer_title, newer_date) = entry_fields(newer);
    let (has_older, older_url, older_title, older_date) = entry_fields(older);

    let template = PostTemplate {
        site_title: config.site.title.clone(),
        base_url: base_url.to_string(),
        title: post.meta.title.clone(),
        date: format_date(&post.meta.date),
        category: post.meta.category.clone(),
        has_category: !post.meta.category.trim().is_empty(),
        description: post.meta.description.clone(),
        content,
        has_toc: !toc_html.is_empty(),
        toc_html,
        categories: categories.to_vec(),
        has_newer,
        newer_url,
        newer_title,
        newer_date,
        has_older,
        older_url,
        older_title,
        older_date,
    };

    let out = config
        .output_dir()
        .join("posts")
        .join(&post.meta.slug)
        .join("index.html");
    write_page(&out, &template.render()?)
}

fn entry_fields(entry: Option<PostEntry>) -> (bool, String, String, String) {
    match entry {
        Some(entry) => (true, entry.url, entry.title, entry.date),
        None => (false, String::new(), String::new(), String::new()),
    }
}

fn render_standalone_page(
    config: &Config,
    processor: &MarkdownProcessor,
    base_url: &str,
    page: &kiji_core::Page,
) -> Result<()> {
    let template = PageTemplate {
        site_title: config.site.title.clone(),
        base_url: base_url.to_string(),
        title: page.meta.title.clone(),
        description: page.meta.description.clone(),
        content: processor.render(&page.body),
    };

    let out = config
        .output_dir()
        .join(&page.meta.slug)
        .join("index.html");
    write_page(&out, &template.render()?)
}

fn render_404_page(config: &Config, base_url: &str) -> Result<()> {
    let template = NotFoundTemplate {
        site_title: config.site.title.clone(),
        base_url: base_url.to_string(),
    };
    write_page(&config.output_dir().join("404.html"), &template.render()?)
}

fn generate_search_index(config: &Config, store: &ContentStore, base_url: &str) -> Result<()> {
    let entries: Vec<SearchIndexEntry> = store
        .posts_with_search_text()
        .into_iter()
        .map(|item| SearchIndexEntry {
            url: format!("{}posts/{}/", base_url, item.meta.slug),
            slug: item.meta.slug,
            title: item.meta.title,
            date: item.meta.date,
            category: item.meta.category,
            description: item.meta.description,
            text: item.search_text,
        })
        .collect();

    let json = serde_json::to_string(&entries).context("Failed to serialize search index")?;
    fs::write(config.output_dir().join("search-index.json"), json)?;

    tracing::info!("Generated search index with {} entries", entries.len());
    Ok(())
}

fn generate_sitemap(config: &Config, store: &ContentStore) -> Result<()> {
    let site_url = config.site.url.trim_end_matches('/');
    let base_url = config.normalized_base_url();

    let mut urls = String::new();
    urls.push_str(&format!("<url><loc>{}{}</loc></url>", site_url, base_url));

    for page in store.pages() {
        urls.push_str(&format!(
            "<url><loc>{}{}{}/</loc></url>",
            site_url, base_url, page.meta.slug
        ));
    }

    for meta in store.posts() {
        let lastmod = parse_date(&meta.date)
            .map(|d| format!("<lastmod>{}</lastmod>", d.format("%Y-%m-%d")))
            .unwrap_or_default();
        urls.push_str(&format!(
            "<url><loc>{}{}posts/{}/</loc>{}</url>",
            site_url, base_url, meta.slug, lastmod
        ));
    }

    let sitemap = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">{}</urlset>",
        urls
    );
    fs::write(config.output_dir().join("sitemap.xml"), sitemap)?;

    Ok(())
}

fn copy_assets(config: &Config) -> Result<()> {
    let assets_dir = config.output_dir().join("assets");
    fs::create_dir_all(&assets_dir)?;

    for file in STATIC_ASSETS.files() {
        let dest = assets_dir.join(file.path());
        fs::write(&dest, file.contents())
            .with_context(|| format!("Failed to write asset {:?}", dest))?;
    }

    Ok(())
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {:?}", path))
}
