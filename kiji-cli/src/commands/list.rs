//! List command implementation.

use anyhow::{Context, Result};
use kiji_core::{format_date, Config, ContentStore, PostQuery};
use serde_json::json;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ListOptions {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: usize,
    pub json: bool,
}

/// List posts in index order, with optional filters and pagination.
pub fn list_posts(config_path: &Path, opts: ListOptions) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let store = ContentStore::from_config(&config);

    let listing = store.query(&PostQuery {
        category: opts.category.clone(),
        search: opts.search.clone(),
        page: opts.page,
    });

    if opts.json {
        let payload = json!({
            "page": listing.page,
            "requested_page": listing.requested_page,
            "total_pages": listing.total_pages,
            "total_matches": listing.total_matches,
            "posts": listing.items,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if listing.items.is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    println!(
        "Page {} / {} ({} posts total)\n",
        listing.page, listing.total_pages, listing.total_matches
    );
    for post in &listing.items {
        let category = if post.category.is_empty() {
            "-"
        } else {
            post.category.as_str()
        };
        println!("{}  [{}] {}", format_date(&post.date), category, post.title);
        println!("  /posts/{}/", post.slug);
        if !post.description.is_empty() {
            println!("  {}", post.description);
        }
        println!();
    }

    Ok(())
}
