//! Show command implementation.

use anyhow::{Context, Result};
use kiji_core::{extract_toc, Config, ContentStore, MarkdownProcessor};
use serde_json::json;
use std::path::Path;

/// Render a single post: bare HTML to stdout, or a JSON envelope with
/// metadata, outline, and HTML.
pub fn show_post(config_path: &Path, slug: &str, json: bool) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let store = ContentStore::from_config(&config);

    let Some(post) = store.post_by_slug(slug) else {
        eprintln!("Post not found: {}", slug);
        std::process::exit(1);
    };

    let toc = extract_toc(&post.body);
    let html = MarkdownProcessor::new().render(&post.body);

    if json {
        let payload = json!({
            "meta": post.meta,
            "toc": toc,
            "html": html,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{}", html);
    }

    Ok(())
}
