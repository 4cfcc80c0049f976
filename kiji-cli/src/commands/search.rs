//! Search command implementation.

use anyhow::{Context, Result};
use kiji_core::{format_date, Config, ContentStore};
use std::path::Path;

/// Search posts by case-insensitive substring over title, description, and
/// body text.
pub fn search_posts(config_path: &Path, query: &str, json: bool) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let store = ContentStore::from_config(&config);

    let results = store.search(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results found for '{}'", query);
        return Ok(());
    }

    println!("Found {} results for '{}':\n", results.len(), query);
    for post in &results {
        println!("{}  {}", format_date(&post.date), post.title);
        println!("  /posts/{}/", post.slug);
        if !post.description.is_empty() {
            println!("  {}", post.description);
        }
        println!();
    }

    Ok(())
}
