//! Categories command implementation.

use anyhow::{Context, Result};
use kiji_core::{Config, ContentStore};
use std::path::Path;

/// Print category counts, most posts first.
pub fn list_categories(config_path: &Path, json: bool) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let store = ContentStore::from_config(&config);

    let counts = store.category_counts();

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    if counts.is_empty() {
        println!("No categories.");
        return Ok(());
    }

    for count in &counts {
        println!("{:>4}  {}", count.count, count.name);
    }

    Ok(())
}
