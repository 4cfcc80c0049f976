use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_site(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let posts = root.join("content/posts");
    fs::create_dir_all(&posts)?;

    fs::write(
        root.join("kiji.yml"),
        "site:\n  title: \"Test Blog\"\n  description: \"Desc\"\n  url: \"https://example.com\"\n",
    )?;

    fs::write(
        posts.join("a-post.md"),
        "---\ntitle: A Post\ndate: 2024-01-01\ncategory: Rust\n---\n\nalpha body\n",
    )?;
    fs::write(
        posts.join("b-post.md"),
        "---\ntitle: B Post\ndate: 2024-06-01\ncategory: Go\n---\n\nbeta body\n",
    )?;
    fs::write(
        posts.join("undated.md"),
        "---\ntitle: Undated\ndate: oops\n---\n\ngamma body\n",
    )?;

    Ok(())
}

#[test]
fn list_json_is_sorted_newest_first() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    #[allow(deprecated)]
    let assert = Command::cargo_bin("kiji")?
        .current_dir(dir.path())
        .args(["list", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;

    assert_eq!(value["page"], 1);
    assert_eq!(value["total_pages"], 1);
    assert_eq!(value["total_matches"], 3);

    let slugs: Vec<&str> = value["posts"]
        .as_array()
        .expect("posts array")
        .iter()
        .map(|p| p["slug"].as_str().expect("slug"))
        .collect();
    // Newest first; the unparseable date sinks to the end
    assert_eq!(slugs, vec!["b-post", "a-post", "undated"]);

    Ok(())
}

#[test]
fn list_filters_by_category_case_insensitively() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    #[allow(deprecated)]
    let assert = Command::cargo_bin("kiji")?
        .current_dir(dir.path())
        .args(["list", "--category", "rust", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["total_matches"], 1);
    assert_eq!(value["posts"][0]["slug"], "a-post");

    Ok(())
}

#[test]
fn list_clamps_out_of_range_page() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    #[allow(deprecated)]
    let assert = Command::cargo_bin("kiji")?
        .current_dir(dir.path())
        .args(["list", "--page", "99", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["requested_page"], 99);
    assert_eq!(value["page"], 1);

    Ok(())
}

#[test]
fn list_on_empty_source_reports_no_posts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("kiji.yml"), "site:\n  title: Empty\n")?;

    #[allow(deprecated)]
    Command::cargo_bin("kiji")?
        .current_dir(dir.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicates::str::contains("No posts found."));

    Ok(())
}
