//! Directory-backed content index.

use crate::config::Config;
use crate::frontmatter;
use crate::models::{compare_posts, CategoryCount, Page, Post, PostMeta, PostSearchItem};
use crate::plaintext::to_plain_text;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default number of posts per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Filter and pagination parameters for a post listing query.
#[derive(Debug, Clone)]
pub struct PostQuery {
    /// Case-insensitive exact category match.
    pub category: Option<String>,
    /// Case-insensitive substring over title, description, and body text.
    pub search: Option<String>,
    /// 1-based page number; out-of-range values are clamped.
    pub page: usize,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            category: None,
            search: None,
            page: 1,
        }
    }
}

/// One page of a filtered post listing.
#[derive(Debug, Clone)]
pub struct PostListing {
    pub items: Vec<PostMeta>,
    /// The served page, clamped into `[1, total_pages]`.
    pub page: usize,
    /// The page the caller asked for; differs from `page` when clamped.
    /// Whether to redirect on the difference is the caller's policy.
    pub requested_page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// Content index over a posts directory and a pages directory.
///
/// The source is re-read on every call: queries always reflect what is on
/// disk and there is no cache to invalidate. Per-query cost is proportional
/// to total content size — content changes via redeploy, not at runtime.
pub struct ContentStore {
    posts_dir: PathBuf,
    pages_dir: PathBuf,
    page_size: usize,
}

impl ContentStore {
    pub fn new(posts_dir: impl Into<PathBuf>, pages_dir: impl Into<PathBuf>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            pages_dir: pages_dir.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            posts_dir: config.posts_dir(),
            pages_dir: config.pages_dir(),
            page_size: config.page_size,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// All posts, newest first. A missing posts directory yields an empty
    /// list, not an error.
    pub fn posts(&self) -> Vec<PostMeta> {
        let mut posts: Vec<PostMeta> = self
            .read_post_files()
            .into_iter()
            .map(|(slug, contents)| frontmatter::parse_post(&contents, &slug).0)
            .collect();
        posts.sort_by(compare_posts);
        posts
    }

    /// All posts paired with reduced body text, newest first.
    pub fn posts_with_search_text(&self) -> Vec<PostSearchItem> {
        let mut items: Vec<PostSearchItem> = self
            .read_post_files()
            .into_iter()
            .map(|(slug, contents)| {
                let (meta, body) = frontmatter::parse_post(&contents, &slug);
                PostSearchItem {
                    meta,
                    search_text: to_plain_text(&body),
                }
            })
            .collect();
        items.sort_by(|a, b| compare_posts(&a.meta, &b.meta));
        items
    }

    /// Slugs of all posts in listing order.
    pub fn post_slugs(&self) -> Vec<String> {
        self.posts().into_iter().map(|meta| meta.slug).collect()
    }

    /// Look up one post by slug.
    ///
    /// Files are scanned in lexicographic filename order and the first
    /// matching slug wins, so duplicate slugs resolve deterministically.
    pub fn post_by_slug(&self, slug: &str) -> Option<Post> {
        for (file_slug, contents) in self.read_post_files() {
            let (meta, body) = frontmatter::parse_post(&contents, &file_slug);
            if meta.slug == slug {
                return Some(Post { meta, body });
            }
        }
        None
    }

    /// All standalone pages in filename order.
    pub fn pages(&self) -> Vec<Page> {
        read_markdown_dir(&self.pages_dir)
            .into_iter()
            .map(|(slug, contents)| {
                let (meta, body) = frontmatter::parse_page(&contents, &slug);
                Page { meta, body }
            })
            .collect()
    }

    /// Look up one page by slug (a direct `<slug>.md` read).
    pub fn page_by_slug(&self, slug: &str) -> Option<Page> {
        let path = self.pages_dir.join(format!("{}.md", slug));
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(_) => return None,
        };
        let (mut meta, body) = frontmatter::parse_page(&contents, slug);
        // The routed slug is authoritative for direct lookups
        meta.slug = slug.to_string();
        Some(Page { meta, body })
    }

    /// Post counts per trimmed category, most posts first, name ascending
    /// tiebreak. Posts with an empty category are not represented.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for post in self.posts() {
            let category = post.category.trim();
            if category.is_empty() {
                continue;
            }
            *counts.entry(category.to_string()).or_insert(0) += 1;
        }

        let mut counts: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(name, count)| CategoryCount { name, count })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        counts
    }

    /// All posts matching `query`, unpaginated, newest first.
    pub fn search(&self, query: &str) -> Vec<PostMeta> {
        self.filter_posts(None, Some(query))
    }

    /// Filtered, paginated listing.
    pub fn query(&self, query: &PostQuery) -> PostListing {
        let matches = self.filter_posts(query.category.as_deref(), query.search.as_deref());

        let total_matches = matches.len();
        let total_pages = total_matches.div_ceil(self.page_size).max(1);
        let page = query.page.clamp(1, total_pages);
        let items = matches
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .collect();

        PostListing {
            items,
            page,
            requested_page: query.page,
            total_pages,
            total_matches,
        }
    }

    /// Category filter: case-insensitive exact match on the trimmed name.
    /// Search: case-insensitive substring over title + description + body
    /// text. No tokenization, no ranking.
    fn filter_posts(&self, category: Option<&str>, search: Option<&str>) -> Vec<PostMeta> {
        let category = category.map(|c| c.trim().to_lowercase());
        let search = search.map(|s| s.to_lowercase());

        self.posts_with_search_text()
            .into_iter()
            .filter(|item| {
                if let Some(want) = &category {
                    if item.meta.category.trim().to_lowercase() != *want {
                        return false;
                    }
                }
                if let Some(needle) = &search {
                    let haystack = format!(
                        "{} {} {}",
                        item.meta.title, item.meta.description, item.search_text
                    )
                    .to_lowercase();
                    if !haystack.contains(needle.as_str()) {
                        return false;
                    }
                }
                true
            })
            .map(|item| item.meta)
            .collect()
    }

    fn read_post_files(&self) -> Vec<(String, String)> {
        read_markdown_dir(&self.posts_dir)
    }
}

/// Read every `.md` file directly inside `dir` as (filename stem,
/// contents), in lexicographic filename order. A missing directory yields
/// nothing; unreadable entries are skipped with a warning.
fn read_markdown_dir(dir: &Path) -> Vec<(String, String)> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        match fs::read_to_string(path) {
            Ok(contents) => files.push((stem.to_string(), contents)),
            Err(err) => {
                tracing::warn!("skipping unreadable content file {:?}: {}", path, err);
            }
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_post(dir: &Path, file: &str, frontmatter: &str, body: &str) {
        fs::write(
            dir.join(file),
            format!("---\n{}---\n\n{}\n", frontmatter, body),
        )
        .unwrap();
    }

    fn store_with_posts(posts: &[(&str, &str, &str)]) -> (tempfile::TempDir, ContentStore) {
        let dir = tempdir().unwrap();
        let posts_dir = dir.path().join("posts");
        let pages_dir = dir.path().join("pages");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::create_dir_all(&pages_dir).unwrap();
        for (file, frontmatter, body) in posts {
            write_post(&posts_dir, file, frontmatter, body);
        }
        let store = ContentStore::new(&posts_dir, &pages_dir);
        (dir, store)
    }

    #[test]
    fn test_posts_sorted_newest_first_with_slug_tiebreak() {
        let (_tmp, store) = store_with_posts(&[
            ("b-post.md", "title: B\ndate: 2024-01-01\n", "b"),
            ("a-post.md", "title: A\ndate: 2024-01-01\n", "a"),
            ("broken.md", "title: Broken\ndate: oops\n", "x"),
            ("newest.md", "title: New\ndate: 2024-06-01\n", "n"),
        ]);
        let slugs: Vec<String> = store.posts().into_iter().map(|p| p.slug).collect();
        assert_eq!(slugs, vec!["newest", "a-post", "b-post", "broken"]);
    }

    #[test]
    fn test_missing_directory_is_empty_not_error() {
        let dir = tempdir().unwrap();
        let store = ContentStore::new(dir.path().join("nope"), dir.path().join("also-nope"));
        assert!(store.posts().is_empty());
        assert!(store.category_counts().is_empty());
        assert!(store.post_by_slug("anything").is_none());
        assert!(store.page_by_slug("anything").is_none());
        let listing = store.query(&PostQuery::default());
        assert_eq!(listing.total_pages, 1);
        assert!(listing.items.is_empty());
    }

    #[test]
    fn test_category_counts_order() {
        let (_tmp, store) = store_with_posts(&[
            ("p1.md", "title: One\ndate: 2024-01-01\ncategory: Go\n", ""),
            ("p2.md", "title: Two\ndate: 2024-01-02\ncategory: Go\n", ""),
            ("p3.md", "title: Three\ndate: 2024-01-03\ncategory: Rust\n", ""),
            ("p4.md", "title: Four\ndate: 2024-01-04\n", ""),
        ]);
        let counts = store.category_counts();
        assert_eq!(
            counts,
            vec![
                CategoryCount {
                    name: "Go".into(),
                    count: 2
                },
                CategoryCount {
                    name: "Rust".into(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_category_count_tiebreak_is_name_ascending() {
        let (_tmp, store) = store_with_posts(&[
            ("p1.md", "title: One\ncategory: Zig\n", ""),
            ("p2.md", "title: Two\ncategory: Ada\n", ""),
        ]);
        let names: Vec<String> = store.category_counts().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Ada", "Zig"]);
    }

    #[test]
    fn test_pagination_clamps_and_slices() {
        let posts: Vec<(String, String)> = (1..=13)
            .map(|i| {
                (
                    format!("post-{:02}.md", i),
                    format!("title: Post {}\ndate: 2024-01-01\n", i),
                )
            })
            .collect();
        let posts_ref: Vec<(&str, &str, &str)> = posts
            .iter()
            .map(|(file, fm)| (file.as_str(), fm.as_str(), ""))
            .collect();
        let (_tmp, store) = store_with_posts(&posts_ref);

        let first = store.query(&PostQuery::default());
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_matches, 13);
        assert_eq!(first.items.len(), 6);

        let zero = store.query(&PostQuery {
            page: 0,
            ..Default::default()
        });
        assert_eq!(zero.page, 1);
        assert_eq!(zero.requested_page, 0);

        let beyond = store.query(&PostQuery {
            page: 99,
            ..Default::default()
        });
        assert_eq!(beyond.page, 3);
        assert_eq!(beyond.items.len(), 1);

        let second = store.query(&PostQuery {
            page: 2,
            ..Default::default()
        });
        let slugs: Vec<String> = second.items.into_iter().map(|p| p.slug).collect();
        assert_eq!(
            slugs,
            vec!["post-07", "post-08", "post-09", "post-10", "post-11", "post-12"]
        );
    }

    #[test]
    fn test_search_matches_title_case_insensitively() {
        let (_tmp, store) = store_with_posts(&[
            (
                "perf.md",
                "title: Performance tips\ndescription: measure first\n",
                "profile the slow path",
            ),
            ("other.md", "title: Unrelated\n", "nothing to see"),
        ]);

        for query in ["perf", "PERF"] {
            let listing = store.query(&PostQuery {
                search: Some(query.to_string()),
                ..Default::default()
            });
            assert_eq!(listing.total_matches, 1, "query {:?}", query);
            assert_eq!(listing.items[0].slug, "perf");
        }
    }

    #[test]
    fn test_search_reaches_body_text_but_not_code() {
        let (_tmp, store) = store_with_posts(&[(
            "p.md",
            "title: T\n",
            "prose keyword here\n\n```\ncode_only_token\n```\n",
        )]);
        let hit = store.query(&PostQuery {
            search: Some("keyword".into()),
            ..Default::default()
        });
        assert_eq!(hit.total_matches, 1);

        let miss = store.query(&PostQuery {
            search: Some("code_only_token".into()),
            ..Default::default()
        });
        assert_eq!(miss.total_matches, 0);
    }

    #[test]
    fn test_category_filter_exact_case_insensitive() {
        let (_tmp, store) = store_with_posts(&[
            ("p1.md", "title: One\ncategory: Next.js\n", ""),
            ("p2.md", "title: Two\ncategory: PHP\n", ""),
        ]);
        let listing = store.query(&PostQuery {
            category: Some("next.js".into()),
            ..Default::default()
        });
        assert_eq!(listing.total_matches, 1);
        assert_eq!(listing.items[0].slug, "p1");

        // Substrings are not category matches
        let none = store.query(&PostQuery {
            category: Some("next".into()),
            ..Default::default()
        });
        assert_eq!(none.total_matches, 0);
    }

    #[test]
    fn test_post_by_slug_prefers_lexicographic_first_file() {
        let (_tmp, store) = store_with_posts(&[
            ("z-file.md", "title: From Z\nslug: shared\n", "z body"),
            ("a-file.md", "title: From A\nslug: shared\n", "a body"),
        ]);
        let post = store.post_by_slug("shared").unwrap();
        assert_eq!(post.meta.title, "From A");
    }

    #[test]
    fn test_post_by_slug_falls_back_to_filename() {
        let (_tmp, store) = store_with_posts(&[("hello-world.md", "title: Hi\n", "body")]);
        let post = store.post_by_slug("hello-world").unwrap();
        assert_eq!(post.meta.title, "Hi");
        assert!(store.post_by_slug("missing").is_none());
    }

    #[test]
    fn test_page_by_slug_reads_direct_file() {
        let dir = tempdir().unwrap();
        let pages_dir = dir.path().join("pages");
        fs::create_dir_all(&pages_dir).unwrap();
        fs::write(
            pages_dir.join("about.md"),
            "---\ntitle: About\n---\n\n## Hello\n",
        )
        .unwrap();
        let store = ContentStore::new(dir.path().join("posts"), &pages_dir);

        let page = store.page_by_slug("about").unwrap();
        assert_eq!(page.meta.title, "About");
        assert_eq!(page.meta.slug, "about");
        assert!(page.body.contains("## Hello"));

        let pages = store.pages();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].meta.slug, "about");
    }

    #[test]
    fn test_search_returns_all_matches_unpaginated() {
        let posts: Vec<(String, String)> = (1..=8)
            .map(|i| {
                (
                    format!("post-{:02}.md", i),
                    format!("title: Common topic {}\n", i),
                )
            })
            .collect();
        let posts_ref: Vec<(&str, &str, &str)> = posts
            .iter()
            .map(|(file, fm)| (file.as_str(), fm.as_str(), ""))
            .collect();
        let (_tmp, store) = store_with_posts(&posts_ref);

        assert_eq!(store.search("common").len(), 8);
        assert!(store.search("absent").is_empty());
    }

    #[test]
    fn test_non_markdown_files_ignored() {
        let (_tmp, store) = store_with_posts(&[("real.md", "title: Real\n", "")]);
        // Drop a stray file next to the posts
        let posts_dir = store.posts_dir.clone();
        fs::write(posts_dir.join("notes.txt"), "not content").unwrap();
        assert_eq!(store.posts().len(), 1);
    }
}
