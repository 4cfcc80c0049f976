//! CLI command implementations.

mod build;
mod categories;
mod dev;
mod list;
mod search;
mod show;

pub use build::build_site;
pub use categories::list_categories;
pub use dev::dev_server;
pub use list::{list_posts, ListOptions};
pub use search::search_posts;
pub use show::show_post;
