//! # kiji-render
//!
//! Template rendering library for the kiji blog engine.
//!
//! Thin presentation glue: the templates consume what the core pipeline
//! produces (post records, rendered HTML, outlines, category counts) and
//! lay it out. No content logic lives here.

pub mod templates;

pub use templates::{
    render_toc_html, CategoryEntry, IndexTemplate, NotFoundTemplate, PageTemplate, PostEntry,
    PostTemplate,
};
