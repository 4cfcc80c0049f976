//! Preview server for the build output.

use super::build::build_site;
use anyhow::{Context, Result};
use axum::Router;
use kiji_core::Config;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

/// Build the site, then serve the output directory locally.
pub async fn dev_server(config_path: &Path, port: Option<u16>) -> Result<()> {
    build_site(config_path)?;

    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let output_dir = config.output_dir();
    let port = port.unwrap_or(config.server.port);

    let not_found = ServeFile::new(output_dir.join("404.html"));
    let service = ServeDir::new(&output_dir).not_found_service(not_found);
    let app = Router::new().fallback_service(service);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    tracing::info!("Serving {:?} on port {}", output_dir, port);
    println!("Serving at http://localhost:{}", port);
    println!("Press Ctrl+C to stop");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
