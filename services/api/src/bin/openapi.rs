//! Writes the read API's OpenAPI document to disk.
//!
//! Usage: `openapi [OUTPUT]`. Without an argument the document lands in
//! `openapi.json` in the working directory.

use api_lib::web::rest::ApiDoc;
use std::path::PathBuf;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let document = ApiDoc::openapi();
    let route_count = document.paths.paths.len();
    std::fs::write(&output, document.to_pretty_json()?)?;

    println!("Wrote {} routes to {}", route_count, output.display());
    Ok(())
}
