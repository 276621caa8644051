//! Static file serving for the frontend
//!
//! Every path the API does not claim is looked up under the public
//! directory. Paths with no matching file get `index.html`, so client-side
//! routes still load the app.

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Create the fallback service serving files from `public_dir`.
pub fn service(public_dir: &Path) -> ServeDir<ServeFile> {
    tracing::info!(path = %public_dir.display(), "Serving frontend assets");

    ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html")))
}
