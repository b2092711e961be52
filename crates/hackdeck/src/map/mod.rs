pub mod document;
pub mod loader;

use std::path::PathBuf;

use thiserror::Error;

pub use document::MapDocument;
pub use loader::{MapLoader, MapStatus};

/// File name of the map inside the assets directory.
pub const MAP_FILE: &str = "india.svg";

#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse map: {0}")]
    Parse(#[from] resvg::usvg::Error),

    #[error("map document has no drawable area")]
    EmptyDocument,

    #[error("cannot allocate a {width}x{height} map raster")]
    Pixmap { width: u32, height: u32 },
}
