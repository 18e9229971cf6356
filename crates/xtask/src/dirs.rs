//! Content directory resolution

use std::path::{Path, PathBuf};

/// Environment variable overriding the default content directory.
pub const DATA_DIR_ENV: &str = "TACTICS_DATA_DIR";

/// Resolve the content directory.
///
/// Order of precedence:
/// - the `--data-dir` argument
/// - `$TACTICS_DATA_DIR`
/// - the bundled `crates/tactics/content/data` directory of this workspace
pub fn content_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(bundled_content_dir)
}

fn bundled_content_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tactics")
        .join("content")
        .join("data")
}
