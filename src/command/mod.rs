use std::path::{Path, PathBuf};

pub mod build;

/// Default directory for finished packs.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Marker for reading from stdin / writing to stdout.
pub const STDIO: &str = "-";

pub fn is_stdio(path: &Path) -> bool {
    path == Path::new(STDIO)
}

pub fn output_dir(output: &Option<PathBuf>) -> PathBuf {
    output.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}
