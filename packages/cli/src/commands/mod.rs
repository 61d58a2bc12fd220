pub mod compile;
pub mod init;
pub mod lint;

pub use compile::{compile, CompileArgs};
pub use init::{init, InitArgs};
pub use lint::{lint, LintArgs};

use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A single `.json` page, or every `.json` page below a directory
pub(crate) fn find_page_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(anyhow::anyhow!(
            "Input path does not exist: {}",
            input.display()
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}
