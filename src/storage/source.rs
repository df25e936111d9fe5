use std::{
    ffi::OsStr,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::domain::Node;

/// Errors that can occur when loading a source document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source file was not found.
    #[error("source file not found")]
    NotFound,
    /// An I/O error occurred.
    #[error("failed to read source file")]
    Io(#[from] io::Error),
    /// The YAML content could not be parsed.
    #[error("failed to parse YAML")]
    Yaml(#[from] serde_yaml::Error),
    /// The JSON content could not be parsed.
    #[error("failed to parse JSON")]
    Json(#[from] serde_json::Error),
    /// The file extension does not name a supported format.
    #[error("unsupported source format '{0}'")]
    UnsupportedFormat(String),
}

/// Loads a source document from disk and decodes it into a tree.
///
/// The format is chosen by file extension: `.yaml`/`.yml` or `.json`.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, of an unsupported
/// extension, or not valid YAML/JSON.
pub fn load(path: &Path) -> Result<Node, LoadError> {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let file = File::open(path).map_err(|io_error| match io_error.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound,
        _ => LoadError::Io(io_error),
    })?;
    let reader = BufReader::new(file);

    let node = match extension.as_str() {
        "yaml" | "yml" => {
            let value: serde_yaml::Value = serde_yaml::from_reader(reader)?;
            Node::from(value)
        }
        "json" => {
            let value: serde_json::Value = serde_json::from_reader(reader)?;
            Node::from(value)
        }
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    tracing::debug!("loaded source document from {}", path.display());
    Ok(node)
}

/// Walks a directory tree and collects every convertible source file, sorted
/// by path so batch runs process files in a stable order.
#[must_use]
pub fn discover(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| {
            matches!(
                path.extension().and_then(OsStr::to_str),
                Some("yaml" | "yml" | "json")
            )
        })
        .collect();
    paths.sort();
    tracing::debug!("discovered {} source documents in {}", paths.len(), root.display());
    paths
}
