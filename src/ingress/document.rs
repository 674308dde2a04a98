use crate::error::{Result, TilewireError};
use serde_yaml_ng::Value;
use std::path::Path;

/// Load the config document from the given path.
pub fn load_document(path: &Path) -> Result<Value> {
	if !path.exists() {
		return Err(TilewireError::ConfigNotFound {
			path: path.to_path_buf(),
		});
	}

	let content = std::fs::read_to_string(path).map_err(|source| TilewireError::ReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_document(&content, path)
}

/// Parse a config document from a string (useful for testing).
pub fn parse_document(content: &str, path: &Path) -> Result<Value> {
	serde_yaml_ng::from_str(content).map_err(|source| TilewireError::YamlParse {
		path: path.to_path_buf(),
		source,
	})
}

/// Serialize the document and overwrite the config path with it.
///
/// Plain full-file overwrite, not atomic. Callers back up the original
/// first.
pub fn save_document(doc: &Value, path: &Path) -> Result<()> {
	let content =
		serde_yaml_ng::to_string(doc).map_err(|source| TilewireError::YamlSerialize { source })?;

	std::fs::write(path, content).map_err(|source| TilewireError::WriteError {
		path: path.to_path_buf(),
		source,
	})
}
