use crate::error::{Result, TilewireError};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Upstream style fetched when no input path is given.
pub const DEFAULT_REMOTE_STYLE_URL: &str =
	"https://raw.githubusercontent.com/answerquest/india-vector-maps/main/local1-versatiles/colorful_style.json";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Load a style document from a local file.
pub fn load_style_from_file(path: &Path) -> Result<Value> {
	let content = std::fs::read_to_string(path).map_err(|source| TilewireError::ReadError {
		path: path.to_path_buf(),
		source,
	})?;

	serde_json::from_str(&content).map_err(|source| TilewireError::StyleParse { source })
}

/// Fetch a style document over HTTP.
pub fn load_style_from_url(url: &str) -> Result<Value> {
	let agent: ureq::Agent = ureq::Agent::config_builder()
		.timeout_global(Some(FETCH_TIMEOUT))
		.build()
		.into();

	let mut response = agent
		.get(url)
		.call()
		.map_err(|source| TilewireError::FetchFailed {
			url: url.to_string(),
			source,
		})?;

	let body = response
		.body_mut()
		.read_to_string()
		.map_err(|source| TilewireError::FetchFailed {
			url: url.to_string(),
			source,
		})?;

	serde_json::from_str(&body).map_err(|source| TilewireError::StyleParse { source })
}

/// Parse a source-name to MBTiles-basename mapping from an inline JSON string.
pub fn parse_mapping(json: &str) -> Result<HashMap<String, String>> {
	serde_json::from_str(json).map_err(|source| TilewireError::MappingParse { source })
}

/// Load the mapping from a JSON file.
pub fn load_mapping_file(path: &Path) -> Result<HashMap<String, String>> {
	let content = std::fs::read_to_string(path).map_err(|source| TilewireError::ReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_mapping(&content)
}

/// Resolve the source mapping from the two mutually exclusive CLI options.
///
/// Neither option yields an empty mapping (every remote source then warns).
pub fn resolve_mapping(
	inline: Option<&str>,
	file: Option<&Path>,
) -> Result<HashMap<String, String>> {
	match (inline, file) {
		(Some(_), Some(_)) => Err(TilewireError::MutuallyExclusive {
			option1: "--mapping".to_string(),
			option2: "--mapping-file".to_string(),
		}),
		(Some(json), None) => parse_mapping(json),
		(None, Some(path)) => load_mapping_file(path),
		(None, None) => Ok(HashMap::new()),
	}
}

/// Write the style document, creating intermediate directories as needed.
pub fn save_style(style: &Value, path: &Path) -> Result<()> {
	if let Some(parent) = path.parent()
		&& !parent.as_os_str().is_empty()
	{
		std::fs::create_dir_all(parent).map_err(|source| TilewireError::WriteError {
			path: parent.to_path_buf(),
			source,
		})?;
	}

	let content = serde_json::to_string_pretty(style)
		.map_err(|source| TilewireError::StyleSerialize { source })?;

	std::fs::write(path, content).map_err(|source| TilewireError::WriteError {
		path: path.to_path_buf(),
		source,
	})
}
