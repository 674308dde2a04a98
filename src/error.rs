use std::path::PathBuf;

/// Library-level structured errors for tilewire.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binaries wrap these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum TilewireError {
	#[error("Config file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read file: {path}")]
	ReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write file: {path}")]
	WriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse YAML config: {path}")]
	YamlParse {
		path: PathBuf,
		#[source]
		source: serde_yaml_ng::Error,
	},

	#[error("Failed to serialize YAML config")]
	YamlSerialize {
		#[source]
		source: serde_yaml_ng::Error,
	},

	#[error("Config root is not a YAML mapping")]
	NotAMapping,

	#[error("ingress field is not a sequence")]
	IngressNotASequence,

	#[error("Failed to back up config to {path}")]
	BackupFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse style JSON")]
	StyleParse {
		#[source]
		source: serde_json::Error,
	},

	#[error("Failed to serialize style JSON")]
	StyleSerialize {
		#[source]
		source: serde_json::Error,
	},

	#[error("Failed to parse source mapping JSON")]
	MappingParse {
		#[source]
		source: serde_json::Error,
	},

	#[error("Mutually exclusive options: {option1} and {option2}")]
	MutuallyExclusive { option1: String, option2: String },

	#[error("Failed to fetch style from {url}")]
	FetchFailed {
		url: String,
		#[source]
		source: ureq::Error,
	},
}

/// Result type alias using TilewireError.
pub type Result<T> = std::result::Result<T, TilewireError>;
