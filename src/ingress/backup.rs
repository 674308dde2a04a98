use crate::error::{Result, TilewireError};
use std::path::{Path, PathBuf};

/// Backup path for a config file at the given timestamp.
///
/// Format: `<config>.bak.<YYYYMMDDHHMMSS>`. Second resolution keeps
/// sequential invocations from clobbering an earlier backup.
pub fn backup_path(config: &Path, timestamp: &str) -> PathBuf {
	let mut name = config.as_os_str().to_os_string();
	name.push(format!(".bak.{timestamp}"));
	PathBuf::from(name)
}

/// Copy the config file to a timestamped backup next to it.
///
/// Runs before the config is overwritten, so the backup always holds the
/// pre-merge document. Returns the backup path.
pub fn write_backup(config: &Path) -> Result<PathBuf> {
	let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S").to_string();
	let backup = backup_path(config, &timestamp);

	std::fs::copy(config, &backup).map_err(|source| TilewireError::BackupFailed {
		path: backup.clone(),
		source,
	})?;

	Ok(backup)
}
