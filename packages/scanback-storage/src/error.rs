use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Failed to access snapshot at {path:?}.")]
	Snapshot { path: PathBuf, source: std::io::Error },
	#[error("Snapshot at {path:?} is not a valid tag table.")]
	SnapshotFormat { path: PathBuf, source: serde_json::Error },
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
}
