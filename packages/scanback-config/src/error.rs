use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read config file at {path:?}.")]
	ReadConfig { path: PathBuf, source: std::io::Error },
	#[error("Failed to parse config file at {path:?}.")]
	ParseConfig { path: PathBuf, source: toml::de::Error },
	#[error(
		"{key} is still the placeholder {value:?}. Deploy the record service, then set {key} to its URL."
	)]
	Placeholder { key: &'static str, value: String },
	#[error("{message}")]
	Validation { message: String },
}
