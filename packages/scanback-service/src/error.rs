pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{message}")]
	InvalidRequest { message: String },
	#[error("Record service is busy. Please retry.")]
	Busy,
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl Error {
	/// Whether the same request may succeed when sent again unchanged.
	pub fn is_retryable(&self) -> bool {
		matches!(self, Self::Busy | Self::Storage { .. })
	}
}
impl From<scanback_storage::Error> for Error {
	fn from(err: scanback_storage::Error) -> Self {
		match err {
			scanback_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			other => Self::Storage { message: other.to_string() },
		}
	}
}
