use crate::controller::ErrorKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Which call a failure came from; user-facing wording differs between the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
	Resolve,
	Activate,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Record service did not answer in time.")]
	Timeout,
	#[error("Record service is unreachable: {message}")]
	Transport { message: String },
	#[error("Record service returned a body that is not a JSON reply: {preview:?}")]
	Malformed { preview: String },
	#[error("Record service rejected the request: {}", .message.as_deref().unwrap_or("no message"))]
	Rejected { message: Option<String> },
	#[error("No tag ID is established for this session.")]
	MissingTagId,
	#[error("{field} must be non-empty.")]
	EmptyField { field: &'static str },
	#[error("The activation form is not accepting submissions.")]
	NotSubmittable,
	#[error(transparent)]
	Config(#[from] scanback_config::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("Failed to build the HTTP client: {0}")]
	Http(reqwest::Error),
}
impl Error {
	pub(crate) fn from_send(err: reqwest::Error) -> Self {
		if err.is_timeout() {
			Self::Timeout
		} else {
			Self::Transport { message: err.to_string() }
		}
	}

	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Timeout => ErrorKind::Timeout,
			Self::Malformed { .. } => ErrorKind::Malformed,
			Self::Rejected { .. } => ErrorKind::Rejected,
			_ => ErrorKind::Transport,
		}
	}

	/// Text shown to the person holding the phone.
	pub fn user_message(&self, operation: Operation) -> String {
		match (operation, self) {
			(Operation::Resolve, Self::Timeout) =>
				"Connection timed out. Please check your internet.".to_string(),
			(Operation::Resolve, Self::Malformed { .. }) =>
				"Server returned invalid data. Check that the record service permissions allow anonymous access and that its URL is configured correctly."
					.to_string(),
			(Operation::Resolve, Self::Rejected { message }) =>
				message.clone().unwrap_or_else(|| "Tag not found in database.".to_string()),
			(Operation::Resolve, _) =>
				"Failed to connect to the server. Please check your internet connection."
					.to_string(),
			(Operation::Activate, Self::Timeout) => "Activation timed out. Please retry.".to_string(),
			(Operation::Activate, Self::Malformed { .. }) =>
				"Server activation failed. Check deployment permissions and configuration."
					.to_string(),
			(Operation::Activate, Self::Rejected { message }) => format!(
				"Activation failed: {}",
				message.as_deref().unwrap_or("Unknown error")
			),
			(Operation::Activate, _) => "Failed to activate tag.".to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolve_messages_distinguish_configuration_from_connectivity() {
		let malformed = Error::Malformed { preview: "<html>".to_string() };
		let transport = Error::Transport { message: "connection refused".to_string() };
		let malformed_text = malformed.user_message(Operation::Resolve);
		let transport_text = transport.user_message(Operation::Resolve);

		assert!(malformed_text.contains("permissions"));
		assert!(malformed_text.contains("configured"));
		assert!(!transport_text.contains("permissions"));
		assert!(transport_text.contains("connect"));
	}

	#[test]
	fn rejected_messages_pass_through_or_default() {
		let with_message = Error::Rejected { message: Some("Missing ID".to_string()) };
		let without = Error::Rejected { message: None };

		assert_eq!(with_message.user_message(Operation::Resolve), "Missing ID");
		assert_eq!(without.user_message(Operation::Resolve), "Tag not found in database.");
		assert_eq!(
			with_message.user_message(Operation::Activate),
			"Activation failed: Missing ID"
		);
		assert_eq!(without.user_message(Operation::Activate), "Activation failed: Unknown error");
	}

	#[test]
	fn timeout_has_its_own_kind_and_wording() {
		assert_eq!(Error::Timeout.kind(), ErrorKind::Timeout);
		assert_eq!(
			Error::Timeout.user_message(Operation::Activate),
			"Activation timed out. Please retry."
		);
	}
}
