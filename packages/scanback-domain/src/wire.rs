//! JSON bodies exchanged between the scanning client and the record service.
//!
//! Replies are tagged by a `result` field. The service emits them through [`ResolveReply`] and
//! [`ActivateReply`]; the client reads any body through the lenient [`Reply`] so that a reply of
//! an unexpected shape can be told apart from one that is not JSON at all.

use serde::{Deserialize, Serialize};

use crate::ContactReference;

pub const RESULT_NEW: &str = "new";
pub const RESULT_FOUND: &str = "found";
pub const RESULT_SUCCESS: &str = "success";
pub const RESULT_ERROR: &str = "error";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum ResolveReply {
	New,
	Found {
		wa_link: ContactReference,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		message: Option<String>,
	},
	Error {
		message: String,
	},
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum ActivateReply {
	Success,
	Error { message: String },
}

/// Activation body. Absent fields read as empty so the service can answer with its own
/// missing-fields error instead of a parse failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivatePayload {
	#[serde(default)]
	pub id: String,
	#[serde(default)]
	pub item: String,
	#[serde(default)]
	pub phone: String,
}
impl ActivatePayload {
	/// First field that is empty or whitespace only, in `id`, `item`, `phone` order.
	pub fn blank_field(&self) -> Option<&'static str> {
		[("id", &self.id), ("item", &self.item), ("phone", &self.phone)]
			.into_iter()
			.find(|(_, value)| value.trim().is_empty())
			.map(|(field, _)| field)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Reply {
	pub result: Option<String>,
	pub wa_link: Option<String>,
	pub message: Option<String>,
}
impl Reply {
	pub fn result(&self) -> Option<&str> {
		self.result.as_deref()
	}

	/// The message when present and non-blank.
	pub fn message(&self) -> Option<&str> {
		self.message.as_deref().filter(|message| !message.trim().is_empty())
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn resolve_replies_are_tagged_by_result() {
		assert_eq!(serde_json::to_value(ResolveReply::New).expect("json"), json!({ "result": "new" }));
		assert_eq!(
			serde_json::to_value(ResolveReply::Found {
				wa_link: ContactReference::from_link("https://wa.me/1?text=hi"),
				message: Some("Owner found".to_string()),
			})
			.expect("json"),
			json!({ "result": "found", "wa_link": "https://wa.me/1?text=hi", "message": "Owner found" })
		);
		assert_eq!(
			serde_json::to_value(ResolveReply::Error { message: "Missing ID".to_string() })
				.expect("json"),
			json!({ "result": "error", "message": "Missing ID" })
		);
	}

	#[test]
	fn found_reply_without_message_omits_it() {
		let value = serde_json::to_value(ResolveReply::Found {
			wa_link: ContactReference::from_link("https://wa.me/1?text=hi"),
			message: None,
		})
		.expect("json");

		assert!(value.get("message").is_none());
	}

	#[test]
	fn activate_payload_tolerates_missing_fields() {
		let payload: ActivatePayload =
			serde_json::from_str(r#"{ "id": "DEMO_TEST" }"#).expect("Failed to parse payload.");

		assert_eq!(payload.id, "DEMO_TEST");
		assert!(payload.item.is_empty());
		assert!(payload.phone.is_empty());
	}

	#[test]
	fn whitespace_only_fields_are_blank() {
		let payload = |id: &str, item: &str, phone: &str| ActivatePayload {
			id: id.to_string(),
			item: item.to_string(),
			phone: phone.to_string(),
		};

		assert_eq!(payload("A1", "Keys", "1").blank_field(), None);
		assert_eq!(payload("", "Keys", "1").blank_field(), Some("id"));
		assert_eq!(payload("A1", " \t", "1").blank_field(), Some("item"));
		assert_eq!(payload("A1", "Keys", "  ").blank_field(), Some("phone"));
	}

	#[test]
	fn lenient_reply_accepts_unknown_shapes() {
		let reply: Reply =
			serde_json::from_str(r#"{ "result": "found", "extra": 1 }"#).expect("Failed to parse.");

		assert_eq!(reply.result(), Some(RESULT_FOUND));
		assert!(reply.wa_link.is_none());

		let blank: Reply =
			serde_json::from_str(r#"{ "result": "error", "message": "  " }"#).expect("parse");

		assert_eq!(blank.message(), None);
	}

	#[test]
	fn lenient_reply_rejects_non_objects() {
		assert!(serde_json::from_str::<Reply>("<html>Sign in</html>").is_err());
		assert!(serde_json::from_str::<Reply>("[1, 2]").is_err());
	}
}
