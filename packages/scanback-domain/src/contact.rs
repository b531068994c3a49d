use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

pub const DEFAULT_MESSAGING_BASE: &str = "https://wa.me";

// Marks `encodeURIComponent` leaves alone but `urlencoding` escapes.
const URI_COMPONENT_MARKS: [(&str, &str); 5] =
	[("%21", "!"), ("%27", "'"), ("%28", "("), ("%29", ")"), ("%2A", "*")];

/// Deep link into the messaging app that opens a chat with the owner, greeting pre-filled.
///
/// The record service and the client both build this with [`ContactReference::derive`], so a
/// link synthesized right after activation is byte-identical to the one a later resolve returns.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactReference(String);
impl ContactReference {
	pub fn derive(messaging_base: &str, item: &str, contact: &str) -> Self {
		let base = messaging_base.trim_end_matches('/');
		let text = encode_uri_component(&greeting(item));

		Self(format!("{base}/{contact}?text={text}"))
	}

	/// Wraps a link produced elsewhere (for example by a resolve reply) without re-deriving it.
	pub fn from_link(link: impl Into<String>) -> Self {
		Self(link.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}
}
impl fmt::Display for ContactReference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

pub fn greeting(item: &str) -> String {
	format!("Hi, I found your {item}. How can I return it safely?")
}

/// Strips everything but ASCII digits, the shape the messaging app expects for a phone number
/// with country code.
pub fn sanitize_contact(raw: &str) -> String {
	raw.chars().filter(char::is_ascii_digit).collect()
}

/// Percent-encodes with the escape set of JavaScript's `encodeURIComponent`.
///
/// Restoring the marks after encoding is unambiguous because a literal `%` is always emitted as
/// `%25`, which never forms one of the restored sequences.
pub(crate) fn encode_uri_component(raw: &str) -> String {
	let mut encoded = match urlencoding::encode(raw) {
		Cow::Borrowed(unchanged) => return unchanged.to_string(),
		Cow::Owned(encoded) => encoded,
	};

	for (escaped, mark) in URI_COMPONENT_MARKS {
		if encoded.contains(escaped) {
			encoded = encoded.replace(escaped, mark);
		}
	}

	encoded
}
