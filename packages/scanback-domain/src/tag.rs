use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ContactReference;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagStatus {
	New,
	Active,
}
impl TagStatus {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::New => "New",
			Self::Active => "Active",
		}
	}

	/// Reads a stored status. Anything other than the exact `Active` marker is unclaimed.
	pub fn from_stored(raw: &str) -> Self {
		if raw == Self::Active.as_str() { Self::Active } else { Self::New }
	}
}
impl fmt::Display for TagStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One row of the tag table.
///
/// `item_name` and `owner_contact` are only meaningful while the tag is active. A tag that has
/// never been written has no record at all and reads as [`TagStatus::New`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
	pub tag_id: String,
	pub status: TagStatus,
	pub item_name: Option<String>,
	pub owner_contact: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}
impl TagRecord {
	pub fn activated(
		tag_id: impl Into<String>,
		item_name: impl Into<String>,
		owner_contact: impl Into<String>,
		now: OffsetDateTime,
	) -> Self {
		Self {
			tag_id: tag_id.into(),
			status: TagStatus::Active,
			item_name: Some(item_name.into()),
			owner_contact: Some(owner_contact.into()),
			updated_at: now,
		}
	}

	/// Item and contact of a claimed tag, or `None` while unclaimed or incomplete.
	pub fn claim(&self) -> Option<(&str, &str)> {
		if self.status != TagStatus::Active {
			return None;
		}

		Some((self.item_name.as_deref()?, self.owner_contact.as_deref()?))
	}
}

/// Disposition of a tag as seen by a scanner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
	/// Unclaimed: either never written or not active.
	New,
	Found { contact_reference: ContactReference },
}
