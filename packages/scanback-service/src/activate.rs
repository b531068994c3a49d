use time::OffsetDateTime;

use scanback_domain::{TagRecord, wire::ActivatePayload};

use crate::{Error, Result, TagService};

impl TagService {
	/// Claims a tag for an owner. Creates the row when absent; otherwise overwrites item,
	/// contact, status, and timestamp, so activating again simply replaces the details.
	/// Fields that are empty or whitespace only count as missing.
	pub async fn activate(&self, payload: ActivatePayload) -> Result<TagRecord> {
		if payload.blank_field().is_some() {
			return Err(Error::InvalidRequest { message: "Missing data fields".to_string() });
		}

		let ActivatePayload { id, item, phone } = payload;

		for (field, value) in [("id", &id), ("item", &item), ("phone", &phone)] {
			if value.chars().count() > self.cfg.max_field_chars {
				return Err(Error::InvalidRequest {
					message: format!(
						"{field} must be at most {} characters.",
						self.cfg.max_field_chars
					),
				});
			}
		}

		let _guard = self.lock_table().await?;
		let record = TagRecord::activated(id, item, phone, OffsetDateTime::now_utc());

		self.store.upsert(&record).await?;

		tracing::info!(tag_id = %record.tag_id, "Tag activated.");

		Ok(record)
	}
}
