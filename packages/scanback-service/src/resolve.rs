use scanback_domain::{ContactReference, Resolution};

use crate::{Error, Result, TagService};

pub const OWNER_FOUND_MESSAGE: &str = "Owner found";

impl TagService {
	/// Looks up a tag. Unknown IDs and records that are not active resolve as
	/// [`Resolution::New`]; nothing is written either way.
	pub async fn resolve(&self, tag_id: &str) -> Result<Resolution> {
		if tag_id.is_empty() {
			return Err(Error::InvalidRequest { message: "Missing ID".to_string() });
		}

		let record = {
			let _guard = self.lock_table().await?;

			self.store.fetch(tag_id).await?
		};
		let Some((item, contact)) = record.as_ref().and_then(|record| record.claim()) else {
			tracing::debug!(tag_id, "Tag resolved as new.");

			return Ok(Resolution::New);
		};
		let contact_reference = ContactReference::derive(&self.cfg.messaging_base, item, contact);

		tracing::debug!(tag_id, "Tag resolved as found.");

		Ok(Resolution::Found { contact_reference })
	}
}
