use time::OffsetDateTime;

use scanback_domain::{TagRecord, TagStatus};

#[derive(Debug, sqlx::FromRow)]
pub struct TagRow {
	pub tag_id: String,
	pub status: String,
	pub item_name: Option<String>,
	pub owner_contact: Option<String>,
	pub updated_at: OffsetDateTime,
}
impl From<TagRow> for TagRecord {
	fn from(row: TagRow) -> Self {
		Self {
			tag_id: row.tag_id,
			status: TagStatus::from_stored(&row.status),
			item_name: row.item_name,
			owner_contact: row.owner_contact,
			updated_at: row.updated_at,
		}
	}
}
