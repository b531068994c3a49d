use sqlx::PgExecutor;

use scanback_domain::TagRecord;

use crate::{Error, Result, models::TagRow};

pub async fn fetch_tag<'e, E>(executor: E, tag_id: &str) -> Result<Option<TagRecord>>
where
	E: PgExecutor<'e>,
{
	let row: Option<TagRow> = sqlx::query_as(
		"\
SELECT tag_id, status, item_name, owner_contact, updated_at
FROM tags
WHERE tag_id = $1",
	)
	.bind(tag_id)
	.fetch_optional(executor)
	.await?;

	Ok(row.map(TagRecord::from))
}

/// Inserts the record or overwrites every column of the existing row with the same `tag_id`.
pub async fn upsert_tag<'e, E>(executor: E, record: &TagRecord) -> Result<()>
where
	E: PgExecutor<'e>,
{
	if record.tag_id.is_empty() {
		return Err(Error::InvalidArgument("tag_id must be non-empty.".to_string()));
	}

	sqlx::query(
		"\
INSERT INTO tags (tag_id, status, item_name, owner_contact, updated_at)
VALUES ($1, $2, $3, $4, $5)
ON CONFLICT (tag_id) DO UPDATE
SET
	status = EXCLUDED.status,
	item_name = EXCLUDED.item_name,
	owner_contact = EXCLUDED.owner_contact,
	updated_at = EXCLUDED.updated_at",
	)
	.bind(record.tag_id.as_str())
	.bind(record.status.as_str())
	.bind(record.item_name.as_deref())
	.bind(record.owner_contact.as_deref())
	.bind(record.updated_at)
	.execute(executor)
	.await?;

	Ok(())
}
