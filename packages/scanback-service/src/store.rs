use scanback_domain::TagRecord;
use scanback_storage::{db::Db, memory::MemoryTable, queries};

use crate::{BoxFuture, Result, TagStore};

impl TagStore for MemoryTable {
	fn fetch<'a>(&'a self, tag_id: &'a str) -> BoxFuture<'a, Result<Option<TagRecord>>> {
		Box::pin(async move { Ok(self.get(tag_id)) })
	}

	fn upsert<'a>(&'a self, record: &'a TagRecord) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { Ok(MemoryTable::upsert(self, record.clone())?) })
	}
}

impl TagStore for Db {
	fn fetch<'a>(&'a self, tag_id: &'a str) -> BoxFuture<'a, Result<Option<TagRecord>>> {
		Box::pin(async move { Ok(queries::fetch_tag(&self.pool, tag_id).await?) })
	}

	fn upsert<'a>(&'a self, record: &'a TagRecord) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { Ok(queries::upsert_tag(&self.pool, record).await?) })
	}
}
