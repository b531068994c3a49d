pub mod activate;
pub mod resolve;
pub mod store;

mod error;

pub use error::{Error, Result};

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use tokio::sync::{Mutex, MutexGuard};

use scanback_config::Records;
use scanback_domain::TagRecord;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Keyed tag table. Callers serialize access; implementations need no locking of their own
/// beyond what keeps them memory safe.
pub trait TagStore
where
	Self: Send + Sync,
{
	fn fetch<'a>(&'a self, tag_id: &'a str) -> BoxFuture<'a, Result<Option<TagRecord>>>;

	/// Creates the row or overwrites every field of the existing one.
	fn upsert<'a>(&'a self, record: &'a TagRecord) -> BoxFuture<'a, Result<()>>;
}

/// Record service semantics: implicit registration on resolve, upsert on activate, and a single
/// process-wide lock around every table access.
pub struct TagService {
	pub cfg: Records,
	store: Arc<dyn TagStore>,
	table_lock: Mutex<()>,
}
impl TagService {
	pub fn new(cfg: Records, store: Arc<dyn TagStore>) -> Self {
		Self { cfg, store, table_lock: Mutex::new(()) }
	}

	fn lock_timeout(&self) -> Duration {
		Duration::from_millis(self.cfg.lock_timeout_ms)
	}

	/// Waits for the table lock, giving up with [`Error::Busy`] after `lock_timeout_ms`.
	async fn lock_table(&self) -> Result<MutexGuard<'_, ()>> {
		match tokio::time::timeout(self.lock_timeout(), self.table_lock.lock()).await {
			Ok(guard) => Ok(guard),
			Err(_) => {
				tracing::warn!(
					lock_timeout_ms = self.cfg.lock_timeout_ms,
					"Timed out waiting for the tag table lock."
				);

				Err(Error::Busy)
			},
		}
	}
}
