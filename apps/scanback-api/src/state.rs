use std::sync::Arc;

use color_eyre::eyre;

use scanback_config::Config;
use scanback_service::{TagService, TagStore};
use scanback_storage::{db::Db, memory::MemoryTable};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<TagService>,
}
impl AppState {
	pub async fn new(config: &Config) -> color_eyre::Result<Self> {
		let store = open_store(config).await?;

		Ok(Self::with_store(config, store))
	}

	pub fn with_store(config: &Config, store: Arc<dyn TagStore>) -> Self {
		let service = TagService::new(config.records.clone(), store);

		Self { service: Arc::new(service) }
	}
}

async fn open_store(config: &Config) -> color_eyre::Result<Arc<dyn TagStore>> {
	match config.storage.backend.as_str() {
		"memory" => {
			let table = match config.storage.snapshot_path.as_ref() {
				Some(path) => MemoryTable::with_snapshot(path)?,
				None => MemoryTable::new(),
			};

			Ok(Arc::new(table))
		},
		"postgres" => {
			let postgres = config
				.storage
				.postgres
				.as_ref()
				.ok_or_else(|| eyre::eyre!("storage.postgres is required for the postgres backend."))?;
			let db = Db::connect(postgres).await?;

			db.ensure_schema().await?;

			Ok(Arc::new(db))
		},
		other => Err(eyre::eyre!("Unsupported storage.backend {other:?}.")),
	}
}
