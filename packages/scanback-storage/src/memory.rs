use std::{
	collections::HashMap,
	fs, io,
	path::{Path, PathBuf},
	sync::Mutex,
};

use scanback_domain::TagRecord;

use crate::{Error, Result};

/// Process-local tag table, optionally mirrored to a JSON snapshot file.
///
/// The snapshot is rewritten in full after every upsert through a temporary file and a rename,
/// so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Default)]
pub struct MemoryTable {
	rows: Mutex<HashMap<String, TagRecord>>,
	snapshot: Option<PathBuf>,
}
impl MemoryTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Opens a table backed by `path`, loading existing rows when the file is present.
	pub fn with_snapshot(path: impl Into<PathBuf>) -> Result<Self> {
		let path = path.into();
		let rows: HashMap<String, TagRecord> = match fs::read(&path) {
			Ok(raw) => {
				let records: Vec<TagRecord> = serde_json::from_slice(&raw)
					.map_err(|err| Error::SnapshotFormat { path: path.clone(), source: err })?;

				records.into_iter().map(|record| (record.tag_id.clone(), record)).collect()
			},
			Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
			Err(err) => return Err(Error::Snapshot { path, source: err }),
		};

		tracing::info!(path = %path.display(), rows = rows.len(), "Loaded tag snapshot.");

		Ok(Self { rows: Mutex::new(rows), snapshot: Some(path) })
	}

	pub fn get(&self, tag_id: &str) -> Option<TagRecord> {
		let rows = self.rows.lock().unwrap_or_else(|err| err.into_inner());

		rows.get(tag_id).cloned()
	}

	pub fn upsert(&self, record: TagRecord) -> Result<()> {
		if record.tag_id.is_empty() {
			return Err(Error::InvalidArgument("tag_id must be non-empty.".to_string()));
		}

		let mut rows = self.rows.lock().unwrap_or_else(|err| err.into_inner());
		let previous = rows.insert(record.tag_id.clone(), record.clone());

		if let Some(path) = self.snapshot.as_deref()
			&& let Err(err) = write_snapshot(path, &rows)
		{
			// Keep memory and file in agreement: a failed write rolls the row back.
			match previous {
				Some(previous) => rows.insert(record.tag_id, previous),
				None => rows.remove(&record.tag_id),
			};

			return Err(err);
		}

		Ok(())
	}

	pub fn len(&self) -> usize {
		self.rows.lock().unwrap_or_else(|err| err.into_inner()).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

fn write_snapshot(path: &Path, rows: &HashMap<String, TagRecord>) -> Result<()> {
	let mut records = rows.values().collect::<Vec<_>>();

	records.sort_by(|a, b| a.tag_id.cmp(&b.tag_id));

	let payload = serde_json::to_vec_pretty(&records)
		.map_err(|err| Error::SnapshotFormat { path: path.to_path_buf(), source: err })?;
	let tmp = path.with_extension("json.tmp");

	fs::write(&tmp, payload)
		.and_then(|()| fs::rename(&tmp, path))
		.map_err(|err| Error::Snapshot { path: path.to_path_buf(), source: err })
}
