mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Client, Config, Postgres, Records, Security, Service, Storage};

use std::{fs, path::Path};

use serde::{Deserialize, de::DeserializeOwned};

/// Marker left in shipped sample configs until an operator fills in a real endpoint.
pub const PLACEHOLDER_MARKER: &str = "REPLACE_WITH_";

/// The part of a config file the scanning client reads. Server sections are not validated; a
/// present `[service]` only means `[records]` falls back to its defaults.
#[derive(Debug, Deserialize)]
struct ClientFile {
	service: Option<toml::Table>,
	records: Option<Records>,
	client: Option<Client>,
}

pub fn load(path: &Path) -> Result<Config> {
	let mut cfg: Config = read_toml(path)?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}

	match cfg.storage.backend.as_str() {
		"memory" =>
			if cfg.storage.postgres.is_some() {
				return Err(Error::Validation {
					message: "storage.postgres must be omitted when storage.backend is memory."
						.to_string(),
				});
			},
		"postgres" => {
			let Some(postgres) = cfg.storage.postgres.as_ref() else {
				return Err(Error::Validation {
					message: "storage.postgres is required when storage.backend is postgres."
						.to_string(),
				});
			};

			if postgres.dsn.trim().is_empty() {
				return Err(Error::Validation {
					message: "storage.postgres.dsn must be non-empty.".to_string(),
				});
			}
			if postgres.pool_max_conns == 0 {
				return Err(Error::Validation {
					message: "storage.postgres.pool_max_conns must be greater than zero."
						.to_string(),
				});
			}
			if cfg.storage.snapshot_path.is_some() {
				return Err(Error::Validation {
					message: "storage.snapshot_path is only supported by the memory backend."
						.to_string(),
				});
			}
		},
		_ =>
			return Err(Error::Validation {
				message: "storage.backend must be one of memory or postgres.".to_string(),
			}),
	}

	if cfg.records.lock_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "records.lock_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.records.max_field_chars == 0 {
		return Err(Error::Validation {
			message: "records.max_field_chars must be greater than zero.".to_string(),
		});
	}

	validate_http_url("records.messaging_base", &cfg.records.messaging_base)?;

	if let Some(client) = cfg.client.as_ref() {
		validate_client(client)?;
		validate_messaging_bases(&cfg.records, client)?;
	}

	Ok(())
}

/// Loads only `[client]`, so a scanner-only file needs no server sections.
pub fn load_client(path: &Path) -> Result<Client> {
	let file: ClientFile = read_toml(path)?;
	let mut client = file.client.ok_or_else(|| Error::Validation {
		message: "[client] is required to scan tags.".to_string(),
	})?;

	normalize_client(&mut client);
	validate_client(&client)?;

	let records = file.records.or_else(|| file.service.is_some().then(Records::default));

	if let Some(mut records) = records {
		records.messaging_base = trim_base(&records.messaging_base);

		validate_messaging_bases(&records, &client)?;
	}

	Ok(client)
}

/// Checks the scanning client section on its own so the client binary can fail fast before it
/// issues any request.
pub fn validate_client(client: &Client) -> Result<()> {
	let url = client.record_service_url.trim();

	if url.is_empty() {
		return Err(Error::Validation {
			message: "client.record_service_url must be non-empty.".to_string(),
		});
	}
	if url.contains(PLACEHOLDER_MARKER) {
		return Err(Error::Placeholder {
			key: "client.record_service_url",
			value: url.to_string(),
		});
	}

	validate_http_url("client.record_service_url", url)?;
	validate_http_url("client.messaging_base", &client.messaging_base)?;

	if client.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "client.timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn validate_messaging_bases(records: &Records, client: &Client) -> Result<()> {
	if records.messaging_base != client.messaging_base {
		return Err(Error::Validation {
			message: format!(
				"client.messaging_base ({:?}) must equal records.messaging_base ({:?}).",
				client.messaging_base, records.messaging_base
			),
		});
	}

	Ok(())
}

fn validate_http_url(label: &str, value: &str) -> Result<()> {
	if !(value.starts_with("http://") || value.starts_with("https://")) {
		return Err(Error::Validation {
			message: format!("{label} must start with http:// or https://."),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.storage.snapshot_path.as_deref().map(|path| path.as_os_str().is_empty()).unwrap_or(false)
	{
		cfg.storage.snapshot_path = None;
	}

	cfg.records.messaging_base = trim_base(&cfg.records.messaging_base);

	if let Some(client) = cfg.client.as_mut() {
		normalize_client(client);
	}
}

fn normalize_client(client: &mut Client) {
	client.record_service_url = client.record_service_url.trim().to_string();
	client.messaging_base = trim_base(&client.messaging_base);
}

fn read_toml<T>(path: &Path) -> Result<T>
where
	T: DeserializeOwned,
{
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	toml::from_str(&raw).map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })
}

fn trim_base(raw: &str) -> String {
	raw.trim().trim_end_matches('/').to_string()
}
