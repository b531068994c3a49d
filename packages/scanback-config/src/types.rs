use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub records: Records,
	#[serde(default)]
	pub security: Security,
	/// Required by the scanning client only; the record service ignores it.
	pub client: Option<Client>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	/// One of `memory` or `postgres`.
	pub backend: String,
	/// Memory backend only. The table is reloaded from and rewritten to this JSON file.
	pub snapshot_path: Option<PathBuf>,
	pub postgres: Option<Postgres>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	#[serde(default = "default_pool_max_conns")]
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Records {
	/// Upper bound on waiting for the table lock before answering busy.
	#[serde(default = "default_lock_timeout_ms")]
	pub lock_timeout_ms: u64,
	#[serde(default = "default_max_field_chars")]
	pub max_field_chars: usize,
	#[serde(default = "default_messaging_base")]
	pub messaging_base: String,
}
impl Default for Records {
	fn default() -> Self {
		Self {
			lock_timeout_ms: default_lock_timeout_ms(),
			max_field_chars: default_max_field_chars(),
			messaging_base: default_messaging_base(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Security {
	#[serde(default = "default_true")]
	pub bind_localhost_only: bool,
	#[serde(default = "default_true")]
	pub cors_allow_any_origin: bool,
}
impl Default for Security {
	fn default() -> Self {
		Self { bind_localhost_only: true, cors_allow_any_origin: true }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Client {
	/// Full resolve/activate endpoint, e.g. `http://127.0.0.1:8080/v1/tags`.
	pub record_service_url: String,
	#[serde(default = "default_client_timeout_ms")]
	pub timeout_ms: u64,
	/// How long the success view stays up before the claimed view replaces it.
	#[serde(default = "default_success_delay_ms")]
	pub success_delay_ms: u64,
	/// Must equal `records.messaging_base` whenever both appear in one file, so a link built after
	/// activation matches the one a later resolve returns.
	#[serde(default = "default_messaging_base")]
	pub messaging_base: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_pool_max_conns() -> u32 {
	4
}

fn default_lock_timeout_ms() -> u64 {
	10_000
}

fn default_max_field_chars() -> usize {
	256
}

fn default_messaging_base() -> String {
	"https://wa.me".to_string()
}

fn default_true() -> bool {
	true
}

fn default_client_timeout_ms() -> u64 {
	10_000
}

fn default_success_delay_ms() -> u64 {
	2_500
}
