//! Throwaway Postgres databases for tests that need a real tag table.
//!
//! Tests opt in through `SCANBACK_PG_DSN`, which names a server and a database the test role may
//! create databases from. Each [`TestDatabase`] lives next to that database and is force-dropped
//! on cleanup or drop.

mod error;

pub use error::{Error, Result};

use std::{env, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::runtime::Builder;
use uuid::Uuid;

pub const DSN_ENV: &str = "SCANBACK_PG_DSN";

pub struct TestDatabase {
	name: String,
	dsn: String,
	server: PgConnectOptions,
	dropped: bool,
}
impl TestDatabase {
	/// Creates a database on the server named by `SCANBACK_PG_DSN`, or `None` when it is unset.
	pub async fn from_env() -> Result<Option<Self>> {
		match env_dsn() {
			Some(dsn) => Ok(Some(Self::create(&dsn).await?)),
			None => Ok(None),
		}
	}

	pub async fn create(server_dsn: &str) -> Result<Self> {
		let server = PgConnectOptions::from_str(server_dsn)
			.map_err(|err| Error::Message(format!("{DSN_ENV} is not a Postgres DSN: {err}.")))?;
		let name = format!("scanback_{}", Uuid::new_v4().simple());
		let mut conn = server.connect().await?;

		conn.execute(format!(r#"CREATE DATABASE "{name}""#).as_str()).await?;
		conn.close().await?;

		let dsn = server.clone().database(&name).to_url_lossy().to_string();

		Ok(Self { name, dsn, server, dropped: false })
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn postgres_config(&self) -> scanback_config::Postgres {
		scanback_config::Postgres { dsn: self.dsn.clone(), pool_max_conns: 2 }
	}

	/// Writes a bare row with an arbitrary status string, bypassing the domain types. The tag
	/// table must already exist.
	pub async fn seed_tag(&self, tag_id: &str, status: &str) -> Result<()> {
		let mut conn = PgConnection::connect(&self.dsn).await?;

		sqlx::query("INSERT INTO tags (tag_id, status) VALUES ($1, $2)")
			.bind(tag_id)
			.bind(status)
			.execute(&mut conn)
			.await?;
		conn.close().await?;

		Ok(())
	}

	pub async fn cleanup(mut self) -> Result<()> {
		force_drop(&self.server, &self.name).await?;

		self.dropped = true;

		Ok(())
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let server = self.server.clone();
		let name = self.name.clone();
		// The owning test's runtime may be shutting down, so the drop gets its own.
		let worker = thread::spawn(move || {
			let result = Builder::new_current_thread()
				.enable_all()
				.build()
				.map_err(|err| Error::Message(err.to_string()))
				.and_then(|runtime| runtime.block_on(force_drop(&server, &name)));

			if let Err(err) = result {
				eprintln!("Failed to drop test database {name}: {err}.");
			}
		});

		let _ = worker.join();
	}
}

pub fn env_dsn() -> Option<String> {
	env::var(DSN_ENV).ok().filter(|dsn| !dsn.trim().is_empty())
}

async fn force_drop(server: &PgConnectOptions, name: &str) -> Result<()> {
	let mut conn = server.connect().await?;

	conn.execute(format!(r#"DROP DATABASE IF EXISTS "{name}" WITH (FORCE)"#).as_str()).await?;
	conn.close().await?;

	Ok(())
}
