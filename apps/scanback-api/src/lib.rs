pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use color_eyre::eyre;
use tokio::net::TcpListener;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
	version = scanback_cli::VERSION,
	rename_all = "kebab",
	styles = scanback_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = scanback_config::load(&args.config)?;

	scanback_cli::init_tracing(&config.service.log_level);

	let http_addr: SocketAddr = config.service.http_bind.parse()?;

	if config.security.bind_localhost_only && !http_addr.ip().is_loopback() {
		return Err(eyre::eyre!(
			"service.http_bind must be a loopback address when security.bind_localhost_only is true."
		));
	}

	let state = AppState::new(&config).await?;
	let app = routes::router(state, &config.security);
	let listener = TcpListener::bind(http_addr).await?;

	tracing::info!(%http_addr, backend = %config.storage.backend, "Record service listening.");

	axum::serve(listener, app).await?;

	Ok(())
}
