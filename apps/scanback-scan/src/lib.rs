use std::{fmt::Write as _, path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use color_eyre::eyre;
use tokio::{sync::watch, task::JoinHandle};

use scanback_client::{HttpRecordApi, Session, View, params, render};
use scanback_domain::{clean_base_url, is_local_base, sanitize_contact, scan_links};

#[derive(Debug, Parser)]
#[command(
	version = scanback_cli::VERSION,
	rename_all = "kebab",
	styles = scanback_cli::styles(),
)]
pub struct Args {
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Resolve a scanned tag and optionally activate it.
	Scan(ScanArgs),
	/// Print scan links for a batch of tags.
	Links(LinksArgs),
}

#[derive(Debug, clap::Args)]
pub struct ScanArgs {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Scanned link or bare query, e.g. `https://tags.example/?id=DEMO_TEST`.
	#[arg(long, value_name = "URL", default_value = "")]
	pub link: String,
	/// Item name to activate an unclaimed tag with.
	#[arg(long, requires = "phone")]
	pub item: Option<String>,
	/// Owner's messaging number; anything but digits is stripped.
	#[arg(long, requires = "item")]
	pub phone: Option<String>,
	/// How many times to retry resolve from an error view.
	#[arg(long, default_value_t = 0)]
	pub retries: u32,
}

#[derive(Debug, clap::Args)]
pub struct LinksArgs {
	/// Page the tags open, e.g. `tags.example/scan`. `https://` is assumed without a scheme.
	#[arg(long, value_name = "URL")]
	pub base: String,
	#[arg(long, default_value = "ITEM_")]
	pub prefix: String,
	#[arg(long, default_value_t = 1)]
	pub start: u32,
	#[arg(long, default_value_t = 6)]
	pub count: u32,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	match args.command {
		Command::Scan(args) => scan(args).await,
		Command::Links(args) => {
			scanback_cli::init_tracing("info");

			print!("{}", links(&args)?);

			Ok(())
		},
	}
}

/// One `<tag id>\t<url>` line per link.
pub fn links(args: &LinksArgs) -> color_eyre::Result<String> {
	if clean_base_url(&args.base).is_none() {
		return Err(eyre::eyre!("--base must name the page printed tags should open."));
	}
	if is_local_base(&args.base) {
		tracing::warn!(
			base = %args.base,
			"Links point at a local or preview host and will not open on other phones."
		);
	}

	let mut out = String::new();

	for link in scan_links(&args.base, &args.prefix, args.start, args.count) {
		writeln!(out, "{}\t{}", link.tag_id, link.url)?;
	}

	Ok(out)
}

async fn scan(args: ScanArgs) -> color_eyre::Result<()> {
	let client_cfg = scanback_config::load_client(&args.config)?;

	scanback_cli::init_tracing(&client_cfg.log_level);

	let api = HttpRecordApi::new(&client_cfg)?;
	let tag_id = params::tag_id_from_link(&args.link);

	tracing::info!(url = %api.url(), tag_id = ?tag_id, "Opening scan session.");

	let session = Arc::new(Session::new(Arc::new(api), tag_id.as_deref(), &client_cfg));
	let printer = spawn_printer(session.subscribe(), tag_id.clone());
	let outcome = drive(&session, &args).await;

	session.teardown();
	drop(session);
	printer.await?;

	outcome
}

async fn drive(session: &Session, args: &ScanArgs) -> color_eyre::Result<()> {
	let mut view = session.start().await;

	for attempt in 1..=args.retries {
		if !matches!(view, View::Error { .. }) {
			break;
		}

		tracing::info!(attempt, "Retrying resolve.");

		view = session.retry().await;
	}

	match (&view, args.item.as_deref(), args.phone.as_deref()) {
		(View::Unclaimed { .. }, Some(item), Some(phone)) => {
			let view = session.submit(item, &sanitize_contact(phone)).await?;

			if let View::Unclaimed { notice: Some(notice), .. } = view {
				return Err(eyre::eyre!(notice));
			}
		},
		(View::Unclaimed { .. }, _, _) => {
			tracing::info!("Tag is unclaimed. Pass --item and --phone to activate it.");
		},
		(View::Error { message, .. }, _, _) => return Err(eyre::eyre!(message.clone())),
		(_, Some(_), _) => {
			tracing::warn!("Ignoring --item and --phone because the tag is not unclaimed.");
		},
		_ => {},
	}

	Ok(())
}

fn spawn_printer(mut views: watch::Receiver<View>, tag_id: Option<String>) -> JoinHandle<()> {
	tokio::spawn(async move {
		println!("{}", render::render(&views.borrow_and_update(), tag_id.as_deref()));

		while views.changed().await.is_ok() {
			let text = render::render(&views.borrow_and_update(), tag_id.as_deref());

			println!("{text}");
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn links_args(argv: &[&str]) -> LinksArgs {
		let args = Args::try_parse_from(argv).expect("Arguments must parse.");

		match args.command {
			Command::Links(args) => args,
			other => panic!("Expected the links command, got {other:?}."),
		}
	}

	#[test]
	fn links_use_defaults() {
		let args = links_args(&["scanback-scan", "links", "--base", "tags.example/"]);
		let out = links(&args).expect("Links must print.");
		let lines = out.lines().collect::<Vec<_>>();

		assert_eq!(lines.len(), 6);
		assert_eq!(lines[0], "ITEM_001\thttps://tags.example?id=ITEM_001");
		assert_eq!(lines[5], "ITEM_006\thttps://tags.example?id=ITEM_006");
	}

	#[test]
	fn links_follow_prefix_and_range() {
		let args = links_args(&[
			"scanback-scan",
			"links",
			"--base",
			"https://tags.example/scan?ref=print",
			"--prefix",
			"BAG-",
			"--start",
			"98",
			"--count",
			"3",
		]);
		let out = links(&args).expect("Links must print.");

		assert_eq!(
			out,
			"BAG-098\thttps://tags.example/scan?ref=print&id=BAG-098\n\
			 BAG-099\thttps://tags.example/scan?ref=print&id=BAG-099\n\
			 BAG-100\thttps://tags.example/scan?ref=print&id=BAG-100\n"
		);
	}

	#[test]
	fn blank_base_is_refused() {
		let args = links_args(&["scanback-scan", "links", "--base", "  / "]);

		assert!(links(&args).is_err());
	}

	#[test]
	fn zero_count_prints_nothing() {
		let args = links_args(&["scanback-scan", "links", "--base", "tags.example", "--count", "0"]);

		assert_eq!(links(&args).expect("Links must print."), "");
	}

	#[test]
	fn local_bases_still_print() {
		let args = links_args(&["scanback-scan", "links", "--base", "http://localhost:5173"]);
		let out = links(&args).expect("Links must print.");

		assert!(out.starts_with("ITEM_001\thttp://localhost:5173?id=ITEM_001\n"));
	}

	#[test]
	fn scan_requires_item_and_phone_together() {
		let parsed = Args::try_parse_from([
			"scanback-scan",
			"scan",
			"-c",
			"scanback.toml",
			"--item",
			"Keys",
		]);

		assert!(parsed.is_err());
	}
}
