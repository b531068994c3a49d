use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = scanback_scan::Args::parse();

	scanback_scan::run(args).await
}
