use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = scanback_api::Args::parse();

	scanback_api::run(args).await
}
