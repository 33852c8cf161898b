use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = mealmate_agent::Args::parse();

	mealmate_agent::run(args).await
}
