use std::{path::PathBuf, sync::Arc};

use clap::{
	Parser, Subcommand,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use mealmate_pipeline::AgentGraph;
use mealmate_service::{AgentService, SyncRequest, scheduler};
use mealmate_storage::{db::Db, qdrant::QdrantStore};

#[derive(Debug, Parser)]
#[command(
	version,
	rename_all = "kebab",
	styles = styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Run one recommendation request through the agent and print the answer.
	Invoke {
		/// Request JSON with user_id, user_prompt and username.
		request: String,
	},
	/// Re-index every stored event for one user.
	Resync {
		#[arg(long)]
		user_id: String,
	},
	/// Run the background sync loop until interrupted.
	Worker,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = mealmate_config::load(&args.config)?;

	init_tracing(&config);

	let db = Db::connect(&config.storage.postgres).await?;
	let qdrant = QdrantStore::new(&config.storage.qdrant)?;

	qdrant.ensure_collection().await?;

	let service = Arc::new(AgentService::new(config, db, qdrant));

	match args.command {
		Command::Invoke { request } => {
			let agent = AgentGraph::for_service(service).compile()?;
			let answer = agent.invoke(&request).await?;

			println!("{answer}");
		},
		Command::Resync { user_id } => {
			let count = service.manual_resync(SyncRequest { user_id }).await?;

			tracing::info!(count, "Resync finished.");
		},
		Command::Worker => {
			let cancel = CancellationToken::new();
			let signal_cancel = cancel.clone();

			tokio::spawn(async move {
				if tokio::signal::ctrl_c().await.is_ok() {
					tracing::info!("Shutdown signal received.");
					signal_cancel.cancel();
				}
			});
			scheduler::run_background_sync(service, cancel).await;
		},
	}

	Ok(())
}

fn init_tracing(config: &mealmate_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Red.on_default() | Effects::BOLD)
		.usage(AnsiColor::Red.on_default() | Effects::BOLD)
		.literal(AnsiColor::Blue.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
}
