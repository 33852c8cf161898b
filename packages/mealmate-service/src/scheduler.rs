use std::time::Duration as StdDuration;

use time::{Duration, OffsetDateTime};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use mealmate_storage::queries;

use crate::{AgentService, BoxFuture, ServiceResult};

pub trait SyncRunner
where
	Self: Send + Sync,
{
	fn run_once<'a>(&'a self, since: OffsetDateTime) -> BoxFuture<'a, ServiceResult<usize>>;
}

impl SyncRunner for AgentService {
	fn run_once<'a>(&'a self, since: OffsetDateTime) -> BoxFuture<'a, ServiceResult<usize>> {
		Box::pin(async move {
			let events = queries::events_created_since(&self.db, since).await?;

			self.sync_events(&events).await
		})
	}
}

/// Periodic background indexer.
///
/// Ticks on a fixed interval, the first run firing immediately. Each pass
/// queries events created inside a rolling lookback window and re-indexes
/// them; upserts are keyed by event id, so a lookback wider than the
/// interval only re-writes points it already wrote. Failed passes are
/// logged and the next tick proceeds normally.
pub struct SyncScheduler {
	interval: StdDuration,
	lookback: Duration,
	run_guard: tokio::sync::Mutex<()>,
}
impl SyncScheduler {
	pub fn new(cfg: &mealmate_config::Scheduler) -> Self {
		Self {
			interval: StdDuration::from_secs(cfg.interval_secs),
			lookback: Duration::seconds(cfg.lookback_secs as i64),
			run_guard: tokio::sync::Mutex::new(()),
		}
	}

	/// Runs until `cancel` fires. A pass already in flight when cancellation
	/// arrives is allowed to finish; the loop exits at the next tick.
	pub async fn run(&self, runner: &dyn SyncRunner, cancel: CancellationToken) {
		let mut ticker = tokio::time::interval(self.interval);

		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

		loop {
			tokio::select! {
				biased;
				_ = cancel.cancelled() => {
					tracing::info!("Sync scheduler stopped.");

					return;
				},
				_ = ticker.tick() => {},
			}

			// Serializes passes so a slow run never overlaps the next tick's.
			let _guard = self.run_guard.lock().await;
			let since = OffsetDateTime::now_utc() - self.lookback;

			match runner.run_once(since).await {
				Ok(0) => tracing::debug!("Sync pass found no new events."),
				Ok(count) => tracing::info!(count, "Sync pass indexed events."),
				Err(err) => tracing::error!(error = %err, "Sync pass failed."),
			}
		}
	}
}

/// Spawn-friendly wrapper that resolves the runner and scheduler from parts.
pub async fn run_background_sync(
	service: std::sync::Arc<AgentService>,
	cancel: CancellationToken,
) {
	let scheduler = SyncScheduler::new(&service.cfg.scheduler);

	scheduler.run(service.as_ref(), cancel).await;
}
