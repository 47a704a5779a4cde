//! Recurring trigger for ingestion cycles.

use std::future::Future;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::feed::PriceFeed;
use crate::repositories::price_repository::PriceRepository;
use crate::services::ingestion::run_cycle;

/// Run one cycle per `period` until `shutdown` resolves. Returns the number of cycles run.
///
/// The first cycle starts immediately. A cycle is always awaited to completion
/// before the next tick is taken, and missed ticks are skipped rather than replayed.
pub async fn run_every<S>(
    period: Duration,
    feed: &dyn PriceFeed,
    repo: &PriceRepository,
    symbols: &[String],
    shutdown: S,
) -> usize
where
    S: Future<Output = ()>,
{
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    info!("⏰ Scheduler started: fetching prices every {:?}", period);
    let mut count = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Scheduler stopping after {} cycles", count);
                return count;
            }
            _ = timer.tick() => {}
        }

        count += 1;
        match run_cycle(feed, repo, symbols).await {
            Ok(report) => match serde_json::to_string(&report.outcomes) {
                Ok(outcomes) => info!("⏰ Cycle #{} report: {}", count, outcomes),
                Err(_) => info!("⏰ Cycle #{} stored {} prices", count, report.stored_count()),
            },
            Err(e) => error!("❌ Cycle #{} failed: {}", count, e),
        }
    }
}
