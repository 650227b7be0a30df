use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::JobId;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

pub trait TickSink: Send + Sync {
    fn tick(&self, job_id: JobId);
}

/// Spawns the cosmetic progress ticker. The first tick fires one interval after start.
///
/// The task runs until the returned token is cancelled.
pub fn spawn_ticker(
    handle: &Handle,
    job_id: JobId,
    interval: Duration,
    sink: Arc<dyn TickSink>,
) -> CancellationToken {
    let token = CancellationToken::new();
    let cancelled = token.clone();
    let period = interval.max(MIN_INTERVAL);

    handle.spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => break,
                _ = ticker.tick() => sink.tick(job_id),
            }
        }
    });

    token
}
