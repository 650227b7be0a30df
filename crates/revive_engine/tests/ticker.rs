use std::sync::{Arc, Mutex};
use std::time::Duration;

use revive_engine::{spawn_ticker, JobId, TickSink};
use tokio::runtime::Handle;

#[derive(Default)]
struct RecordingSink {
    ticks: Mutex<Vec<JobId>>,
}

impl RecordingSink {
    fn count(&self) -> usize {
        self.ticks.lock().unwrap().len()
    }
}

impl TickSink for RecordingSink {
    fn tick(&self, job_id: JobId) {
        self.ticks.lock().unwrap().push(job_id);
    }
}

#[tokio::test(start_paused = true)]
async fn ticks_on_interval_until_cancelled() {
    let sink = Arc::new(RecordingSink::default());
    let token = spawn_ticker(&Handle::current(), 4, Duration::from_secs(3), sink.clone());

    tokio::time::sleep(Duration::from_millis(2_900)).await;
    assert_eq!(sink.count(), 0);

    tokio::time::sleep(Duration::from_millis(7_000)).await;
    assert_eq!(sink.count(), 3);
    assert!(sink.ticks.lock().unwrap().iter().all(|&id| id == 4));

    token.cancel();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(sink.count(), 3);
}

#[tokio::test(start_paused = true)]
async fn zero_interval_does_not_panic() {
    let sink = Arc::new(RecordingSink::default());
    let token = spawn_ticker(&Handle::current(), 1, Duration::ZERO, sink.clone());
    tokio::time::sleep(Duration::from_millis(5)).await;
    token.cancel();
    assert!(sink.count() > 0);
}
