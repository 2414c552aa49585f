// Metrics hooks for the matching core.
//
// Callers install a global `AggregateMetrics` implementation via
// [`set_aggregate_metrics`]; every call to [`aggregate`](crate::aggregate) then
// reports how many items it saw, how many pairs it scored and how long it took.
// This keeps instrumentation decoupled from any specific metrics backend.
use std::sync::{Arc, OnceLock, RwLock};
use std::time::Duration;

/// Metrics observer for aggregation passes.
pub trait AggregateMetrics: Send + Sync {
    /// `item_count` is the snapshot size, `pairs_scored` the number of scorer
    /// invocations, `latency` the wall-clock duration of the pass.
    fn record_aggregate(&self, item_count: usize, pairs_scored: usize, latency: Duration);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn AggregateMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn AggregateMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn AggregateMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global aggregation metrics recorder.
///
/// Typically called once during service startup.
pub fn set_aggregate_metrics(recorder: Option<Arc<dyn AggregateMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Category, ItemRecord, ReportKind};
    use crate::scorer::ScoreWeights;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(usize, usize)>>,
    }

    impl AggregateMetrics for Recorder {
        fn record_aggregate(&self, item_count: usize, pairs_scored: usize, _latency: Duration) {
            self.calls.lock().unwrap().push((item_count, pairs_scored));
        }
    }

    fn record(id: u64, kind: ReportKind) -> ItemRecord {
        ItemRecord {
            id,
            kind,
            title: String::new(),
            description: String::new(),
            location: String::new(),
            reported_at: String::new(),
            category: Category::Other,
            condition: String::new(),
            color: String::new(),
            brand: String::new(),
            size: String::new(),
            image: None,
        }
    }

    #[test]
    fn recorder_sees_pair_counts() {
        let recorder = Arc::new(Recorder::default());
        set_aggregate_metrics(Some(recorder.clone()));

        let items = vec![
            record(1, ReportKind::Lost),
            record(2, ReportKind::Found),
            record(3, ReportKind::Found),
        ];
        crate::aggregate(&items, &ScoreWeights::default());
        set_aggregate_metrics(None);

        // Other tests may aggregate concurrently while the recorder is installed.
        let calls = recorder.calls.lock().unwrap();
        assert!(calls.contains(&(3, 4)));
    }
}
