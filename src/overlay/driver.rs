use super::TimeDimension;
use super::controller::OverlayController;
use crate::models::time::TimeCursor;
use crate::traits::{OverlaySink, VectorData, VectorSource};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Everything mutating controller state flows through this channel, so the
/// machine runs on one logical event loop even though any number of fetches
/// are in flight. Superseded fetches are not cancelled and carry no timeout;
/// a hung request simply never reconciles.
enum Msg {
    Cursor(TimeCursor),
    Complete(TimeCursor, Result<VectorData, String>),
    Detach,
}

/// Handle the time-dimension control holds onto: cursor notifications in,
/// readiness out.
#[derive(Clone)]
pub struct OverlayHandle {
    tx: mpsc::UnboundedSender<Msg>,
    loaded_millis: Arc<AtomicI64>,
    visible: Arc<AtomicBool>,
}

// Sentinel for "nothing loaded yet"; no real cursor sits at i64::MIN.
const NO_LOADED_TIME: i64 = i64::MIN;

impl OverlayHandle {
    /// Notify the controller that the cursor advanced or jumped.
    pub fn cursor_changed(&self, time: TimeCursor) {
        let _ = self.tx.send(Msg::Cursor(time));
    }

    /// Whether data for exactly `time` is loaded; the player polls this
    /// before advancing past `time`.
    pub fn is_ready(&self, time: TimeCursor) -> bool {
        self.loaded_millis.load(Ordering::SeqCst) == time.millis()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Tear the controller down; the event loop drains and exits.
    pub fn detach(&self) {
        let _ = self.tx.send(Msg::Detach);
    }
}

/// Spawn the controller's event loop. Attaches immediately, requesting data
/// for the dimension's current time.
pub fn spawn_overlay(
    source: Arc<dyn VectorSource>,
    sink: Box<dyn OverlaySink>,
    dimension: Arc<TimeDimension>,
) -> (OverlayHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let loaded_millis = Arc::new(AtomicI64::new(NO_LOADED_TIME));
    let visible = Arc::new(AtomicBool::new(false));

    let handle = OverlayHandle {
        tx: tx.clone(),
        loaded_millis: loaded_millis.clone(),
        visible: visible.clone(),
    };

    let join = tokio::spawn(async move {
        let mut controller = OverlayController::new(sink);
        let first = controller.attach(dimension.current_time());
        spawn_fetch(&source, &tx, first);

        while let Some(msg) = rx.recv().await {
            match msg {
                Msg::Cursor(time) => {
                    if let Some(request) = controller.on_cursor_changed(time) {
                        spawn_fetch(&source, &tx, request);
                    }
                }
                Msg::Complete(time, result) => {
                    controller.on_fetch_complete(time, result, dimension.is_loading());
                }
                Msg::Detach => {
                    controller.detach();
                    visible.store(false, Ordering::SeqCst);
                    break;
                }
            }
            loaded_millis.store(
                controller
                    .loaded_time()
                    .map(TimeCursor::millis)
                    .unwrap_or(NO_LOADED_TIME),
                Ordering::SeqCst,
            );
            visible.store(controller.is_visible(), Ordering::SeqCst);
        }
    });

    (handle, join)
}

fn spawn_fetch(
    source: &Arc<dyn VectorSource>,
    tx: &mpsc::UnboundedSender<Msg>,
    time: TimeCursor,
) {
    let source = source.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = source.fetch(time).await;
        // Receiver gone means the controller detached mid-flight.
        let _ = tx.send(Msg::Complete(time, result));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Source with a per-time artificial latency, to stage out-of-order
    /// completions under tokio's paused clock.
    struct DelayedSource {
        delays: HashMap<i64, u64>,
        payloads: HashMap<i64, Result<VectorData, String>>,
    }

    #[async_trait]
    impl VectorSource for DelayedSource {
        async fn fetch(&self, time: TimeCursor) -> Result<VectorData, String> {
            let ms = self.delays.get(&time.millis()).copied().unwrap_or(1);
            tokio::time::sleep(Duration::from_millis(ms)).await;
            self.payloads
                .get(&time.millis())
                .cloned()
                .unwrap_or_else(|| Err("404".to_string()))
        }
    }

    #[derive(Clone, Default)]
    struct CountingSink {
        shows: Arc<Mutex<usize>>,
    }

    impl OverlaySink for CountingSink {
        fn show(&mut self, _samples: &VectorData) {
            *self.shows.lock().unwrap() += 1;
        }
        fn hide(&mut self) {}
    }

    fn t(hour: i64) -> TimeCursor {
        TimeCursor::from_millis(hour * 3_600_000)
    }

    fn wind() -> Result<VectorData, String> {
        Ok(vec![serde_json::json!({"header": {}, "data": [1, 2, 3]})])
    }

    #[tokio::test(start_paused = true)]
    async fn test_attach_loads_initial_time() {
        let source = Arc::new(DelayedSource {
            delays: HashMap::from([(t(0).millis(), 5)]),
            payloads: HashMap::from([(t(0).millis(), wind())]),
        });
        let dimension = Arc::new(TimeDimension::new(t(0)));
        let (handle, join) =
            spawn_overlay(source, Box::new(CountingSink::default()), dimension);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_ready(t(0)));
        assert!(handle.is_visible());

        handle.detach();
        join.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_stale_fetch_overwrites_fast_fresh_one() {
        // t(3) is requested before t(6) but finishes long after it.
        let source = Arc::new(DelayedSource {
            delays: HashMap::from([
                (t(0).millis(), 1),
                (t(3).millis(), 500),
                (t(6).millis(), 5),
            ]),
            payloads: HashMap::from([
                (t(0).millis(), wind()),
                (t(3).millis(), wind()),
                (t(6).millis(), wind()),
            ]),
        });
        let dimension = Arc::new(TimeDimension::new(t(0)));
        let (handle, join) =
            spawn_overlay(source, Box::new(CountingSink::default()), dimension.clone());

        dimension.set_current_time(t(3));
        handle.cursor_changed(t(3));
        dimension.set_current_time(t(6));
        handle.cursor_changed(t(6));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_ready(t(6)));
        assert!(handle.is_visible());

        // The stale completion lands last and wins; cursor is still t(6).
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(handle.is_ready(t(3)));
        assert!(!handle.is_ready(t(6)));
        assert!(!handle.is_visible());

        handle.detach();
        join.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_data_hides_but_player_can_advance() {
        let source = Arc::new(DelayedSource {
            delays: HashMap::new(),
            payloads: HashMap::from([(t(0).millis(), wind())]),
        });
        let dimension = Arc::new(TimeDimension::new(t(0)));
        let (handle, join) =
            spawn_overlay(source, Box::new(CountingSink::default()), dimension.clone());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(handle.is_visible());

        // No payload staged for t(9): fetch errors, overlay hides, but the
        // step still reports ready.
        dimension.set_current_time(t(9));
        handle.cursor_changed(t(9));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(handle.is_ready(t(9)));
        assert!(!handle.is_visible());

        handle.detach();
        join.await.unwrap();
    }
}
