use crate::models::time::TimeCursor;
use crate::traits::{OverlaySink, VectorData};

/// Fetch lifecycle of the controller. `Loaded` and `Failed` both return to
/// `Fetching` on the next cursor change; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching,
    Loaded,
    Failed,
}

/// Keeps a map overlay visually consistent with a moving time cursor despite
/// network latency and out-of-order fetch completions.
///
/// This is the synchronous half: a state machine fed by `on_cursor_changed`
/// and `on_fetch_complete`. The async half ([`super::driver`]) issues the
/// fetches this machine requests and funnels their completions back in on one
/// logical event loop, so no locking happens here.
///
/// Completion policy is last-completed-wins: a completion unconditionally
/// overwrites the buffer and loaded time, even when a stale request finishes
/// after a newer one. The visibility invariant below is what keeps the map
/// honest: the overlay is shown iff the loaded time equals the current cursor
/// and the buffer is non-empty, re-checked after every completion and every
/// cursor change.
pub struct OverlayController<S: OverlaySink> {
    sink: S,
    cursor: Option<TimeCursor>,
    loaded_time: Option<TimeCursor>,
    buffer: VectorData,
    state: FetchState,
    visible: bool,
    attached: bool,
}

impl<S: OverlaySink> OverlayController<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            cursor: None,
            loaded_time: None,
            buffer: Vec::new(),
            state: FetchState::Idle,
            visible: false,
            attached: false,
        }
    }

    /// Register with the host map. Returns the time to fetch immediately
    /// (the map's current cursor).
    pub fn attach(&mut self, time: TimeCursor) -> TimeCursor {
        self.attached = true;
        self.cursor = Some(time);
        self.state = FetchState::Fetching;
        self.reconcile();
        time
    }

    /// Unregister from the host map, removing the overlay if shown. The
    /// buffer survives; a re-attach at the same cursor shows it again without
    /// waiting for the fetch.
    pub fn detach(&mut self) {
        self.attached = false;
        if self.visible {
            self.sink.hide();
            self.visible = false;
        }
        self.state = FetchState::Idle;
    }

    /// The external time dimension advanced or jumped. Returns the time a new
    /// fetch must be issued for — unconditionally, with no debounce, every
    /// cursor change starts a fetch even if one for the same time is already
    /// in flight.
    pub fn on_cursor_changed(&mut self, time: TimeCursor) -> Option<TimeCursor> {
        if !self.attached {
            return None;
        }
        self.cursor = Some(time);
        self.state = FetchState::Fetching;
        self.reconcile();
        Some(time)
    }

    /// A fetch for `time` settled. Failure degrades to an empty payload: the
    /// overlay hides for that time but the machine stays healthy and a later
    /// valid completion overwrites it. `dimension_loading` defers the visible
    /// swap while the time-dimension control is mid-transition; the control
    /// re-notifies via `on_cursor_changed` once it lands.
    pub fn on_fetch_complete(
        &mut self,
        time: TimeCursor,
        result: Result<VectorData, String>,
        dimension_loading: bool,
    ) {
        let (data, state) = match result {
            Ok(data) => (data, FetchState::Loaded),
            Err(err) => {
                eprintln!("⚠️ No overlay data for {}: {}", time, err);
                (Vec::new(), FetchState::Failed)
            }
        };

        // Last-completed-wins overwrite, regardless of request order.
        self.buffer = data;
        self.loaded_time = Some(time);
        self.state = state;

        if !dimension_loading {
            self.reconcile();
        }
    }

    /// Whether data for exactly `time` is loaded. The time player polls this
    /// to decide whether it may advance past `time`.
    pub fn is_ready(&self, time: TimeCursor) -> bool {
        self.loaded_time == Some(time)
    }

    pub fn cursor(&self) -> Option<TimeCursor> {
        self.cursor
    }

    pub fn loaded_time(&self) -> Option<TimeCursor> {
        self.loaded_time
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    // Visible iff loaded == cursor and the buffer holds samples; hidden
    // otherwise. Show is re-issued even when already visible so the sink
    // always renders the freshest buffer.
    fn reconcile(&mut self) {
        if !self.attached {
            return;
        }
        let in_sync =
            self.cursor.is_some() && self.loaded_time == self.cursor && !self.buffer.is_empty();
        if in_sync {
            self.sink.show(&self.buffer);
            self.visible = true;
        } else if self.visible {
            self.sink.hide();
            self.visible = false;
        }
    }
}
