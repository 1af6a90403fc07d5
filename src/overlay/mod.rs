pub mod controller;
pub mod driver;
pub mod legend;
pub mod tile_url;

pub use controller::{FetchState, OverlayController};
pub use driver::{OverlayHandle, spawn_overlay};
pub use legend::Legend;

use crate::models::time::TimeCursor;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

/// The shared time cursor the external time-dimension control drives. The
/// control writes it on every slider interaction or playback tick; the
/// overlay driver reads it when reconciling fetch completions.
#[derive(Debug)]
pub struct TimeDimension {
    current: AtomicI64,
    loading: AtomicBool,
}

impl TimeDimension {
    pub fn new(initial: TimeCursor) -> Self {
        Self {
            current: AtomicI64::new(initial.millis()),
            loading: AtomicBool::new(false),
        }
    }

    pub fn current_time(&self) -> TimeCursor {
        TimeCursor::from_millis(self.current.load(Ordering::SeqCst))
    }

    pub fn set_current_time(&self, time: TimeCursor) {
        self.current.store(time.millis(), Ordering::SeqCst);
    }

    /// Whether the control is mid-transition between steps. Overlay swaps are
    /// deferred while this holds.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::SeqCst);
    }
}
