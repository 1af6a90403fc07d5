use crate::models::time::TimeCursor;
use async_trait::async_trait;

/// A single time step's worth of vector-field samples. The payload is opaque
/// to the controller beyond being an array of objects; the velocity renderer
/// on the host map is what interprets it.
pub type VectorData = Vec<serde_json::Value>;

/// Fetches the vector payload for one time step.
#[async_trait]
pub trait VectorSource: Send + Sync {
    async fn fetch(&self, time: TimeCursor) -> Result<VectorData, String>;
}

/// The host map's end of the overlay: show the given samples or remove the
/// overlay entirely. Implementations must tolerate repeated hides.
pub trait OverlaySink: Send {
    fn show(&mut self, samples: &VectorData);
    fn hide(&mut self);
}

impl<S: OverlaySink + ?Sized> OverlaySink for Box<S> {
    fn show(&mut self, samples: &VectorData) {
        (**self).show(samples);
    }

    fn hide(&mut self) {
        (**self).hide();
    }
}
