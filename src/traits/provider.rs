use crate::models::cycle::ForecastCycle;
use async_trait::async_trait;

/// Source of the current forecast cycle's metadata. The server resolves it
/// from the layer tree on disk; tests substitute fixed values.
#[async_trait]
pub trait CycleProvider: Send + Sync {
    async fn current_cycle(&self) -> Result<ForecastCycle, String>;
}
