pub mod client;
pub mod config;
pub mod cycle;
pub mod endpoints;
pub mod models;
pub mod overlay;
pub mod traits;
pub mod utils;
pub mod viewer;

pub use config::Config;
pub use endpoints::MapServer;
pub use models::cycle::ForecastCycle;
pub use models::layer::LayerRegistry;
pub use models::time::TimeCursor;
pub use overlay::{OverlayController, OverlayHandle, TimeDimension, spawn_overlay};
pub use viewer::{MapSession, RefreshOutcome, Viewer, ViewerConfig};
