pub mod provider;
pub mod source;

pub use provider::CycleProvider;
pub use source::{OverlaySink, VectorData, VectorSource};
