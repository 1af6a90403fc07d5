pub mod local;

pub use local::LocalCycleProvider;
