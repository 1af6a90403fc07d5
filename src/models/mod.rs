pub mod cycle;
pub mod layer;
pub mod time;
