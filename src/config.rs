use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "skycast",
    about = "Forecast-cycle metadata and weather layer server"
)]
pub struct Config {
    /// Root of the layer tree: one directory per cycle plus a `current`
    /// symlink maintained by the ETL pipeline
    #[arg(long, default_value = "layers")]
    pub layers_folder: PathBuf,

    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Development mode: serve the layer tree under /layers and allow any
    /// origin. In production a CDN fronts the tree instead.
    #[arg(long)]
    pub dev: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            layers_folder: PathBuf::from("layers"),
            port: 3000,
            dev: false,
        }
    }
}
