use crate::config::Config;
use crate::cycle::LocalCycleProvider;
use crate::endpoints::handlers::{AppState, forecast_cycle_handler, webmap_handler};
use crate::models::layer::LayerRegistry;
use crate::traits::CycleProvider;
use crate::utils::status::print_layer_summary;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};

pub struct MapServer {
    config: Config,
    state: Arc<AppState>,
}

impl MapServer {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let provider = LocalCycleProvider::new(config.layers_folder.clone());
        let state = Arc::new(AppState {
            provider: Arc::new(provider),
        });
        Ok(Self { config, state })
    }

    pub async fn start(self) -> anyhow::Result<()> {
        let mut app = Router::new()
            .route("/api/forecast_cycle", get(forecast_cycle_handler))
            .route("/map", get(webmap_handler))
            .with_state(self.state.clone());

        if self.config.dev {
            app = app
                .nest_service("/layers", ServeDir::new(&self.config.layers_folder))
                .layer(CorsLayer::permissive());
        }

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = tokio::net::TcpListener::bind(addr).await?;

        match self.state.provider.current_cycle().await {
            Ok(cycle) => {
                println!(
                    "📅 Current forecast cycle: {} ({} steps)",
                    cycle.start_key(),
                    cycle.num_forecasts
                );
            }
            Err(e) => {
                println!(
                    "⚠️ No current forecast cycle found: {}\n\n\
                    Point --layers-folder at a tree whose `current` symlink \
                    targets a cycle directory (YYYY-MM-DDTHH). The endpoint \
                    will answer 500 until the ETL publishes one.",
                    e
                );
            }
        }

        print_layer_summary(&LayerRegistry::standard());

        println!(
            r#"
    🌤 skycast serving on {}

    🔁 Forecast cycle metadata (JSON)
       → http://{}/api/forecast_cycle

    🌍 Browse the time-dimension map
       → http://{}/map
            "#,
            addr, addr, addr
        );
        if self.config.dev {
            println!(
                "    🗂 Dev mode: layer tree at http://{}/layers (CORS open)\n",
                addr
            );
        }

        axum::serve(listener, app).await?;

        Ok(())
    }
}
