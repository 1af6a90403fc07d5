use crate::models::cycle::ForecastCycle;
use crate::models::layer::LayerRegistry;
use crate::overlay::legend::Legend;
use crate::overlay::tile_url::tile_template;
use crate::traits::CycleProvider;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Frontend-facing knobs for one viewer instance.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Backend serving `/api/forecast_cycle` and the `/layers` tree.
    pub server_url: String,
    pub hours_per_forecast: u32,
    /// Player transition time handed to the time-dimension control.
    pub transition_time_ms: u32,
    /// Layer shown (and legend rendered) on first paint.
    pub default_layer: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:3000".to_string(),
            hours_per_forecast: 3,
            transition_time_ms: 2000,
            default_layer: "Temperature".to_string(),
        }
    }
}

/// Options the host time-dimension control is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeDimensionOptions {
    pub time_interval: String,
    pub period: String,
    pub transition_time_ms: u32,
}

/// One raster overlay entry for the layers control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileOverlay {
    pub name: String,
    pub template: String,
}

/// Everything the map binds to for one forecast cycle. Sessions are built
/// whole and replaced whole; nothing inside is patched when a new cycle
/// arrives.
#[derive(Debug, Clone)]
pub struct MapSession {
    pub cycle: ForecastCycle,
    pub time_options: TimeDimensionOptions,
    pub tile_overlays: Vec<TileOverlay>,
    /// Cycle-scoped root the vector overlay fetches from.
    pub vector_base_url: String,
    pub legend: Legend,
}

impl MapSession {
    pub fn build(cycle: ForecastCycle, registry: &LayerRegistry, config: &ViewerConfig) -> Self {
        let layers_url = format!("{}/layers", config.server_url.trim_end_matches('/'));
        let start = cycle.start_key();

        let tile_overlays = registry
            .iter()
            .map(|layer| TileOverlay {
                name: layer.name.clone(),
                template: tile_template(&layers_url, &start, &layer.code),
            })
            .collect();

        let default_code = registry
            .code_for(&config.default_layer)
            .or_else(|| registry.iter().next().map(|l| l.code.as_str()))
            .unwrap_or("tmp");

        MapSession {
            time_options: TimeDimensionOptions {
                time_interval: cycle.time_interval(config.hours_per_forecast),
                period: ForecastCycle::period(config.hours_per_forecast),
                transition_time_ms: config.transition_time_ms,
            },
            tile_overlays,
            vector_base_url: format!("{}/{}", layers_url, start),
            legend: Legend::new(layers_url, default_code),
            cycle,
        }
    }
}

/// What a bootstrap attempt did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// New cycle: previous session torn down, fresh one built.
    Rebuilt,
    /// Same cycle as last time: existing session untouched.
    Unchanged,
    /// Bootstrap fetch failed: existing session untouched, retried on the
    /// next visibility event.
    Failed,
}

/// Owns the bootstrap policy: fetch the current cycle, rebuild the whole
/// session when it changed, do nothing when it did not. Call [`refresh`] once
/// at startup and again every time the tab becomes visible.
///
/// [`refresh`]: Viewer::refresh
pub struct Viewer {
    client: Arc<dyn CycleProvider>,
    registry: LayerRegistry,
    config: ViewerConfig,
    last_start: Option<DateTime<Utc>>,
    session: Option<MapSession>,
    generation: u64,
}

impl Viewer {
    pub fn new(client: Arc<dyn CycleProvider>, registry: LayerRegistry, config: ViewerConfig) -> Self {
        Self {
            client,
            registry,
            config,
            last_start: None,
            session: None,
            generation: 0,
        }
    }

    pub async fn refresh(&mut self) -> RefreshOutcome {
        let cycle = match self.client.current_cycle().await {
            Ok(cycle) => cycle,
            Err(err) => {
                eprintln!("⚠️ Forecast cycle bootstrap failed: {}", err);
                return RefreshOutcome::Failed;
            }
        };

        if self.last_start == Some(cycle.start_datetime) {
            return RefreshOutcome::Unchanged;
        }

        // Full reset rather than patching layer sources in place: simpler,
        // at the cost of losing pan/zoom on a cycle change.
        self.session = Some(MapSession::build(cycle, &self.registry, &self.config));
        self.last_start = Some(cycle.start_datetime);
        self.generation += 1;
        RefreshOutcome::Rebuilt
    }

    pub fn session(&self) -> Option<&MapSession> {
        self.session.as_ref()
    }

    /// Bumps once per rebuild; lets callers detect teardown churn.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct ScriptedProvider {
        responses: Mutex<Vec<Result<ForecastCycle, String>>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<Result<ForecastCycle, String>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
            })
        }
    }

    #[async_trait]
    impl CycleProvider for ScriptedProvider {
        async fn current_cycle(&self) -> Result<ForecastCycle, String> {
            let mut responses = self.responses.lock().unwrap();
            if responses.len() > 1 {
                responses.remove(0)
            } else {
                responses[0].clone()
            }
        }
    }

    fn cycle(day: u32) -> ForecastCycle {
        ForecastCycle {
            start_datetime: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            num_forecasts: 3,
        }
    }

    fn viewer(provider: Arc<ScriptedProvider>) -> Viewer {
        Viewer::new(provider, LayerRegistry::standard(), ViewerConfig::default())
    }

    #[tokio::test]
    async fn test_first_refresh_builds_session() {
        let mut v = viewer(ScriptedProvider::new(vec![Ok(cycle(1))]));
        assert_eq!(v.refresh().await, RefreshOutcome::Rebuilt);

        let session = v.session().unwrap();
        assert_eq!(session.time_options.time_interval, "2024-01-01T00:00:00Z/PT6H");
        assert_eq!(session.time_options.period, "PT3H");
        assert_eq!(session.tile_overlays.len(), 5);
        assert_eq!(
            session.tile_overlays[0].template,
            "http://localhost:3000/layers/2024-01-01T00/{d}/tmp/{z}/{x}/{y}.png"
        );
        assert_eq!(
            session.vector_base_url,
            "http://localhost:3000/layers/2024-01-01T00"
        );
        assert_eq!(
            session.legend.image_url(),
            "http://localhost:3000/layers/tmp.png"
        );
    }

    #[tokio::test]
    async fn test_unchanged_cycle_is_a_no_op() {
        let mut v = viewer(ScriptedProvider::new(vec![Ok(cycle(1))]));
        v.refresh().await;
        let generation = v.generation();

        assert_eq!(v.refresh().await, RefreshOutcome::Unchanged);
        assert_eq!(v.refresh().await, RefreshOutcome::Unchanged);
        assert_eq!(v.generation(), generation);
    }

    #[tokio::test]
    async fn test_new_cycle_rebuilds_from_scratch() {
        let mut v = viewer(ScriptedProvider::new(vec![Ok(cycle(1)), Ok(cycle(2))]));
        v.refresh().await;

        assert_eq!(v.refresh().await, RefreshOutcome::Rebuilt);
        assert_eq!(v.generation(), 2);
        assert_eq!(
            v.session().unwrap().vector_base_url,
            "http://localhost:3000/layers/2024-01-02T00"
        );
    }

    #[tokio::test]
    async fn test_failed_bootstrap_keeps_existing_session() {
        let mut v = viewer(ScriptedProvider::new(vec![
            Ok(cycle(1)),
            Err("500 Internal Server Error".to_string()),
            Ok(cycle(1)),
        ]));
        v.refresh().await;

        assert_eq!(v.refresh().await, RefreshOutcome::Failed);
        assert!(v.session().is_some());
        assert_eq!(v.generation(), 1);

        // Retry on the next visibility event; still the same cycle.
        assert_eq!(v.refresh().await, RefreshOutcome::Unchanged);
    }

    #[tokio::test]
    async fn test_initial_failure_leaves_no_session() {
        let mut v = viewer(ScriptedProvider::new(vec![Err("connection refused".into())]));
        assert_eq!(v.refresh().await, RefreshOutcome::Failed);
        assert!(v.session().is_none());
    }
}
