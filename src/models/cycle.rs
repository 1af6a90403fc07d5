use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::time::TimeCursor;

/// One run of the upstream weather model: its start timestamp and how many
/// forecast steps it produced. This is the exact wire shape of
/// `GET /api/forecast_cycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastCycle {
    pub start_datetime: DateTime<Utc>,
    pub num_forecasts: u32,
}

impl ForecastCycle {
    /// Hours covered by the cycle: `(numForecasts - 1) * hoursPerForecast`.
    pub fn hour_limit(&self, hours_per_forecast: u32) -> u32 {
        self.num_forecasts.saturating_sub(1) * hours_per_forecast
    }

    /// ISO-8601 interval string consumed by the time-dimension control,
    /// e.g. `2024-01-01T00:00:00Z/PT6H`.
    pub fn time_interval(&self, hours_per_forecast: u32) -> String {
        format!(
            "{}/PT{}H",
            self.start_datetime.format("%Y-%m-%dT%H:%M:%SZ"),
            self.hour_limit(hours_per_forecast)
        )
    }

    /// Step period string, e.g. `PT3H`.
    pub fn period(hours_per_forecast: u32) -> String {
        format!("PT{}H", hours_per_forecast)
    }

    /// Hour-truncated start key (`YYYY-MM-DDTHH`), the path segment the layer
    /// tree is rooted under for this cycle.
    pub fn start_key(&self) -> String {
        TimeCursor::from(self.start_datetime).hour_key()
    }
}
