use crate::models::cycle::ForecastCycle;
use crate::models::time::TimeCursor;
use crate::overlay::tile_url::vector_url;
use crate::traits::{CycleProvider, VectorData, VectorSource};
use async_trait::async_trait;

/// HTTP client for the bootstrap endpoint (`{api}/api/forecast_cycle`).
#[derive(Debug, Clone)]
pub struct CycleClient {
    base_url: String,
    http: reqwest::Client,
}

impl CycleClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/forecast_cycle", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CycleProvider for CycleClient {
    async fn current_cycle(&self) -> Result<ForecastCycle, String> {
        let url = self.endpoint();
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("GET {}: {}", url, e))?;
        if !response.status().is_success() {
            return Err(format!("GET {} returned {}", url, response.status()));
        }
        response
            .json::<ForecastCycle>()
            .await
            .map_err(|e| format!("GET {}: invalid cycle payload: {}", url, e))
    }
}

/// Fetches time-indexed vector payloads over HTTP. Failures are returned to
/// the controller, which degrades them to a hidden overlay.
#[derive(Debug, Clone)]
pub struct HttpVectorSource {
    base_url: String,
    http: reqwest::Client,
}

impl HttpVectorSource {
    /// `base_url` is the cycle-scoped layer root, e.g.
    /// `{server}/layers/2024-01-01T00`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl VectorSource for HttpVectorSource {
    async fn fetch(&self, time: TimeCursor) -> Result<VectorData, String> {
        let url = vector_url(&self.base_url, time);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("GET {}: {}", url, e))?;
        if !response.status().is_success() {
            return Err(format!("GET {} returned {}", url, response.status()));
        }
        // Anything that is not an array of objects counts as malformed.
        response
            .json::<VectorData>()
            .await
            .map_err(|e| format!("GET {}: malformed payload: {}", url, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_endpoint() {
        assert_eq!(
            CycleClient::new("http://localhost:3000/").endpoint(),
            "http://localhost:3000/api/forecast_cycle"
        );
    }
}
