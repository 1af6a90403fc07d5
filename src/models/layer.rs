use serde::Serialize;

/// One raster overlay the map can display: a human-facing name and the short
/// GRIB-derived code the layer tree is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerEntry {
    pub name: String,
    pub code: String,
}

/// Explicit registry of overlay layers, passed into session construction.
///
/// The registry is a plain value rather than a process-wide namespace that
/// layer types get monkey-patched into, so registration order cannot leak
/// between map instances.
#[derive(Debug, Clone, Default)]
pub struct LayerRegistry {
    layers: Vec<LayerEntry>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock GFS surface layers.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("Temperature", "tmp");
        registry.register("Precipitation", "prate");
        registry.register("Pressure", "pres");
        registry.register("Humidity", "rh");
        registry.register("Wind speed (gust)", "gust");
        registry
    }

    /// Register a layer. A repeated name replaces the earlier entry rather
    /// than shadowing it.
    pub fn register(&mut self, name: &str, code: &str) {
        if let Some(existing) = self.layers.iter_mut().find(|l| l.name == name) {
            existing.code = code.to_string();
        } else {
            self.layers.push(LayerEntry {
                name: name.to_string(),
                code: code.to_string(),
            });
        }
    }

    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.layers
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.code.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerEntry> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
