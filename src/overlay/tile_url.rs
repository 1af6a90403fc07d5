use crate::models::time::TimeCursor;

/// Placeholder the host time-dimension plugin substitutes with the cursor's
/// hour offset from the cycle start.
pub const HOUR_OFFSET_PLACEHOLDER: &str = "{d}";

/// Full tile template for one raster layer, with zoom/column/row left to the
/// host tiling library: `{layers_url}/{start}/{d}/{code}/{z}/{x}/{y}.png`.
///
/// Raster layers are deliberately stateless: the URL is a pure function of
/// its inputs and cache invalidation rides on the time component changing.
pub fn tile_template(layers_url: &str, start_key: &str, layer_code: &str) -> String {
    format!(
        "{}/{}/{{d}}/{}/{{z}}/{{x}}/{{y}}.png",
        layers_url.trim_end_matches('/'),
        start_key,
        layer_code
    )
}

/// Tile URL with concrete `z/x/y` but the hour offset still held by the host
/// plugin's placeholder.
pub fn tile_url(layers_url: &str, start_key: &str, layer_code: &str, z: u8, x: u32, y: u32) -> String {
    format!(
        "{}/{}/{{d}}/{}/{}/{}/{}.png",
        layers_url.trim_end_matches('/'),
        start_key,
        layer_code,
        z,
        x,
        y
    )
}

/// Substitute the hour offset, yielding a fetchable URL.
pub fn resolve_hour_offset(url: &str, hour_offset: i64) -> String {
    url.replace(HOUR_OFFSET_PLACEHOLDER, &hour_offset.to_string())
}

/// Request key for the vector field at `time`: `{base}/{YYYY-MM-DDTHH}.json`.
pub fn vector_url(base_url: &str, time: TimeCursor) -> String {
    format!("{}/{}.json", base_url.trim_end_matches('/'), time.hour_key())
}
