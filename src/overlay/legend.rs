/// Legend image for the selected overlay: `{base_url}/{layer_code}.png`,
/// swapped whenever the user picks a different overlay.
#[derive(Debug, Clone)]
pub struct Legend {
    base_url: String,
    current_code: String,
}

impl Legend {
    pub fn new(base_url: impl Into<String>, default_code: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            current_code: default_code.into(),
        }
    }

    pub fn current_code(&self) -> &str {
        &self.current_code
    }

    pub fn image_url(&self) -> String {
        format!(
            "{}/{}.png",
            self.base_url.trim_end_matches('/'),
            self.current_code
        )
    }

    /// The user selected another overlay; returns the new image URL.
    pub fn on_selection_changed(&mut self, code: &str) -> String {
        self.current_code = code.to_string();
        self.image_url()
    }
}
