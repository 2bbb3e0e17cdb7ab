//! Error types
//!
//! The engine itself has no failure paths. Settings coming in as JSON can be
//! rejected, and the browser canvas can refuse a drawing call.

/// Result alias for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Settings text was not valid JSON for [`crate::Settings`]
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field held a value the engine cannot run with
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl SettingsError {
    pub fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}

/// Failures setting up or drawing to a browser canvas
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no browser document")]
    NoDocument,
    #[error("2d canvas context unavailable")]
    NoContext,
    #[error("canvas call failed: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for RenderError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{:?}", value))
    }
}
