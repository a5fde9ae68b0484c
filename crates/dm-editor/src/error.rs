use thiserror::Error;

/// Failure to decode an event script.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("event script is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected an event object or an array of events, found {0}")]
    NotAnEvent(&'static str),
}

/// Failure to load an [`EditorConfig`](crate::config::EditorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse editor config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
