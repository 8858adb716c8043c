/// Message recorded into a store when a failure carries no text of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Text shown to the user when an operation fails.
    pub fn failure_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
