pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error: status {status}, url: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("No graphs found in the response from {url}")]
    EmptyResult { url: String },

    #[error("Malformed graph data: {message}")]
    MalformedData { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedData {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// The fetch succeeded but returned no graph to show.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult { .. })
    }
}
