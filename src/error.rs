use thiserror::Error;

/// Embedding documentation referenced by integration errors
pub const EMBEDDING_DOCS_URL: &str = "https://h.readthedocs.io/en/latest/embedding.html";

/// Main error type for hypothesis-config operations
#[derive(Debug, Error)]
pub enum HypothesisConfigError {
    #[error("No <link type=\"application/annotator+html\"> element found in the document")]
    MissingAppLink,

    #[error("hypothesisConfig must be a function, see: {docs}")]
    HostConfigNotCallable { docs: &'static str },

    #[error("Invalid host page config: {0}")]
    InvalidHostPageConfig(String),

    #[error("Settings extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),
}

impl HypothesisConfigError {
    pub fn host_config_not_callable() -> Self {
        Self::HostConfigNotCallable {
            docs: EMBEDDING_DOCS_URL,
        }
    }

    pub fn invalid_host_page_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidHostPageConfig(msg.into())
    }

    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Whether this error signals a host-page integration mistake rather
    /// than a malformed input or I/O failure.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            Self::MissingAppLink | Self::HostConfigNotCallable { .. }
        )
    }
}

/// Failure of the embedded JSON settings source.
///
/// The annotator treats this as "no contribution"; the sidebar treats it as fatal.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("config block #{index} is not valid JSON: {source}")]
    InvalidJson {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("config block #{index} is not a JSON object")]
    NotAnObject { index: usize },
}

/// Result type alias for hypothesis-config operations
pub type Result<T> = std::result::Result<T, HypothesisConfigError>;
