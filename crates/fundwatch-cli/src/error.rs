use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] fundwatch_core::ValidationError),

    #[error("failed to fetch funds: {0}")]
    Fetch(#[from] fundwatch_core::FetchError),

    #[error("delivery failed: {0}")]
    Delivery(#[from] fundwatch_core::DeliveryError),

    #[error("run deadline exceeded before delivery finished")]
    DeadlineExceeded,

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("http client setup failed: {0}")]
    Http(#[from] fundwatch_core::HttpError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Fetch(_) => 3,
            Self::Delivery(_) => 4,
            Self::DeadlineExceeded => 4,
            Self::Serialization(_) => 5,
            Self::Io(_) | Self::Http(_) => 10,
        }
    }
}
