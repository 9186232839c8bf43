/// Failure taxonomy shared by the provider clients and the pipeline.
///
/// Each kind maps to a distinct outcome for the caller: `InvalidInput` is
/// correctable before retrying, `NotFound` is a clean miss for a valid input,
/// `Transport` covers connection failures, timeouts and non-success HTTP
/// statuses, and `Parse` means the body decoded but did not have the shape
/// the provider normally returns.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{provider} request failed: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} returned an unexpected response: {message}")]
    Parse {
        provider: &'static str,
        message: String,
    },
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn transport(provider: &'static str, message: impl ToString) -> Self {
        Self::Transport {
            provider,
            message: message.to_string(),
        }
    }

    pub fn parse(provider: &'static str, message: impl ToString) -> Self {
        Self::Parse {
            provider,
            message: message.to_string(),
        }
    }
}
