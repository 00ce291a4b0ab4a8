use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContribError>;

#[derive(Error, Debug)]
pub enum ContribError {
    #[error("Usage error: {0}")]
    Usage(String),
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{platform} API error ({status}): {body}")]
    Upstream {
        platform: String,
        status: u16,
        body: String,
    },
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("GitHub GraphQL error: {0}")]
    GraphQl(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ContribError {
    pub fn upstream(platform: &str, status: u16, body: impl Into<String>) -> Self {
        ContribError::Upstream {
            platform: platform.to_string(),
            status,
            body: body.into(),
        }
    }
}
