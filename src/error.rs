use std::fmt;

#[derive(Debug)]
pub enum FetchDogsError {
    /// The service answered with a non-success status.
    ApiError {
        status: u16,
        message: String,
    },
    /// The service answered 2xx but the payload was not what we expected.
    Malformed(String),
    /// Rejected locally before any request was made.
    Validation(String),
    ConfigError(String),
    SessionError(String),
    NetworkError(reqwest::Error),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    Other(String),
}

impl FetchDogsError {
    /// Short text suitable for a notice, without the category prefix.
    pub fn user_message(&self) -> String {
        match self {
            FetchDogsError::ApiError { status, message } => {
                if message.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    message.clone()
                }
            }
            FetchDogsError::Malformed(msg)
            | FetchDogsError::Validation(msg)
            | FetchDogsError::ConfigError(msg)
            | FetchDogsError::SessionError(msg)
            | FetchDogsError::Other(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FetchDogsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchDogsError::ApiError { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            FetchDogsError::Malformed(msg) => write!(f, "Invalid response format: {}", msg),
            FetchDogsError::Validation(msg) => write!(f, "{}", msg),
            FetchDogsError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            FetchDogsError::SessionError(msg) => write!(f, "Session error: {}", msg),
            FetchDogsError::NetworkError(e) => write!(f, "Network error: {}", e),
            FetchDogsError::IoError(e) => write!(f, "IO error: {}", e),
            FetchDogsError::JsonError(e) => write!(f, "JSON error: {}", e),
            FetchDogsError::YamlError(e) => write!(f, "YAML error: {}", e),
            FetchDogsError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FetchDogsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchDogsError::NetworkError(e) => Some(e),
            FetchDogsError::IoError(e) => Some(e),
            FetchDogsError::JsonError(e) => Some(e),
            FetchDogsError::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchDogsError {
    fn from(err: reqwest::Error) -> Self {
        FetchDogsError::NetworkError(err)
    }
}

impl From<std::io::Error> for FetchDogsError {
    fn from(err: std::io::Error) -> Self {
        FetchDogsError::IoError(err)
    }
}

impl From<serde_json::Error> for FetchDogsError {
    fn from(err: serde_json::Error) -> Self {
        FetchDogsError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for FetchDogsError {
    fn from(err: serde_yaml::Error) -> Self {
        FetchDogsError::YamlError(err)
    }
}

impl From<anyhow::Error> for FetchDogsError {
    fn from(err: anyhow::Error) -> Self {
        FetchDogsError::Other(format!("{:#}", err))
    }
}

impl From<String> for FetchDogsError {
    fn from(msg: String) -> Self {
        FetchDogsError::Other(msg)
    }
}

impl From<&str> for FetchDogsError {
    fn from(msg: &str) -> Self {
        FetchDogsError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FetchDogsError>;
