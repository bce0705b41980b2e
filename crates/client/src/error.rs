use capcheck_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("URL '{0}' cannot carry path segments")]
    NotABase(String),
    #[error("'{0}' not found")]
    NotFound(String),
    #[error("'{url}' answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("Malformed payload from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Descriptor '{0}' lists no endpoint")]
    MissingEndpoint(String),
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        let message = err.to_string();
        match err {
            ClientError::NotFound(_) => ApiError::NotFound(message),
            ClientError::Decode { .. } => ApiError::Decode(message),
            ClientError::Url(_) | ClientError::NotABase(_) => ApiError::InvalidArgument(message),
            ClientError::Http(_) | ClientError::Status { .. } => ApiError::Transport(message),
            ClientError::MissingEndpoint(_) => ApiError::Internal(message),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_mapping() {
        let not_found: ApiError = ClientError::NotFound("http://repo/shells/abc".into()).into();
        assert!(matches!(not_found, ApiError::NotFound(_)));

        let status: ApiError = ClientError::Status {
            url: "http://repo/shells".into(),
            status: 503,
        }
        .into();
        assert!(matches!(status, ApiError::Transport(ref m) if m.contains("503")));

        let no_endpoint: ApiError = ClientError::MissingEndpoint("urn:aas:x".into()).into();
        assert!(matches!(no_endpoint, ApiError::Internal(_)));
    }
}
