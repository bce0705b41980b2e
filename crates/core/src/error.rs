use capcheck_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Element '{path}' not found in '{container}'")]
    MissingElement { path: String, container: String },
    #[error("Submodel '{id_short}' not found for asset '{asset_id}'")]
    MissingSubmodel { asset_id: String, id_short: String },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckError {
    pub fn missing_element(path: impl Into<String>, container: impl Into<String>) -> Self {
        CheckError::MissingElement {
            path: path.into(),
            container: container.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
