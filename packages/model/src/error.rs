use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while loading a page snapshot
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid page JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid props for component '{id}' ({component_type}): {message}")]
    InvalidProps {
        id: String,
        component_type: String,
        message: String,
    },
}
