use thiserror::Error;

pub type LensResult<T> = Result<T, LensError>;

#[derive(Error, Debug)]
pub enum LensError {
    #[error("Failed to load workbook: {0}")]
    Load(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
