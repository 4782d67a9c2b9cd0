/// Errors raised while reading a dataset or writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("zip archive failed: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("shape registry: {0}")]
    Registry(#[from] markboard::error::BoardError),
}
