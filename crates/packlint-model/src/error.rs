use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid version string: {value}")]
    InvalidVersion { value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
