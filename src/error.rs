use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobscopeError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed XML document: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Invalid last build timestamp '{value}' for job '{job}'")]
    InvalidTimestamp { job: String, value: String },
}

pub type Result<T> = std::result::Result<T, JobscopeError>;
