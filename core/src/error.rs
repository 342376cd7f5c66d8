use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneticsError {
    #[error("Invalid DNA Format")]
    InvalidFormat,

    #[error("DNA Integrity Check Failed")]
    IntegrityCheckFailed,

    #[error("Invalid Genotype Structure: {reason}")]
    InvalidStructure { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GeneticsError {
    pub fn structure(reason: impl Into<String>) -> Self {
        Self::InvalidStructure { reason: reason.into() }
    }
}

pub type GeneticsResult<T> = Result<T, GeneticsError>;
