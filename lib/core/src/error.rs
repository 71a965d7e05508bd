use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    #[error("Invalid signature for '{id}': {reason}")]
    InvalidSignature { id: String, reason: String },

    #[error("Duplicate monument id: {0}")]
    DuplicateId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
