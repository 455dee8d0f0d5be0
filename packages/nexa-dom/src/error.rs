use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("vendor prefix table already installed")]
    PrefixesInstalled,
}

pub type Result<T> = std::result::Result<T, DomError>;
