use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("environment already installed for this process")]
    AlreadyInstalled,

    #[error("invalid environment description: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EnvError>;
