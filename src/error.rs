use thiserror::Error;

use crate::config::ConfigError;

/// Fatal errors surfaced by the runner and the binary
#[derive(Error, Debug)]
pub enum RunError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("tick step of {dt} s is not a valid duration: {source}")]
    Timestep {
        dt: f32,
        #[source]
        source: std::time::TryFromFloatSecsError,
    },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RunError>;
