//! Errors raised while loading or checking a skillroute config file

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no config at {0} (create one with `skillroute config init`)")]
    NotFound(PathBuf),

    #[error("{path} is not a valid skillroute config: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A setting parsed but is out of range; `field` is its dotted TOML path
    #[error("invalid setting {field}: {message}")]
    Validation { field: String, message: String },
}
