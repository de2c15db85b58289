use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Failure to produce a `RuleSet` or the service settings.
///
/// This is the only error kind of the crate: once a `RuleSet` exists,
/// evaluating requests against it cannot fail.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("An error occurred reading rules file {}: {source}.", .path.display())]
    Reading {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("An error occurred deserializing rules definition: {0}.")]
    Deserializing(#[from] serde_yaml::Error),

    #[error("An error occurred validating rules definition: {0}.")]
    Validation(String),

    #[error("Invalid setting {name}: {message}.")]
    Setting { name: &'static str, message: String },
}
