use std::{io, path::PathBuf};

/// Misuse of the speed/accuracy formulas. The session guards against both,
/// so these only ever surface from direct calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricsError {
    #[error("duration must be positive, got {0} ms")]
    NonPositiveDuration(f64),

    #[error("accuracy needs at least one recorded character")]
    ZeroTotal,
}

/// Why a remote word list could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("could not decode word list: {0}")]
    Parse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
