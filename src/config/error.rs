use std::path::PathBuf;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`Config`](super::Config).
    #[error("invalid config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The platform does not provide a config directory.
    #[error("could not determine XDG config directory")]
    NoConfigDir,

    /// A request timeout of zero seconds was configured.
    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,

    /// An environment override could not be parsed.
    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}
