use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer failed to parse or a value has the wrong type.
    #[error("failed to load configuration: {0}")]
    Figment(#[from] figment::Error),

    /// Parsed, but unusable (zero timeouts and the like).
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
