use thiserror::Error;

/// Rejected engine configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Unknown keyword category: {0}")]
    UnknownCategory(String),

    #[error("Keyword category {0} has no terms")]
    EmptyCategory(String),

    #[error("Empty term in {0}")]
    EmptyTerm(String),

    #[error("{field} must be within [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },

    #[error("{field} must be at least 1.0, got {value}")]
    MultiplierBelowOne { field: &'static str, value: f64 },

    #[error("{field} must be a finite non-negative number, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Failure to construct an engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build scan worker pool: {0}")]
    WorkerPool(String),
}
