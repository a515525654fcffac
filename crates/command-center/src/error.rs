use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandCenterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Board error: {0}")]
    Board(#[from] crate::board::BoardError),

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

pub type Result<T> = std::result::Result<T, CommandCenterError>;
