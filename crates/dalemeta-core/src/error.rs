// crates/dalemeta-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("raw data error: {0}")]
    Parser(#[from] dalemeta_parser::ParserError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog parse error: {0}")]
    Catalog(#[from] toml::de::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, MetadataError>;
