//! Error types shared by the catalog, the News Service client and the submitter.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    // Transport errors
    #[error("news service responded with HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to reach news service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("news service body is not an article list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid news service URL: {0}")]
    Endpoint(#[from] url::ParseError),

    // Selection errors
    #[error("unknown source: {0} (use --list-sources to see the available ids)")]
    UnknownSource(String),

    // Catalog errors
    #[error("failed to read catalog {path}: {source}")]
    CatalogRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    CatalogParse(#[from] serde_yaml::Error),

    #[error("invalid catalog: {0}")]
    CatalogInvalid(String),
}

pub type NewsResult<T> = Result<T, NewsError>;
