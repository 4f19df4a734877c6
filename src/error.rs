//! Error types for the file-fetcher library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum Error {
    // Extension resolution errors
    #[error("Could not determine file extension from URL: {0}")]
    UndeterminableExtension(String),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors (transport failures and non-2xx statuses)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes for the CLI binary.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const EXTENSION_ERROR: i32 = 2;
    pub const DOWNLOAD_ERROR: i32 = 3;
    pub const UNEXPECTED_ERROR: i32 = 4;
}
