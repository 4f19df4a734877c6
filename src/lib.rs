//! File Fetcher - download remote files to local storage
//!
//! This library downloads a remote file into a storage directory under a
//! random UUID filename, inferring the file extension from the URL path or,
//! failing that, from a HEAD probe of the response content-type.
//!
//! # Features
//!
//! - Extension inference from URL paths and content-type headers
//! - External to internal URL prefix rewriting for private-network fetches
//! - Streamed writes with partial-file cleanup on failure
//! - Caller-supplied request headers (override the default User-Agent)
//!
//! # Example
//!
//! ```no_run
//! use file_fetcher::{Config, Downloader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let downloader = Downloader::new(Config::default())?;
//!     let path = downloader
//!         .download("https://example.com/image.jpg", None)
//!         .await?;
//!     println!("saved to {}", path.display());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod extension;

// Re-exports for convenience
pub use config::Config;
pub use download::{rewrite_url, Downloader};
pub use error::{Error, Result};
pub use extension::{extension_for_content_type, path_extension, resolve_extension};
