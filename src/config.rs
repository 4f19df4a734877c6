//! Downloader configuration.
//!
//! The library receives all configuration explicitly; reading environment
//! variables is confined to [`Config::from_env`], which only the process
//! entry point should call.

use std::env;
use std::path::PathBuf;

/// Default browser-like User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Default public-facing base URL of the object store.
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://78.46.146.79:9000";

/// Default internal (private network) base URL of the object store.
pub const DEFAULT_INTERNAL_BASE_URL: &str = "http://minio:9000";

/// Downloader configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory downloaded files are written into.
    pub storage_path: PathBuf,

    /// External base address rewritten to `internal_base_url` when a
    /// download URL starts with it.
    pub public_base_url: String,

    /// Internal base address substituted for `public_base_url`.
    pub internal_base_url: String,

    /// User-Agent header sent with probe and download requests.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("/tmp/"),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            internal_base_url: DEFAULT_INTERNAL_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Build a configuration from the process environment.
    ///
    /// `S3_PUBLIC_URL` and `S3_ENDPOINT_URL` override the rewrite prefixes;
    /// everything else keeps its default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(public) = env::var("S3_PUBLIC_URL") {
            config.public_base_url = public;
        }
        if let Ok(internal) = env::var("S3_ENDPOINT_URL") {
            config.internal_base_url = internal;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage_path, PathBuf::from("/tmp/"));
        assert_eq!(config.public_base_url, DEFAULT_PUBLIC_BASE_URL);
        assert_eq!(config.internal_base_url, DEFAULT_INTERNAL_BASE_URL);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_from_env_overrides_rewrite_prefixes() {
        env::set_var("S3_PUBLIC_URL", "http://public.test:9000");
        env::set_var("S3_ENDPOINT_URL", "http://internal.test:9000");
        let config = Config::from_env();
        env::remove_var("S3_PUBLIC_URL");
        env::remove_var("S3_ENDPOINT_URL");

        assert_eq!(config.public_base_url, "http://public.test:9000");
        assert_eq!(config.internal_base_url, "http://internal.test:9000");
        // Everything else keeps its default.
        assert_eq!(config.storage_path, PathBuf::from("/tmp/"));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }
}
