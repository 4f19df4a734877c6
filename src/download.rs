//! File downloading.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::{header, Client};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::extension::resolve_extension;

/// Downloads remote files into the configured storage directory.
pub struct Downloader {
    client: Client,
    config: Config,
}

impl Downloader {
    /// Create a new downloader with the given configuration.
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self { client, config })
    }

    /// The configuration this downloader was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Download a file from a URL and return the path it was written to.
    ///
    /// The file is named `<uuid><extension>` inside the storage directory,
    /// with the extension resolved per [`resolve_extension`]. Caller-supplied
    /// headers override the defaults on name collision. On any failure during
    /// the request or write phase, a partially written file is removed before
    /// the error is propagated.
    pub async fn download(
        &self,
        url: &str,
        custom_headers: Option<&HashMap<String, String>>,
    ) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.config.storage_path).await?;

        let url = rewrite_url(
            url,
            &self.config.public_base_url,
            &self.config.internal_base_url,
        );

        let file_id = Uuid::new_v4();
        let extension = resolve_extension(&self.client, &url).await?;
        let local_path = self
            .config
            .storage_path
            .join(format!("{}{}", file_id, extension));

        tracing::info!("Downloading file from URL: {}", url);

        match self.fetch_to_file(&url, custom_headers, &local_path).await {
            Ok(()) => {
                tracing::info!("File downloaded successfully: {}", local_path.display());
                Ok(local_path)
            }
            Err(e) => {
                tracing::error!("Error downloading file from {}: {}", url, e);
                // Best-effort removal of a partially written file.
                let _ = tokio::fs::remove_file(&local_path).await;
                Err(e)
            }
        }
    }

    /// Issue the GET request and stream the body to `local_path`.
    async fn fetch_to_file(
        &self,
        url: &str,
        custom_headers: Option<&HashMap<String, String>>,
        local_path: &Path,
    ) -> Result<()> {
        let headers = build_headers(custom_headers)?;
        let response = self.client.get(url).headers(headers).send().await?;
        tracing::debug!("HTTP status: {}", response.status());
        let response = response.error_for_status()?;

        let mut file = File::create(local_path).await?;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
            if chunk.is_empty() {
                continue;
            }
            file.write_all(&chunk).await?;
        }

        file.flush().await?;
        Ok(())
    }
}

/// Rewrite an externally-issued URL to its internal network equivalent.
///
/// Exactly one substitution, anchored at the start of the string: a URL that
/// merely contains the external base later in its path is left alone.
pub fn rewrite_url(url: &str, external_base: &str, internal_base: &str) -> String {
    if !external_base.is_empty() && url.starts_with(external_base) {
        tracing::debug!(
            "Rewriting URL prefix {} -> {}",
            external_base,
            internal_base
        );
        format!("{}{}", internal_base, &url[external_base.len()..])
    } else {
        url.to_string()
    }
}

/// Build request headers from caller-supplied overrides.
///
/// The client's default User-Agent is applied at the client level; any
/// header set here, including `user-agent`, takes precedence over it.
fn build_headers(custom_headers: Option<&HashMap<String, String>>) -> Result<header::HeaderMap> {
    let mut headers = header::HeaderMap::new();

    if let Some(custom) = custom_headers {
        for (name, value) in custom {
            let header_name =
                header::HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                    Error::InvalidHeader {
                        name: name.clone(),
                        message: e.to_string(),
                    }
                })?;
            let header_value =
                header::HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }
    }

    Ok(headers)
}
