//! Command-line argument definitions using clap.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::error::{Error, Result};

/// File fetcher CLI.
#[derive(Parser, Debug)]
#[command(
    name = "file-fetcher",
    version,
    about = "Download a remote file to local storage",
    long_about = "Downloads a remote file to local storage under a random UUID filename,\n\
                  inferring the file extension from the URL path or, failing that, from\n\
                  a content-type probe."
)]
pub struct Args {
    /// URL to download.
    pub url: String,

    /// Directory to store the downloaded file in.
    #[arg(short = 'd', long = "directory")]
    pub directory: Option<PathBuf>,

    /// Extra request header as 'Name: Value'. May be repeated.
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<String>,

    /// Browser user agent string.
    #[arg(short = 'a', long = "user-agent")]
    pub user_agent: Option<String>,

    /// External base URL rewritten to the internal address.
    #[arg(long = "public-base-url")]
    pub public_base_url: Option<String>,

    /// Internal base URL substituted for the external one.
    #[arg(long = "internal-base-url")]
    pub internal_base_url: Option<String>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(directory) = self.directory {
            config.storage_path = directory;
        }

        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }

        if let Some(public) = self.public_base_url {
            config.public_base_url = public;
        }

        if let Some(internal) = self.internal_base_url {
            config.internal_base_url = internal;
        }
    }

    /// Parse the repeated `--header` arguments into a name/value map.
    pub fn parse_headers(&self) -> Result<HashMap<String, String>> {
        let mut headers = HashMap::new();
        for raw in &self.headers {
            let (name, value) = parse_header(raw)?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

/// Split a 'Name: Value' header argument at the first colon.
fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw.split_once(':').ok_or_else(|| Error::InvalidHeader {
        name: raw.to_string(),
        message: "expected 'Name: Value'".to_string(),
    })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidHeader {
            name: raw.to_string(),
            message: "header name is empty".to_string(),
        });
    }

    Ok((name.to_string(), value.trim().to_string()))
}
