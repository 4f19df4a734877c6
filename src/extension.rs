//! File extension resolution from URLs and content types.

use reqwest::{header, Client};
use url::Url;

use crate::error::{Error, Result};

/// Preferred extensions for common media types.
///
/// The `mime_guess` database lists every known extension for a type in
/// alphabetical order, which would pick `.jpe` for `image/jpeg`. This table
/// pins the conventional choice; anything not listed falls back to the
/// database.
const PREFERRED_EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("image/svg+xml", "svg"),
    ("video/mp4", "mp4"),
    ("video/quicktime", "mov"),
    ("video/webm", "webm"),
    ("audio/mpeg", "mp3"),
    ("audio/wav", "wav"),
    ("audio/ogg", "ogg"),
    ("text/plain", "txt"),
    ("text/html", "html"),
    ("application/json", "json"),
    ("application/pdf", "pdf"),
    ("application/zip", "zip"),
];

/// Outcome of a HEAD probe for a content-type mapping.
enum ProbeOutcome {
    /// The response carried a content-type we could map to an extension.
    Mapped(String),
    /// The response had no content-type, or one with no known extension.
    Unmapped,
    /// The request itself failed (DNS, connection, timeout).
    Failed,
}

/// Resolve the file extension for a URL.
///
/// Tries the URL path first; if the path carries no extension, falls back to
/// a HEAD probe of the `content-type` header. Returns the extension with its
/// leading dot, lowercased (e.g. `.jpg`).
///
/// Fails with [`Error::UndeterminableExtension`] when neither source yields
/// an extension.
pub async fn resolve_extension(client: &Client, url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    if let Some(ext) = path_extension(&parsed) {
        return Ok(ext);
    }

    match probe_content_type(client, url).await {
        ProbeOutcome::Mapped(ext) => Ok(ext),
        ProbeOutcome::Unmapped => {
            tracing::debug!("No mappable content-type for {}", url);
            Err(Error::UndeterminableExtension(url.to_string()))
        }
        ProbeOutcome::Failed => Err(Error::UndeterminableExtension(url.to_string())),
    }
}

/// Extract the extension from a URL path, if it has one.
///
/// Uses `splitext`-style semantics on the final path segment: leading dots
/// never start an extension (`.bashrc` has none) and a lone trailing dot is
/// not a valid extension. The result is lowercased and includes the dot.
pub fn path_extension(url: &Url) -> Option<String> {
    let segment = url.path().rsplit('/').next().unwrap_or("");
    let stem = segment.trim_start_matches('.');
    let dot = stem.rfind('.')?;
    let ext = &stem[dot + 1..];
    if ext.is_empty() {
        return None;
    }
    Some(format!(".{}", ext.to_ascii_lowercase()))
}

/// Map a content-type header value to a conventional file extension.
///
/// Parameters after a `;` are ignored. Returns the extension with its
/// leading dot, or `None` for unknown types.
pub fn extension_for_content_type(content_type: &str) -> Option<String> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    if essence.is_empty() {
        return None;
    }

    if let Some((_, ext)) = PREFERRED_EXTENSIONS
        .iter()
        .find(|(mime, _)| *mime == essence)
    {
        return Some(format!(".{}", ext));
    }

    mime_guess::get_mime_extensions_str(&essence)
        .and_then(|exts| exts.first())
        .map(|ext| format!(".{}", ext))
}

/// Issue a HEAD request and classify the content-type outcome.
///
/// Transport failures are not propagated: the caller treats a failed probe
/// the same as an unmappable content-type, and the distinction only matters
/// for logging.
async fn probe_content_type(client: &Client, url: &str) -> ProbeOutcome {
    let response = match client.head(url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("Content-type probe failed for {}: {}", url, e);
            return ProbeOutcome::Failed;
        }
    };

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    match content_type.and_then(extension_for_content_type) {
        Some(ext) => ProbeOutcome::Mapped(ext),
        None => ProbeOutcome::Unmapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn test_path_extension_simple() {
        assert_eq!(
            path_extension(&parse("http://x/a/b.png")),
            Some(".png".to_string())
        );
        assert_eq!(
            path_extension(&parse("http://x/archive.tar.gz")),
            Some(".gz".to_string())
        );
    }

    #[test]
    fn test_path_extension_lowercases() {
        assert_eq!(
            path_extension(&parse("http://x/a/b.PNG")),
            Some(".png".to_string())
        );
        assert_eq!(
            path_extension(&parse("http://x/VIDEO.Mp4")),
            Some(".mp4".to_string())
        );
    }

    #[test]
    fn test_path_extension_ignores_query() {
        assert_eq!(
            path_extension(&parse("http://x/a.jpg?token=v1.2")),
            Some(".jpg".to_string())
        );
    }

    #[test]
    fn test_path_extension_none() {
        assert_eq!(path_extension(&parse("http://x/download")), None);
        assert_eq!(path_extension(&parse("http://x")), None);
        assert_eq!(path_extension(&parse("http://x/a/b/")), None);
    }

    #[test]
    fn test_path_extension_dotfiles_and_trailing_dots() {
        assert_eq!(path_extension(&parse("http://x/.bashrc")), None);
        assert_eq!(path_extension(&parse("http://x/file.")), None);
        assert_eq!(
            path_extension(&parse("http://x/.config.toml")),
            Some(".toml".to_string())
        );
    }

    #[test]
    fn test_extension_for_content_type_preferred() {
        assert_eq!(
            extension_for_content_type("image/jpeg"),
            Some(".jpg".to_string())
        );
        assert_eq!(
            extension_for_content_type("video/mp4"),
            Some(".mp4".to_string())
        );
    }

    #[test]
    fn test_extension_for_content_type_strips_parameters() {
        assert_eq!(
            extension_for_content_type("text/html; charset=utf-8"),
            Some(".html".to_string())
        );
        assert_eq!(
            extension_for_content_type("image/PNG;foo=bar"),
            Some(".png".to_string())
        );
    }

    #[test]
    fn test_extension_for_content_type_unknown() {
        assert_eq!(extension_for_content_type("application/x-zzz-unknown"), None);
        assert_eq!(extension_for_content_type(""), None);
        assert_eq!(extension_for_content_type(";charset=utf-8"), None);
    }
}
