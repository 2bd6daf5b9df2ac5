use thiserror::Error;
use url::Url;

/// Why a URL was refused before being handed to the system browser.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    #[error("URL has no host")]
    MissingHost,
}

/// Validate a URL before `open::that()` sees it.
///
/// Source links come from remote JSON; anything but http(s) with a host
/// (e.g. `file://`, `javascript:`) could make the opener launch something
/// other than a browser.
///
/// ```
/// use boomer::util::validate_url_for_open;
///
/// assert!(validate_url_for_open("https://knowyourmeme.com").is_ok());
/// assert!(validate_url_for_open("file:///etc/passwd").is_err());
/// ```
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}
