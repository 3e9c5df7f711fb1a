//! Target URL validation.
//!
//! Every stored target must be an absolute `http`/`https` URL with a host.
//! Validation returns the parsed canonical form (lowercased host, default
//! port stripped); query strings and fragments are preserved as-is.

use url::Url;

/// Errors raised while validating a target URL.
#[derive(Debug, thiserror::Error)]
pub enum TargetUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must have a host")]
    MissingHost,
}

/// Validates a redirect target and returns its canonical string form.
///
/// Rejects relative URLs, non-HTTP(S) schemes (`javascript:`, `data:`,
/// `file:`, ...), and host-less URLs.
///
/// # Errors
///
/// Returns [`TargetUrlError::InvalidFormat`] for unparsable input,
/// [`TargetUrlError::UnsupportedProtocol`] for disallowed schemes, and
/// [`TargetUrlError::MissingHost`] when no host is present.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     validate_target("HTTPS://EXAMPLE.COM:443/Path").unwrap(),
///     "https://example.com/Path"
/// );
/// assert!(validate_target("javascript:alert(1)").is_err());
/// ```
pub fn validate_target(input: &str) -> Result<String, TargetUrlError> {
    let url = Url::parse(input).map_err(|e| TargetUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(TargetUrlError::UnsupportedProtocol),
    }

    if url.host_str().is_none() {
        return Err(TargetUrlError::MissingHost);
    }

    Ok(url.to_string())
}
