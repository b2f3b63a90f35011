//! Target URL validation, done before any request leaves the machine.

use std::fmt;

use url::Url;

use crate::error::ValidationError;

/// Schemes the HTTP prober can actually speak.
pub const HTTP_SCHEMES: &[&str] = &["http", "https"];

/// A validated target. Holds the trimmed input exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target(String);

impl Target {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Target {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validates a raw target URL.
///
/// Any failed rule yields the same [`ValidationError`]. The host check is
/// permissive on purpose: it only demands one character from
/// `[a-zA-Z0-9.-]`, and a dot unless the host is local or an IPv6 literal
/// without an explicit port.
pub fn validate(raw: &str, allowed_schemes: Option<&[&str]>) -> Result<Target, ValidationError> {
    let trimmed = raw.trim();

    // No "//" means no network location, whatever the parser would infer.
    let (_, after_scheme) = trimmed.split_once("://").ok_or(ValidationError)?;
    let url = Url::parse(trimmed).map_err(|_| ValidationError)?;

    let scheme = url.scheme();
    if scheme.is_empty() {
        return Err(ValidationError);
    }
    if let Some(allowed) = allowed_schemes {
        if !allowed.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
            return Err(ValidationError);
        }
    }

    // The parser rewrites hosts (numeric IPv4, percent-escapes), so the
    // host rules run on the authority as typed.
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError);
    }
    let (host, port) = split_authority(after_scheme);
    let host = host.to_ascii_lowercase();
    if host.is_empty() {
        return Err(ValidationError);
    }

    if !host
        .chars()
        .any(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ValidationError);
    }

    let local = host == "localhost" || host == "127.0.0.1" || host.starts_with('[');
    let dot_exempt = local && port.is_none();
    if !dot_exempt && !host.contains('.') {
        return Err(ValidationError);
    }

    Ok(Target(trimmed.to_string()))
}

/// Splits the raw authority into host (brackets kept) and a non-empty
/// port, if one was written. Default ports count as written.
fn split_authority(after_scheme: &str) -> (&str, Option<&str>) {
    let authority = after_scheme
        .split(|c: char| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or("");
    let host_port = authority.rsplit('@').next().unwrap_or("");

    let (host, port) = if host_port.starts_with('[') {
        match host_port.find(']') {
            Some(end) => (&host_port[..=end], host_port[end + 1..].strip_prefix(':')),
            None => (host_port, None),
        }
    } else {
        match host_port.split_once(':') {
            Some((h, p)) => (h, Some(p)),
            None => (host_port, None),
        }
    };

    (host, port.filter(|p| !p.is_empty()))
}
