//! Session cookie loading

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Strip line breaks and spaces so a cookie pasted across several lines
/// becomes a single `name=value;name=value` string.
pub fn clean_cookie_str(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '\n' | '\r' | ' '))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Cookie names with their values hidden, for logs:
/// `sid=abc;tok=1` becomes `sid=<redacted>;tok=<redacted>`.
pub fn redact_cookie(cookie: &str) -> String {
    cookie
        .split(';')
        .map(|pair| match pair.split_once('=') {
            Some((name, _)) => format!("{}=<redacted>", name),
            None if pair.trim().is_empty() => pair.to_string(),
            None => "<redacted>".to_string(),
        })
        .collect::<Vec<_>>()
        .join(";")
}

pub fn read_cookie_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read cookie file {}", path.display()))?;
    Ok(clean_cookie_str(&raw))
}

/// Load the initial cookie. Read errors are logged and treated as "no cookie";
/// an empty file also yields `None`.
pub fn load_cookie<P: AsRef<Path>>(path: P) -> Option<String> {
    match read_cookie_file(path) {
        Ok(cookie) if cookie.is_empty() => {
            tracing::warn!("Cookie file is empty, scanning without a cookie");
            None
        }
        Ok(cookie) => {
            tracing::info!("Using cleaned cookies: {}", redact_cookie(&cookie));
            Some(cookie)
        }
        Err(e) => {
            tracing::error!("Failed to read or clean cookies: {:#}", e);
            None
        }
    }
}
