//! `.edgerc` credential file loading.

use std::fs;
use std::path::Path;

use fastpurge_core::Credentials;

use crate::error::EdgercError;

/// Default cap on the request bytes hashed into the signature, matching
/// the EdgeGrid default when the section has no `max-body` entry.
pub const DEFAULT_MAX_BODY: usize = 131_072;

/// Load the named section of an `.edgerc` INI file.
///
/// Unknown keys are ignored. Missing credential keys come back as empty
/// strings and are rejected by config validation before any request is
/// signed, so the only hard failures here are an unreadable file and an
/// absent section.
pub fn load_edgerc(path: &Path, section: &str) -> Result<Credentials, EdgercError> {
    let text = fs::read_to_string(path).map_err(|source| EdgercError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_section(&text, section).ok_or_else(|| EdgercError::MissingSection {
        path: path.to_path_buf(),
        section: section.to_string(),
    })
}

fn parse_section(text: &str, section: &str) -> Option<Credentials> {
    let header = format!("[{section}]");
    let mut credentials = Credentials {
        max_body: DEFAULT_MAX_BODY,
        ..Credentials::default()
    };
    let mut in_section = false;
    let mut found = false;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') {
            in_section = line == header;
            found |= in_section;
            continue;
        }
        if !in_section {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        match key {
            "host" => credentials.host = value.trim_end_matches('/').to_string(),
            "client_token" => credentials.client_token = value.to_string(),
            "client_secret" => credentials.client_secret = value.to_string(),
            "access_token" => credentials.access_token = value.to_string(),
            "max-body" | "max_body" => {
                if let Ok(n) = value.parse() {
                    credentials.max_body = n;
                }
            }
            _ => {}
        }
    }

    found.then_some(credentials)
}
