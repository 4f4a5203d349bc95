//! Asset codes: the stable string identifiers used to look up collectibles.
//!
//! A code has the form `domain:path` (for example
//! `game:mushroom-chanterelle-normal-east`). Codes written without a domain
//! belong to the `game` domain.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Domain assumed for codes written without a `domain:` prefix.
pub const DEFAULT_DOMAIN: &str = "game";

/// A normalised `domain:path` identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AssetCode {
    /// Full `domain:path` text.
    full: String,
    /// Byte offset of the path within `full`.
    path_start: usize,
}

impl AssetCode {
    /// Parse a code, filling in the default domain when none is given.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.split_once(':') {
            Some((domain, path)) if !domain.is_empty() => Self::from_parts(domain, path),
            Some((_, path)) => Self::from_parts(DEFAULT_DOMAIN, path),
            None => Self::from_parts(DEFAULT_DOMAIN, raw),
        }
    }

    /// Build a code from an explicit domain and path.
    pub fn from_parts(domain: &str, path: &str) -> Self {
        let full = format!("{domain}:{path}");
        Self {
            full,
            path_start: domain.len().saturating_add(1),
        }
    }

    /// The domain part (before the colon).
    pub fn domain(&self) -> &str {
        self.full
            .get(..self.path_start.saturating_sub(1))
            .unwrap_or(DEFAULT_DOMAIN)
    }

    /// The path part (after the colon).
    pub fn path(&self) -> &str {
        self.full.get(self.path_start..).unwrap_or_default()
    }

    /// The full `domain:path` text.
    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// Whether the path starts with the given prefix.
    pub fn path_starts_with(&self, prefix: &str) -> bool {
        self.path().starts_with(prefix)
    }

    /// The last dash-separated part of the path (`game:rot` -> `rot`).
    pub fn last_part(&self) -> &str {
        self.path().rsplit('-').next().unwrap_or_default()
    }
}

impl From<String> for AssetCode {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for AssetCode {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<AssetCode> for String {
    fn from(code: AssetCode) -> Self {
        code.full
    }
}

impl fmt::Display for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

/// Extract the mushroom name from a code such as
/// `game:mushroom-chanterelle-normal-east`.
///
/// The name is the text after `mushroom-` (at the start of the string or
/// directly after a colon) up to the next dash or the end of the string.
pub fn mushroom_name(code: &str) -> Option<&str> {
    const MARKER: &str = "mushroom-";

    let rest = code
        .strip_prefix(MARKER)
        .or_else(|| code.split_once(':').and_then(|(_, path)| path.strip_prefix(MARKER)))?;
    let name = rest.split('-').next().unwrap_or_default();
    if name.is_empty() { None } else { Some(name) }
}
