//! Identifier normalization and the lookup set built from an id list.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

/// Uppercase a raw identifier. ASCII only; other bytes pass through.
#[must_use]
pub fn normalize(raw: &[u8]) -> Vec<u8> {
    raw.to_ascii_uppercase()
}

/// Drop a trailing version suffix (`.` followed by one or more digits).
///
/// Only the last suffix is removed, so `ENSG1.2.3` becomes `ENSG1.2`.
/// Tokens without a suffix are returned unchanged.
#[must_use]
pub fn strip_version(token: &[u8]) -> &[u8] {
    let digits = token
        .iter()
        .rev()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 || digits == token.len() {
        return token;
    }
    let dot = token.len() - digits - 1;
    if token[dot] == b'.' {
        &token[..dot]
    } else {
        token
    }
}

/// How identifiers are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Case-insensitive exact match only.
    #[default]
    Exact,
    /// Exact match, falling back to the version-stripped form.
    ExactOrStripped,
}

impl MatchPolicy {
    #[must_use]
    pub const fn from_noversion(noversion: bool) -> Self {
        if noversion {
            Self::ExactOrStripped
        } else {
            Self::Exact
        }
    }

    #[must_use]
    pub const fn strips_version(self) -> bool {
        matches!(self, Self::ExactOrStripped)
    }
}

/// Normalized identifiers to filter on. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct IdentifierSet {
    ids: HashSet<Vec<u8>>,
}

impl IdentifierSet {
    /// Build a set from raw id lines.
    ///
    /// Each line is uppercased as a whole; surrounding whitespace and a
    /// trailing `\r` are kept as part of the key. With
    /// [`MatchPolicy::ExactOrStripped`] the version-stripped variant is
    /// inserted as well. The result may be empty.
    pub fn from_lines<I>(lines: I, policy: MatchPolicy) -> io::Result<Self>
    where
        I: IntoIterator<Item = io::Result<Vec<u8>>>,
    {
        let mut ids = HashSet::new();
        for line in lines {
            let id = normalize(&line?);
            if policy.strips_version() {
                let stripped = strip_version(&id);
                if stripped.len() != id.len() {
                    ids.insert(stripped.to_vec());
                }
            }
            ids.insert(id);
        }
        Ok(Self { ids })
    }

    /// Read the id list at `path` (plain or gzip).
    ///
    /// Fails when the file cannot be read or contains no lines at all.
    pub fn load(path: &Path, policy: MatchPolicy) -> Result<Self> {
        info!("Parsing name/id list from file: {}", path.display());
        let lines = gxfilter_io::open_lines(path).map_err(|e| Error::read(path, e))?;
        let set = Self::from_lines(lines, policy).map_err(|e| Error::read(path, e))?;
        if set.is_empty() {
            return Err(Error::EmptyIdentifierSet(path.to_path_buf()));
        }
        info!("Omit version: {}", policy.strips_version());
        info!("Found {} unique names/ids", set.len());
        Ok(set)
    }

    /// Look up an already normalized token.
    #[must_use]
    pub fn contains(&self, normalized: &[u8]) -> bool {
        self.ids.contains(normalized)
    }

    /// Look up a normalized token under `policy`.
    #[must_use]
    pub fn matches(&self, normalized: &[u8], policy: MatchPolicy) -> bool {
        if self.contains(normalized) {
            return true;
        }
        if policy.strips_version() {
            let stripped = strip_version(normalized);
            return stripped.len() != normalized.len() && self.contains(stripped);
        }
        false
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
