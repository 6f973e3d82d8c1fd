//! Feature-type (3rd column) gate.

use regex::bytes::Regex;

use crate::error::{Error, Result};

/// Matches lines carrying `\t<feature>\t` anywhere.
///
/// The feature name is inserted into the pattern as given, so regex
/// metacharacters in it keep their meaning (`exon|CDS` selects both).
#[derive(Debug, Clone)]
pub struct FeaturePattern {
    feature: String,
    regex: Regex,
}

impl FeaturePattern {
    pub fn new(feature: &str) -> Result<Self> {
        let regex = Regex::new(&format!("\t{feature}\t")).map_err(|source| Error::InvalidFeature {
            feature: feature.to_string(),
            source,
        })?;
        Ok(Self {
            feature: feature.to_string(),
            regex,
        })
    }

    #[must_use]
    pub fn feature(&self) -> &str {
        &self.feature
    }

    #[must_use]
    pub fn is_match(&self, line: &[u8]) -> bool {
        self.regex.is_match(line)
    }
}
