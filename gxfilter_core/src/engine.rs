//! Streaming record filter.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::attribute::AttributePattern;
use crate::error::{Error, Result};
use crate::feature::FeaturePattern;
use crate::identifier::{IdentifierSet, MatchPolicy, normalize};

/// Counters collected during one filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub lines_read: usize,
    pub feature_rejected: usize,
    pub lines_emitted: usize,
}

/// Decides, line by line, which records to keep.
///
/// A line is kept when the optional feature gate accepts it and one of its
/// attribute tokens, uppercased, is in the identifier set. The first hit
/// ends the scan, so a line is written at most once.
#[derive(Debug, Clone)]
pub struct LineFilter {
    ids: IdentifierSet,
    attribute: AttributePattern,
    feature: Option<FeaturePattern>,
    policy: MatchPolicy,
}

impl LineFilter {
    #[must_use]
    pub const fn new(ids: IdentifierSet, attribute: AttributePattern) -> Self {
        Self {
            ids,
            attribute,
            feature: None,
            policy: MatchPolicy::Exact,
        }
    }

    #[must_use]
    pub fn with_feature(mut self, feature: Option<FeaturePattern>) -> Self {
        self.feature = feature;
        self
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Whether the feature gate (if any) lets the line through.
    #[must_use]
    pub fn feature_accepts(&self, line: &[u8]) -> bool {
        self.feature.as_ref().is_none_or(|f| f.is_match(line))
    }

    /// Whether any attribute token of the line is a known identifier.
    #[must_use]
    pub fn attribute_matches(&self, line: &[u8]) -> bool {
        self.attribute
            .tokens(line)
            .any(|token| self.ids.matches(&normalize(token), self.policy))
    }

    #[must_use]
    pub fn matches(&self, line: &[u8]) -> bool {
        self.feature_accepts(line) && self.attribute_matches(line)
    }

    /// Stream the record file at `path` (plain or gzip) into `out`.
    pub fn run_path<W: Write>(&self, path: &Path, out: W) -> Result<FilterStats> {
        match &self.feature {
            Some(feature) => info!(
                "Parsing feature file: {} for feature: {}",
                path.display(),
                feature.feature()
            ),
            None => info!("Parsing feature file: {}", path.display()),
        }
        let lines = gxfilter_io::open_lines(path).map_err(|e| Error::read(path, e))?;
        self.run(lines.map(|line| line.map_err(|e| Error::read(path, e))), out)
    }

    /// Filter `lines` into `out`, preserving input order.
    ///
    /// Each kept line is written verbatim followed by `\n`. Nothing is
    /// buffered beyond the current line; the first read error stops the pass.
    pub fn run<I, W>(&self, lines: I, mut out: W) -> Result<FilterStats>
    where
        I: IntoIterator<Item = Result<Vec<u8>>>,
        W: Write,
    {
        let mut stats = FilterStats::default();
        for line in lines {
            let line = line?;
            stats.lines_read += 1;

            if !self.feature_accepts(&line) {
                stats.feature_rejected += 1;
                continue;
            }
            if self.attribute_matches(&line) {
                out.write_all(&line).map_err(Error::Write)?;
                out.write_all(b"\n").map_err(Error::Write)?;
                stats.lines_emitted += 1;
            }
        }
        out.flush().map_err(Error::Write)?;

        debug!(
            "Filter pass: read={}, feature_rejected={}, emitted={}",
            stats.lines_read, stats.feature_rejected, stats.lines_emitted
        );
        Ok(stats)
    }
}
