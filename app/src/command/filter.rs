use gxfilter_config::ResolvedConfig;
use gxfilter_core::{AttributePattern, FeaturePattern, IdentifierSet, LineFilter, MatchPolicy};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::info;

/// Input parameters for the filter command.
#[derive(Debug, Clone)]
pub struct FilterInput {
    /// Identifier list, one entry per line
    pub ids: PathBuf,
    /// GTF/GFF record file
    pub gff: PathBuf,
    /// Optional feature type (3rd column) restriction
    pub feature: Option<String>,
    pub policy: MatchPolicy,
}

impl From<ResolvedConfig> for FilterInput {
    fn from(config: ResolvedConfig) -> Self {
        Self {
            ids: config.ids,
            gff: config.gff,
            feature: config.feature,
            policy: MatchPolicy::from_noversion(config.noversion),
        }
    }
}

/// Strategy that filters a record file by an identifier list.
///
/// Runs the two phases in order: load the identifier set, then stream the
/// record file to stdout. Matched lines are the only thing written to stdout.
#[derive(Debug, Clone, Copy)]
pub struct FilterStrategy;

impl super::CommandStrategy for FilterStrategy {
    type Input = FilterInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let ids = IdentifierSet::load(&input.ids, input.policy)?;

        let attribute = AttributePattern::for_path(&input.gff)?;
        info!(
            "Record format: {}{}",
            attribute.format(),
            if gxfilter_io::is_gzip(&input.gff) {
                " (gzip)"
            } else {
                ""
            }
        );

        let feature = input
            .feature
            .as_deref()
            .map(FeaturePattern::new)
            .transpose()?;

        let filter = LineFilter::new(ids, attribute)
            .with_feature(feature)
            .with_policy(input.policy);

        let stdout = io::stdout();
        let stats = filter.run_path(&input.gff, BufWriter::new(stdout.lock()))?;

        info!(
            "Wrote {} of {} lines ({} rejected by feature)",
            stats.lines_emitted, stats.lines_read, stats.feature_rejected
        );
        Ok(())
    }
}
