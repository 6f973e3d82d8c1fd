use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Filter settings as given on the command line or in a JSON preset.
///
/// Every field is optional here; [`FilterConfig::resolve`] checks that the
/// two input paths are present.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gff: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    #[serde(default)]
    pub noversion: bool,
}

/// A complete configuration, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub ids: PathBuf,
    pub gff: PathBuf,
    pub feature: Option<String>,
    pub noversion: bool,
}

/// A required input path was not supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingArgument {
    Ids,
    Gff,
}

impl MissingArgument {
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Ids => "--ids|-i",
            Self::Gff => "--gff|-g",
        }
    }
}

impl std::fmt::Display for MissingArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "required argument {} is missing", self.flag())
    }
}

impl std::error::Error for MissingArgument {}

impl FilterConfig {
    /// Read a JSON preset.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file not found at: {}", path.display());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Layer `overrides` on top of `self`.
    ///
    /// Paths and feature from `overrides` win when present; `noversion` is
    /// enabled if either side enables it.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            ids: overrides.ids.or(self.ids),
            gff: overrides.gff.or(self.gff),
            feature: overrides.feature.or(self.feature),
            noversion: self.noversion || overrides.noversion,
        }
    }

    /// Check required paths. An empty feature name means no feature filter.
    pub fn resolve(self) -> Result<ResolvedConfig, MissingArgument> {
        let ids = self
            .ids
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(MissingArgument::Ids)?;
        let gff = self
            .gff
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(MissingArgument::Gff)?;
        Ok(ResolvedConfig {
            ids,
            gff,
            feature: self.feature.filter(|f| !f.is_empty()),
            noversion: self.noversion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(ids: Option<&str>, gff: Option<&str>) -> FilterConfig {
        FilterConfig {
            ids: ids.map(PathBuf::from),
            gff: gff.map(PathBuf::from),
            ..FilterConfig::default()
        }
    }

    #[test]
    fn test_resolve_requires_ids_first() {
        assert_eq!(cli(None, None).resolve(), Err(MissingArgument::Ids));
        assert_eq!(cli(None, Some("a.gtf")).resolve(), Err(MissingArgument::Ids));
        assert_eq!(cli(Some("ids"), None).resolve(), Err(MissingArgument::Gff));
        assert_eq!(cli(Some(""), Some("a.gtf")).resolve(), Err(MissingArgument::Ids));
    }

    #[test]
    fn test_missing_argument_message() {
        assert_eq!(
            MissingArgument::Gff.to_string(),
            "required argument --gff|-g is missing"
        );
    }

    #[test]
    fn test_empty_feature_means_no_filter() {
        let config = FilterConfig {
            feature: Some(String::new()),
            ..cli(Some("ids"), Some("a.gtf"))
        };
        assert_eq!(config.resolve().unwrap().feature, None);
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let preset = FilterConfig {
            ids: Some(PathBuf::from("preset_ids.txt")),
            gff: Some(PathBuf::from("preset.gtf")),
            feature: Some("exon".to_string()),
            noversion: true,
        };
        let merged = preset.merge(cli(None, Some("cli.gff3")));
        assert_eq!(merged.ids, Some(PathBuf::from("preset_ids.txt")));
        assert_eq!(merged.gff, Some(PathBuf::from("cli.gff3")));
        assert_eq!(merged.feature.as_deref(), Some("exon"));
        assert!(merged.noversion);
    }

    #[test]
    fn test_load_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        std::fs::write(&path, r#"{"gff": "genes.gtf.gz", "feature": "CDS"}"#).unwrap();

        let config = FilterConfig::load(&path).unwrap();
        assert_eq!(config.gff, Some(PathBuf::from("genes.gtf.gz")));
        assert_eq!(config.feature.as_deref(), Some("CDS"));
        assert!(!config.noversion);
        assert_eq!(config.ids, None);
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        std::fs::write(&path, r#"{"gtf": "genes.gtf"}"#).unwrap();
        assert!(FilterConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = FilterConfig::load(Path::new("/nonexistent/preset.json")).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
