//! Attribute-column token extraction for GTF and GFF records.
//!
//! GTF writes attributes as `gene_id "ENSG00000223972";` while GFF3 uses
//! `ID=gene:ENSG00000223972;Name=DDX11L1`. The dialect is chosen from the
//! record file name, never from its content, so `genes.gtf.gz` still selects
//! the GTF pattern.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use regex::bytes::Regex;

use crate::error::{Error, Result};

static GTF_PATTERN: OnceLock<Regex> = OnceLock::new();
static GFF_PATTERN: OnceLock<Regex> = OnceLock::new();

/// `id "VALUE"` / `name "VALUE"`; the key may carry a prefix such as `gene_`.
#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn gtf_pattern() -> &'static Regex {
    GTF_PATTERN.get_or_init(|| {
        Regex::new(r#"(?i-u)(?:id|name)\s+"([^"]+)""#)
            .expect("Static regex pattern is guaranteed to be valid")
    })
}

/// `id=VALUE` / `name=VALUE` terminated by `;` or end of line.
#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn gff_pattern() -> &'static Regex {
    GFF_PATTERN.get_or_init(|| {
        Regex::new(r"(?i-u)(?:id|name)=([^=;]+)(?:;|$)")
            .expect("Static regex pattern is guaranteed to be valid")
    })
}

/// Attribute syntax of a record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// `key "value";`
    Gtf,
    /// `key=value;`
    Gff,
}

impl RecordFormat {
    /// Pick the dialect from the file name: `.gtf` anywhere wins, then `.gff`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path.to_string_lossy().to_ascii_lowercase();
        if name.contains(".gtf") {
            Ok(Self::Gtf)
        } else if name.contains(".gff") {
            Ok(Self::Gff)
        } else {
            Err(Error::UnknownFileType(path.to_path_buf()))
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gtf => "GTF",
            Self::Gff => "GFF",
        }
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled extractor for id/name tokens in a record line.
#[derive(Debug, Clone, Copy)]
pub struct AttributePattern {
    format: RecordFormat,
    regex: &'static Regex,
}

impl AttributePattern {
    #[must_use]
    pub fn new(format: RecordFormat) -> Self {
        let regex = match format {
            RecordFormat::Gtf => gtf_pattern(),
            RecordFormat::Gff => gff_pattern(),
        };
        Self { format, regex }
    }

    pub fn for_path(path: &Path) -> Result<Self> {
        RecordFormat::from_path(path).map(Self::new)
    }

    #[must_use]
    pub const fn format(&self) -> RecordFormat {
        self.format
    }

    /// Captured values, left to right, non-overlapping.
    pub fn tokens<'l>(&self, line: &'l [u8]) -> impl Iterator<Item = &'l [u8]> + use<'l> {
        let regex: &'static Regex = self.regex;
        regex
            .captures_iter(line)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(format: RecordFormat, line: &str) -> Vec<String> {
        AttributePattern::new(format)
            .tokens(line.as_bytes())
            .map(|t| String::from_utf8_lossy(t).into_owned())
            .collect()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            RecordFormat::from_path(Path::new("sample.gtf")).unwrap(),
            RecordFormat::Gtf
        );
        assert_eq!(
            RecordFormat::from_path(Path::new("/ref/Homo_sapiens.GRCh38.GTF.gz")).unwrap(),
            RecordFormat::Gtf
        );
        assert_eq!(
            RecordFormat::from_path(Path::new("annotation.gff3")).unwrap(),
            RecordFormat::Gff
        );
        assert_eq!(
            RecordFormat::from_path(Path::new("annotation.GFF.gz")).unwrap(),
            RecordFormat::Gff
        );
    }

    #[test]
    fn test_gtf_checked_before_gff() {
        assert_eq!(
            RecordFormat::from_path(Path::new("x.gff.gtf")).unwrap(),
            RecordFormat::Gtf
        );
    }

    #[test]
    fn test_unknown_file_type() {
        let err = RecordFormat::from_path(Path::new("data.txt")).unwrap_err();
        assert!(matches!(err, Error::UnknownFileType(_)));
        assert_eq!(err.to_string(), "cannot determine file type for file data.txt");
    }

    #[test]
    fn test_gtf_tokens_in_order() {
        let line = "chr1\tENSEMBL\tgene\t1\t100\t.\t+\t.\tgene_id \"GENE1\"; gene_name \"X\";";
        assert_eq!(tokens(RecordFormat::Gtf, line), vec!["GENE1", "X"]);
    }

    #[test]
    fn test_gtf_keys_are_case_insensitive() {
        let line = "gene_ID \"a\"; Gene_Name \"b\"; transcript_id \"c.1\";";
        assert_eq!(tokens(RecordFormat::Gtf, line), vec!["a", "b", "c.1"]);
    }

    #[test]
    fn test_gtf_ignores_other_keys_and_empty_values() {
        let line = "gene_biotype \"protein_coding\"; gene_id \"\"; exon_number \"1\";";
        assert!(tokens(RecordFormat::Gtf, line).is_empty());
    }

    #[test]
    fn test_gff_tokens() {
        let line = "chr1\tRefSeq\tgene\t1\t100\t.\t+\t.\tID=gene1;Parent=tx1;Name=ABC";
        assert_eq!(tokens(RecordFormat::Gff, line), vec!["gene1", "ABC"]);
    }

    #[test]
    fn test_gff_value_stops_at_semicolon() {
        let line = "ID=gene:ENSG1.4;Name=DDX11L1;biotype=lncRNA;";
        assert_eq!(tokens(RecordFormat::Gff, line), vec!["gene:ENSG1.4", "DDX11L1"]);
    }

    #[test]
    fn test_gff_quoted_syntax_not_matched() {
        assert!(tokens(RecordFormat::Gff, "gene_id \"GENE1\";").is_empty());
    }

    #[test]
    fn test_tokens_on_non_utf8_line() {
        let line = b"gene_id \"G\xe91\"; gene_name \"X\";";
        let found: Vec<&[u8]> = AttributePattern::new(RecordFormat::Gtf)
            .tokens(line)
            .collect();
        assert_eq!(found, vec![&b"G\xe91"[..], &b"X"[..]]);
    }
}
