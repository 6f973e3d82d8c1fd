#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Identifier-driven filtering of GTF/GFF annotation lines.
//!
//! The pipeline is two sequential phases: load an [`IdentifierSet`] from an
//! id list, then stream a record file through a [`LineFilter`] that writes
//! every line whose `id`/`name` attribute hits the set.

pub mod attribute;
pub mod engine;
pub mod error;
pub mod feature;
pub mod identifier;

pub use attribute::{AttributePattern, RecordFormat};
pub use engine::{FilterStats, LineFilter};
pub use error::{Error, Result};
pub use feature::FeaturePattern;
pub use identifier::{IdentifierSet, MatchPolicy, normalize, strip_version};
