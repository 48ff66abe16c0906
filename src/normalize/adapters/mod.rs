//! Dialect adapters: one per supported caller, each converting that
//! caller's raw VCF fields into a canonical `TrLocusRecord`. The dialect is
//! always chosen explicitly by the caller; file contents are never sniffed.

mod assembly;
mod reads;
mod trgt;

pub use assembly::{pair_haplotypes, AssemblyAdapter};
pub use reads::ReadsCallerAdapter;
pub use trgt::TrgtAdapter;

use crate::normalize::record::TrLocusRecord;
use crate::utils::{GenomicRegion, Result};
use crate::vcf::VcfReader;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Reads,
    Assembly,
    Trgt,
}

impl FromStr for Dialect {
    type Err = &'static str;
    fn from_str(dialect: &str) -> std::result::Result<Self, Self::Err> {
        match dialect {
            "reads" => Ok(Dialect::Reads),
            "assembly" => Ok(Dialect::Assembly),
            "trgt" => Ok(Dialect::Trgt),
            _ => Err("Invalid dialect (expected reads, assembly, or trgt)"),
        }
    }
}

impl Dialect {
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Reads => "reads",
            Dialect::Assembly => "assembly",
            Dialect::Trgt => "trgt",
        }
    }
}

pub trait TrSourceAdapter {
    /// Normalizes the first locus overlapping `region`. An empty region
    /// yields the `TrLocusRecord::empty()` sentinel, never an error; the
    /// only fatal path is a dialect mismatch (see `ReadsCallerAdapter`).
    fn parse_locus(&self, vcf: &mut VcfReader, region: &GenomicRegion) -> Result<TrLocusRecord>;
}

/// Parses one region from one file with the adapter for `dialect`, opening
/// a dedicated reader so calls can run on a worker pool.
pub fn parse_one(
    path: &std::path::Path,
    dialect: Dialect,
    region: &GenomicRegion,
) -> Result<TrLocusRecord> {
    let mut vcf = VcfReader::new(path.to_path_buf())?;
    match dialect {
        Dialect::Reads => ReadsCallerAdapter.parse_locus(&mut vcf, region),
        Dialect::Assembly => AssemblyAdapter.parse_locus(&mut vcf, region),
        Dialect::Trgt => TrgtAdapter.parse_locus(&mut vcf, region),
    }
}

/// One entry applies to both haplotypes; two entries split per haplotype.
pub(crate) fn per_haplotype(values: &[String]) -> (String, String) {
    let first = values.first().cloned().unwrap_or_default();
    let second = values.get(1).cloned().unwrap_or_else(|| first.clone());
    (first, second)
}

/// Underscore-joined motif-index run, e.g. `"0_0_15_1"`. Null (`"."`/empty)
/// and malformed entries contribute nothing.
pub(crate) fn parse_motif_ids(encoding: &str) -> Vec<usize> {
    if encoding.is_empty() || encoding == "." {
        return Vec::new();
    }
    encoding
        .split('_')
        .filter_map(|token| token.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialects_parse_from_strings() {
        assert_eq!(Dialect::from_str("reads"), Ok(Dialect::Reads));
        assert_eq!(Dialect::from_str("assembly"), Ok(Dialect::Assembly));
        assert_eq!(Dialect::from_str("trgt"), Ok(Dialect::Trgt));
        assert!(Dialect::from_str("bam").is_err());
    }

    #[test]
    fn motif_id_runs_parse() {
        assert_eq!(parse_motif_ids("0_0_15_1"), vec![0, 0, 15, 1]);
        assert_eq!(parse_motif_ids("."), Vec::<usize>::new());
        assert_eq!(parse_motif_ids(""), Vec::<usize>::new());
        assert_eq!(parse_motif_ids("3_x_4"), vec![3, 4]);
    }
}
