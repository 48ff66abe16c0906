//! Typed accessors over htslib records. Missing INFO/FORMAT tags come back
//! as `None` so adapters can apply their own defaults; only the adapters
//! decide which absences are fatal.

use itertools::Itertools;
use rust_htslib::bcf::record::GenotypeAllele;
use rust_htslib::bcf::Record;

const MISSING_INTEGER: i32 = i32::MIN;
const VECTOR_END_INTEGER: i32 = i32::MIN + 1;

/// Per-sample FORMAT string split on `,`, so paired per-haplotype values
/// (`MS`, `MI`, `SP`, `MC`) come back as one entry per haplotype.
pub fn format_strings(record: &Record, tag: &[u8]) -> Option<Vec<String>> {
    let values = record.format(tag).string().ok()?;
    let raw = values.first()?;
    Some(
        String::from_utf8_lossy(raw)
            .split(',')
            .map(|value| value.to_string())
            .collect(),
    )
}

/// Per-sample FORMAT integers with htslib missing-value and vector-end
/// padding cells removed.
pub fn format_ints(record: &Record, tag: &[u8]) -> Option<Vec<i32>> {
    let values = record.format(tag).integer().ok()?;
    let raw = values.first()?;
    Some(drop_sentinels(raw))
}

fn drop_sentinels(values: &[i32]) -> Vec<i32> {
    values
        .iter()
        .copied()
        .filter(|v| *v != MISSING_INTEGER && *v != VECTOR_END_INTEGER)
        .collect()
}

pub fn info_string(record: &Record, tag: &[u8]) -> Option<String> {
    let info = record.info(tag).string().ok()??;
    info.first()
        .map(|value| String::from_utf8_lossy(value).into_owned())
}

/// INFO string values flattened across both htslib entries and embedded
/// commas; used for `MOTIFS`, which some writers emit as one joined string.
pub fn info_strings(record: &Record, tag: &[u8]) -> Option<Vec<String>> {
    let info = record.info(tag).string().ok()??;
    Some(
        info.iter()
            .flat_map(|value| {
                String::from_utf8_lossy(value)
                    .split(',')
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
            })
            .collect(),
    )
}

pub fn info_int(record: &Record, tag: &[u8]) -> Option<i32> {
    let info = record.info(tag).integer().ok()??;
    info.first().copied()
}

/// REF plus the list of ALT alleles; a lone `"."` ALT means no alternative.
pub fn alleles(record: &Record) -> (String, Vec<String>) {
    let all = record.alleles();
    let reference = all
        .first()
        .map(|seq| String::from_utf8_lossy(seq).into_owned())
        .unwrap_or_default();
    let alts = all
        .iter()
        .skip(1)
        .map(|seq| String::from_utf8_lossy(seq).into_owned())
        .filter(|seq| seq != ".")
        .collect();
    (reference, alts)
}

/// The first sample's GT rendered as `a/b` (or a single allele for haploid
/// calls); `None` when the record carries no GT.
pub fn genotype_string(record: &Record) -> Option<String> {
    let genotypes = record.genotypes().ok()?;
    let genotype = genotypes.get(0);
    if genotype.is_empty() {
        return None;
    }
    Some(
        genotype
            .iter()
            .map(|allele| match allele {
                GenotypeAllele::Unphased(index) | GenotypeAllele::Phased(index) => {
                    index.to_string()
                }
                GenotypeAllele::UnphasedMissing | GenotypeAllele::PhasedMissing => ".".to_string(),
            })
            .join("/"),
    )
}
