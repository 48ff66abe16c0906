//! Genotype-string classification and synthesis of a diploid genotype from
//! two independently called assembly haplotypes.

use itertools::Itertools;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GtCategory {
    Unknown,
    Error,
    HemizygousRef,
    HemizygousAlt,
    HomozygousRef,
    HomozygousAlt,
    HeterozygousRefAlt,
    HeterozygousAltAlt,
}

impl GtCategory {
    pub fn describe(&self) -> &'static str {
        match self {
            GtCategory::Unknown => "no genotype called",
            GtCategory::Error => "malformed genotype",
            GtCategory::HemizygousRef => "hemizygous reference",
            GtCategory::HemizygousAlt => "hemizygous alternative",
            GtCategory::HomozygousRef => "homozygous reference",
            GtCategory::HomozygousAlt => "homozygous alternative",
            GtCategory::HeterozygousRefAlt => "heterozygous reference/alternative",
            GtCategory::HeterozygousAltAlt => "heterozygous alternative/alternative",
        }
    }
}

/// Classifies a raw genotype string. Alleles are split on `/` or `|`; a
/// string with neither separator is a single (hemizygous) allele. Empty and
/// `"."` allele tokens are dropped before counting.
pub fn interpret(gt: &str) -> GtCategory {
    if matches!(gt, "./." | "." | "") {
        return GtCategory::Unknown;
    }

    let alleles: Vec<&str> = gt
        .split(['/', '|'])
        .filter(|allele| !allele.is_empty() && *allele != ".")
        .collect();

    match alleles.as_slice() {
        [allele] => {
            if *allele == "0" {
                GtCategory::HemizygousRef
            } else {
                GtCategory::HemizygousAlt
            }
        }
        [first, second] if first == second => {
            if *first == "0" {
                GtCategory::HomozygousRef
            } else {
                GtCategory::HomozygousAlt
            }
        }
        [first, second] => {
            if *first == "0" || *second == "0" {
                GtCategory::HeterozygousRefAlt
            } else {
                GtCategory::HeterozygousAltAlt
            }
        }
        _ => GtCategory::Error,
    }
}

/// Combines two haploid assembly calls into one `a/b` genotype comparable
/// with reads-based genotypes.
///
/// A haplotype contributes `"0"` when its motif-id sequence equals the
/// reference pattern exactly. Non-reference labels are minted in order of
/// first appearance: the first distinct non-reference id sequence becomes
/// `"1"`, a second distinct one becomes `"2"`. A haplotype without motif
/// ids falls back to its own haploid genotype value (or `"."` when that is
/// empty too), since there is nothing to compare against the reference.
pub fn synthesize_diploid(
    gt_h1: &str,
    gt_h2: &str,
    ids_h1: &[usize],
    ids_h2: &[usize],
    ref_ids: &[usize],
) -> String {
    let fallback = |gt: &str| {
        if gt.is_empty() {
            ".".to_string()
        } else {
            gt.to_string()
        }
    };

    let first = if ids_h1.is_empty() {
        fallback(gt_h1)
    } else if ids_h1 == ref_ids {
        "0".to_string()
    } else {
        "1".to_string()
    };

    let second = if ids_h2.is_empty() {
        fallback(gt_h2)
    } else if ids_h2 == ref_ids {
        "0".to_string()
    } else if ids_h2 == ids_h1 {
        // Same non-reference allele as haplotype 1.
        first.clone()
    } else if first == "1" {
        "2".to_string()
    } else {
        "1".to_string()
    };

    [first, second].iter().join("/")
}
