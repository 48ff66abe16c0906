//! Adapter for reads-based caller VCFs: diploid records carrying per-
//! haplotype `MI`/`SP`/`CN`/`DP` sample fields and `REF_SPAN`/`CN_ref`/
//! `MOTIF_IDs_REF` INFO fields. `SP` and `REF_SPAN` use bare 1-based
//! intervals.

use crate::normalize::adapters::{parse_motif_ids, per_haplotype, TrSourceAdapter};
use crate::normalize::record::{HaplotypeRecord, Span, TrLocusRecord};
use crate::normalize::span_parser::{parse_bare, zip_with_ids};
use crate::utils::{GenomicRegion, Result};
use crate::vcf::{fields, VcfReader};
use std::path::Path;

pub struct ReadsCallerAdapter;

/// Raw fields of one reads-caller record, decoupled from htslib so
/// normalization is a pure function.
#[derive(Debug, Clone, Default)]
pub struct ReadsLocusFields {
    pub chrom: String,
    pub pos: u32,
    pub stop: u32,
    pub id: String,
    pub motifs: Vec<String>,
    pub ref_seq: String,
    pub alts: Vec<String>,
    pub mi: Vec<String>,
    pub sp: Vec<String>,
    pub ref_span: String,
    pub motif_ids_ref: String,
    pub cn: Vec<i32>,
    pub cn_ref: i32,
    pub dp: Option<Vec<i32>>,
    pub gt: String,
}

impl TrSourceAdapter for ReadsCallerAdapter {
    fn parse_locus(&self, vcf: &mut VcfReader, region: &GenomicRegion) -> Result<TrLocusRecord> {
        let record = match vcf.fetch_first(region)? {
            Some(record) => record,
            None => return Ok(TrLocusRecord::empty()),
        };
        let raw = extract(vcf, &record);
        normalize(raw, vcf.path())
    }
}

fn extract(vcf: &VcfReader, record: &rust_htslib::bcf::Record) -> ReadsLocusFields {
    let (ref_seq, alts) = fields::alleles(record);
    ReadsLocusFields {
        chrom: vcf.contig_name(record),
        pos: record.pos() as u32 + 1,
        stop: record.end() as u32,
        id: String::from_utf8_lossy(&record.id()).into_owned(),
        motifs: fields::info_strings(record, b"MOTIFS").unwrap_or_default(),
        ref_seq,
        alts,
        mi: fields::format_strings(record, b"MI").unwrap_or_default(),
        sp: fields::format_strings(record, b"SP").unwrap_or_default(),
        ref_span: fields::info_string(record, b"REF_SPAN").unwrap_or_default(),
        motif_ids_ref: fields::info_string(record, b"MOTIF_IDs_REF").unwrap_or_default(),
        cn: fields::format_ints(record, b"CN").unwrap_or_default(),
        cn_ref: fields::info_int(record, b"CN_ref").unwrap_or(0),
        dp: fields::format_ints(record, b"DP"),
        gt: fields::genotype_string(record).unwrap_or_default(),
    }
}

pub fn normalize(raw: ReadsLocusFields, source: &Path) -> Result<TrLocusRecord> {
    // DP is the discriminant for this dialect; assembly files legitimately
    // lack it, so its absence means the wrong adapter was chosen.
    let dp = raw.dp.ok_or_else(|| {
        format!(
            "No DP field in {}: not a reads-based caller VCF",
            source.display()
        )
    })?;

    let (mi_h1, mi_h2) = per_haplotype(&raw.mi);
    let ids_h1 = parse_motif_ids(&mi_h1);
    let mut ids_h2 = parse_motif_ids(&mi_h2);
    let (sp_h1, mut sp_h2) = per_haplotype(&raw.sp);

    let alt1 = raw.alts.first().cloned().unwrap_or_default();
    let mut alt2 = if raw.alts.len() > 1 {
        raw.alts[1].clone()
    } else if !raw.alts.is_empty() && ids_h1 == ids_h2 {
        alt1.clone()
    } else {
        String::new()
    };
    // A zero-depth second haplotype means the caller saw only one allele;
    // mirror haplotype 1 so both sides render the same call.
    if raw.alts.len() <= 1 && dp.get(1) == Some(&0) {
        alt2 = alt1.clone();
        ids_h2 = ids_h1.clone();
        sp_h2 = sp_h1.clone();
    }

    let spans_h1 = zip_with_ids(&parse_bare(&sp_h1), &ids_h1);
    let spans_h2 = zip_with_ids(&parse_bare(&sp_h2), &ids_h2);

    let cn_h1 = copy_number(raw.cn.first(), &spans_h1);
    let cn_h2 = copy_number(raw.cn.get(1), &spans_h2);

    let ids_ref = parse_motif_ids(&raw.motif_ids_ref);
    let spans_ref = zip_with_ids(&parse_bare(&raw.ref_span), &ids_ref);
    let cn_ref = copy_number(Some(&raw.cn_ref), &spans_ref);

    Ok(TrLocusRecord {
        chrom: raw.chrom,
        pos: raw.pos,
        stop: raw.stop,
        id: raw.id,
        motifs: raw.motifs,
        reference: HaplotypeRecord::new(spans_ref, raw.ref_seq, cn_ref),
        hap1: HaplotypeRecord::new(spans_h1, alt1, cn_h1)
            .with_supporting_reads(dp.first().map(|d| *d as u32)),
        hap2: Some(
            HaplotypeRecord::new(spans_h2, alt2, cn_h2)
                .with_supporting_reads(dp.get(1).map(|d| *d as u32)),
        ),
        genotype: raw.gt,
    })
}

fn copy_number(reported: Option<&i32>, spans: &[Span]) -> usize {
    match reported {
        Some(&cn) if cn > 0 => cn as usize,
        _ => spans.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn base_fields() -> ReadsLocusFields {
        ReadsLocusFields {
            chrom: "chr1".to_string(),
            pos: 100,
            stop: 130,
            id: "TR1".to_string(),
            motifs: vec!["CAG".to_string()],
            ref_seq: "CAGCAGCAG".to_string(),
            alts: vec!["CAGCAGCAGCAG".to_string()],
            mi: vec!["0_0_0_0".to_string(), "0_0_0_0".to_string()],
            sp: vec![
                "(1-3)(4-6)(7-9)(10-12)".to_string(),
                "(1-3)(4-6)(7-9)(10-12)".to_string(),
            ],
            ref_span: "(1-3)(4-6)(7-9)".to_string(),
            motif_ids_ref: "0_0_0".to_string(),
            cn: vec![4, 4],
            cn_ref: 3,
            dp: Some(vec![12, 11]),
            gt: "1/1".to_string(),
        }
    }

    fn source() -> PathBuf {
        PathBuf::from("sample.vcf.gz")
    }

    #[test]
    fn diploid_record_normalizes() {
        let record = normalize(base_fields(), &source()).unwrap();
        assert_eq!(record.chrom, "chr1");
        assert_eq!(record.reference.spans.len(), 3);
        assert_eq!(record.reference.spans[0].start, 0);
        assert_eq!(record.reference.spans[0].end, 2);
        assert_eq!(record.hap1.copy_number, 4);
        assert_eq!(record.hap1.supporting_reads, Some(12));
        let hap2 = record.hap2.unwrap();
        assert_eq!(hap2.copy_number, 4);
        assert_eq!(hap2.supporting_reads, Some(11));
        assert_eq!(record.genotype, "1/1");
    }

    #[test]
    fn missing_dp_is_fatal() {
        let mut raw = base_fields();
        raw.dp = None;
        let err = normalize(raw, &source()).unwrap_err();
        assert!(err.contains("DP"));
        assert!(err.contains("sample.vcf.gz"));
    }

    #[test]
    fn single_alt_with_matching_ids_serves_both_haplotypes() {
        let record = normalize(base_fields(), &source()).unwrap();
        assert_eq!(record.hap1.seq, record.hap2.unwrap().seq);
    }

    #[test]
    fn single_alt_with_differing_ids_leaves_hap2_empty() {
        let mut raw = base_fields();
        raw.mi = vec!["0_0_0_0".to_string(), "0_0".to_string()];
        raw.sp = vec![
            "(1-3)(4-6)(7-9)(10-12)".to_string(),
            "(1-3)(4-6)".to_string(),
        ];
        let record = normalize(raw, &source()).unwrap();
        let hap2 = record.hap2.unwrap();
        assert_eq!(hap2.seq, "");
        assert_eq!(hap2.spans.len(), 2);
    }

    #[test]
    fn zero_depth_hap2_mirrors_hap1() {
        let mut raw = base_fields();
        raw.mi = vec!["0_0_0_0".to_string(), "".to_string()];
        raw.sp = vec!["(1-3)(4-6)(7-9)(10-12)".to_string(), "".to_string()];
        raw.dp = Some(vec![14, 0]);
        let record = normalize(raw, &source()).unwrap();
        let hap2 = record.hap2.unwrap();
        assert_eq!(hap2.seq, record.hap1.seq);
        assert_eq!(hap2.spans, record.hap1.spans);
        assert_eq!(hap2.supporting_reads, Some(0));
    }

    #[test]
    fn haploid_depth_does_not_mirror_hap2() {
        // A single-entry DP (padding already stripped) must not trip the
        // zero-depth mirror.
        let mut raw = base_fields();
        raw.mi = vec!["0_0_0_0".to_string(), "0_0".to_string()];
        raw.sp = vec![
            "(1-3)(4-6)(7-9)(10-12)".to_string(),
            "(1-3)(4-6)".to_string(),
        ];
        raw.dp = Some(vec![14]);
        let record = normalize(raw, &source()).unwrap();
        let hap2 = record.hap2.unwrap();
        assert_eq!(hap2.supporting_reads, None);
        assert_eq!(hap2.spans.len(), 2);
    }

    #[test]
    fn missing_copy_numbers_fall_back_to_span_counts() {
        let mut raw = base_fields();
        raw.cn = Vec::new();
        let record = normalize(raw, &source()).unwrap();
        assert_eq!(record.hap1.copy_number, 4);
        assert_eq!(record.hap2.unwrap().copy_number, 4);
    }

    #[test]
    fn empty_region_fields_normalize_to_blank_haplotypes() {
        let raw = ReadsLocusFields {
            dp: Some(vec![0, 0]),
            ..Default::default()
        };
        let record = normalize(raw, &source()).unwrap();
        assert!(record.hap1.spans.is_empty());
        assert!(!record.hap1.has_sequence());
    }
}
