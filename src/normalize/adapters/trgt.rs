//! Adapter for TRGT VCFs. Locus identity comes from the `TRID` INFO field
//! rather than the record coordinates, spans come from the id-prefixed `MS`
//! sample field, and per-haplotype copy numbers are the sums of the `MC`
//! occurrence counts.

use crate::normalize::adapters::{per_haplotype, TrSourceAdapter};
use crate::normalize::record::{HaplotypeRecord, Spans, TrLocusRecord};
use crate::normalize::span_parser::parse_id_prefixed;
use crate::utils::{GenomicRegion, Result};
use crate::vcf::{fields, VcfReader};

pub struct TrgtAdapter;

/// Raw fields of one TRGT record.
#[derive(Debug, Clone, Default)]
pub struct TrgtLocusFields {
    pub chrom: String,
    pub pos: u32,
    pub stop: u32,
    pub trid: String,
    pub motifs: Vec<String>,
    pub ref_seq: String,
    pub alts: Vec<String>,
    pub ms: Vec<String>,
    pub mc: Vec<String>,
    pub gt: String,
}

impl TrSourceAdapter for TrgtAdapter {
    fn parse_locus(&self, vcf: &mut VcfReader, region: &GenomicRegion) -> Result<TrLocusRecord> {
        let record = match vcf.fetch_first(region)? {
            Some(record) => record,
            None => return Ok(TrLocusRecord::empty()),
        };
        Ok(normalize(extract(vcf, &record)))
    }
}

fn extract(vcf: &VcfReader, record: &rust_htslib::bcf::Record) -> TrgtLocusFields {
    let (ref_seq, alts) = fields::alleles(record);
    TrgtLocusFields {
        chrom: vcf.contig_name(record),
        pos: record.pos() as u32 + 1,
        stop: record.end() as u32,
        trid: fields::info_string(record, b"TRID").unwrap_or_default(),
        motifs: fields::info_strings(record, b"MOTIFS").unwrap_or_default(),
        ref_seq,
        alts,
        ms: fields::format_strings(record, b"MS").unwrap_or_default(),
        mc: fields::format_strings(record, b"MC").unwrap_or_default(),
        gt: fields::genotype_string(record).unwrap_or_default(),
    }
}

/// `TRID` is `"chrom_start_end"`. Split from the right so contig names that
/// contain underscores keep their full name.
fn parse_trid(trid: &str) -> Option<(String, u32, u32)> {
    let mut parts = trid.rsplitn(3, '_');
    let end = parts.next()?.parse().ok()?;
    let start = parts.next()?.parse().ok()?;
    let chrom = parts.next()?;
    if chrom.is_empty() {
        return None;
    }
    Some((chrom.to_string(), start, end))
}

/// The asymmetric haplotype-sequence assignment TRGT genotypes imply. A
/// lone ALT with any genotype other than `0/1` serves both haplotypes, so
/// `1/2` with a single listed ALT collapses onto that ALT.
fn haplotype_seqs(gt: &str, ref_seq: &str, alts: &[String]) -> (String, String) {
    if alts.is_empty() || gt == "0/0" {
        return (ref_seq.to_string(), ref_seq.to_string());
    }
    if alts.len() >= 2 {
        return (alts[0].clone(), alts[1].clone());
    }
    if gt == "0/1" {
        return (ref_seq.to_string(), alts[0].clone());
    }
    (alts[0].clone(), alts[0].clone())
}

/// Sum of the underscore-joined `MC` occurrence counts, or the span count
/// when `MC` is absent or unparsable.
fn copy_number(mc: &str, spans: &Spans) -> usize {
    let counts: Vec<usize> = mc
        .split('_')
        .filter_map(|count| count.parse().ok())
        .collect();
    if counts.is_empty() {
        spans.len()
    } else {
        counts.iter().sum()
    }
}

pub fn normalize(raw: TrgtLocusFields) -> TrLocusRecord {
    let (chrom, pos, stop) = match parse_trid(&raw.trid) {
        Some(bounds) => bounds,
        None => (raw.chrom, raw.pos, raw.stop),
    };
    let id = if raw.trid.is_empty() {
        ".".to_string()
    } else {
        raw.trid
    };

    let (ms_h1, ms_h2) = per_haplotype(&raw.ms);
    let spans_h1 = parse_id_prefixed(&ms_h1);
    let spans_h2 = parse_id_prefixed(&ms_h2);
    let (mc_h1, mc_h2) = per_haplotype(&raw.mc);
    let cn_h1 = copy_number(&mc_h1, &spans_h1);
    let cn_h2 = copy_number(&mc_h2, &spans_h2);

    let reference = HaplotypeRecord::new(Vec::new(), raw.ref_seq.clone(), 0);

    // A GT without a separator is a hemizygous single-haplotype call.
    if !raw.gt.contains('/') {
        let seq = if raw.gt == "0" {
            raw.ref_seq
        } else {
            raw.alts.first().cloned().unwrap_or(raw.ref_seq)
        };
        return TrLocusRecord {
            chrom,
            pos,
            stop,
            id,
            motifs: raw.motifs,
            reference,
            hap1: HaplotypeRecord::new(spans_h1, seq, cn_h1),
            hap2: None,
            genotype: raw.gt,
        };
    }

    let (seq_h1, seq_h2) = haplotype_seqs(&raw.gt, &reference.seq, &raw.alts);

    TrLocusRecord {
        chrom,
        pos,
        stop,
        id,
        motifs: raw.motifs,
        reference,
        hap1: HaplotypeRecord::new(spans_h1, seq_h1, cn_h1),
        hap2: Some(HaplotypeRecord::new(spans_h2, seq_h2, cn_h2)),
        genotype: raw.gt,
    }
}
