//! Adapter for assembly-based caller VCFs. Each file carries one haplotype
//! per record, with an id-prefixed 0-based `SP` grammar and a single-allele
//! `GT`; the diploid view is reconstructed by pairing the two haplotype
//! files with `pair_haplotypes`.

use crate::normalize::adapters::{parse_motif_ids, TrSourceAdapter};
use crate::normalize::genotype::synthesize_diploid;
use crate::normalize::record::{HaplotypeRecord, TrLocusRecord};
use crate::normalize::span_parser::{parse_bare, parse_id_prefixed, zip_with_ids};
use crate::utils::{GenomicRegion, Result};
use crate::vcf::{fields, VcfReader};

pub struct AssemblyAdapter;

/// Raw fields of one assembly-caller record.
#[derive(Debug, Clone, Default)]
pub struct AssemblyLocusFields {
    pub chrom: String,
    pub pos: u32,
    pub stop: u32,
    pub id: String,
    pub motifs: Vec<String>,
    pub ref_seq: String,
    pub alts: Vec<String>,
    pub mi: String,
    pub sp: String,
    pub ref_span: String,
    pub motif_ids_ref: String,
    pub cn: i32,
    pub cn_ref: i32,
    pub gt: String,
}

impl TrSourceAdapter for AssemblyAdapter {
    fn parse_locus(&self, vcf: &mut VcfReader, region: &GenomicRegion) -> Result<TrLocusRecord> {
        let record = match vcf.fetch_first(region)? {
            Some(record) => record,
            None => return Ok(TrLocusRecord::empty()),
        };
        Ok(normalize(extract(vcf, &record)))
    }
}

fn extract(vcf: &VcfReader, record: &rust_htslib::bcf::Record) -> AssemblyLocusFields {
    let (ref_seq, alts) = fields::alleles(record);
    AssemblyLocusFields {
        chrom: vcf.contig_name(record),
        pos: record.pos() as u32 + 1,
        stop: record.end() as u32,
        id: String::from_utf8_lossy(&record.id()).into_owned(),
        motifs: fields::info_strings(record, b"MOTIFS").unwrap_or_default(),
        ref_seq,
        alts,
        mi: fields::format_strings(record, b"MI")
            .and_then(|values| values.into_iter().next())
            .unwrap_or_default(),
        sp: fields::format_strings(record, b"SP")
            .and_then(|values| values.into_iter().next())
            .unwrap_or_default(),
        ref_span: fields::info_string(record, b"REF_SPAN").unwrap_or_default(),
        motif_ids_ref: fields::info_string(record, b"MOTIF_IDs_REF").unwrap_or_default(),
        cn: fields::format_ints(record, b"CN")
            .and_then(|values| values.first().copied())
            .unwrap_or(0),
        cn_ref: fields::info_int(record, b"CN_ref").unwrap_or(0),
        // Assembly records are haploid; only the first GT allele counts.
        gt: fields::genotype_string(record)
            .and_then(|gt| gt.split('/').next().map(|allele| allele.to_string()))
            .unwrap_or_default(),
    }
}

pub fn normalize(raw: AssemblyLocusFields) -> TrLocusRecord {
    let spans = parse_id_prefixed(&raw.sp);
    let alt = raw.alts.first().cloned().unwrap_or_default();
    let copy_number = if raw.cn > 0 {
        raw.cn as usize
    } else {
        spans.len()
    };

    let ids_ref = parse_motif_ids(&raw.motif_ids_ref);
    let spans_ref = zip_with_ids(&parse_bare(&raw.ref_span), &ids_ref);
    let cn_ref = if raw.cn_ref > 0 {
        raw.cn_ref as usize
    } else {
        spans_ref.len()
    };

    TrLocusRecord {
        chrom: raw.chrom,
        pos: raw.pos,
        stop: raw.stop,
        id: raw.id,
        motifs: raw.motifs,
        reference: HaplotypeRecord::new(spans_ref, raw.ref_seq, cn_ref),
        hap1: HaplotypeRecord::new(spans, alt, copy_number),
        hap2: None,
        genotype: raw.gt,
    }
}

/// Joins the loci parsed from the two assembly haplotype files into one
/// diploid record. Locus metadata comes from whichever side has data, and
/// the genotype is synthesized by comparing each haplotype's motif-id
/// sequence against the reference pattern.
pub fn pair_haplotypes(h1: &TrLocusRecord, h2: &TrLocusRecord) -> TrLocusRecord {
    if h1.is_empty() && h2.is_empty() {
        return TrLocusRecord::empty();
    }
    let locus = if h1.is_empty() { h2 } else { h1 };

    let genotype = synthesize_diploid(
        &h1.genotype,
        &h2.genotype,
        &h1.hap1.motif_ids,
        &h2.hap1.motif_ids,
        &locus.reference.motif_ids,
    );

    TrLocusRecord {
        chrom: locus.chrom.clone(),
        pos: locus.pos,
        stop: locus.stop,
        id: locus.id.clone(),
        motifs: locus.motifs.clone(),
        reference: locus.reference.clone(),
        hap1: h1.hap1.clone(),
        hap2: Some(h2.hap1.clone()),
        genotype,
    }
}
