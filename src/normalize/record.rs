/// Ordered motif sequences for one locus; the index is stable and shared by
/// the reference allele and every haplotype at that locus.
pub type MotifCatalog = Vec<String>;

/// One motif occurrence on an allele sequence. Coordinates are 0-based and
/// fully closed; spans for one haplotype are ordered and non-overlapping,
/// and any gap between them is an interruption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub motif_index: usize,
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Closed-interval length, always at least one base.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

pub type Spans = Vec<Span>;

#[derive(Debug, Clone, PartialEq)]
pub struct HaplotypeRecord {
    pub motif_ids: Vec<usize>,
    pub spans: Spans,
    pub seq: String,
    pub copy_number: usize,
    pub supporting_reads: Option<u32>,
}

impl HaplotypeRecord {
    /// Builds a haplotype from its spans, deriving the motif-id list from
    /// them so the two stay the same length.
    pub fn new(spans: Spans, seq: String, copy_number: usize) -> Self {
        let motif_ids = spans.iter().map(|span| span.motif_index).collect();
        HaplotypeRecord {
            motif_ids,
            spans,
            seq,
            copy_number,
            supporting_reads: None,
        }
    }

    pub fn with_supporting_reads(mut self, depth: Option<u32>) -> Self {
        self.supporting_reads = depth;
        self
    }

    pub fn empty() -> Self {
        HaplotypeRecord {
            motif_ids: Vec::new(),
            spans: Vec::new(),
            seq: String::new(),
            copy_number: 0,
            supporting_reads: None,
        }
    }

    /// Deleted alleles are carried as `""` and uncalled ones as `"."`;
    /// neither can be segmented.
    pub fn has_sequence(&self) -> bool {
        !self.seq.is_empty() && self.seq != "."
    }
}

/// Canonical per-locus result shared by all three dialect adapters.
///
/// `genotype` keeps the raw string as read from the source file (`"a/b"` for
/// diploid callers, a single allele for assembly haplotypes); classification
/// is computed on demand by `genotype::interpret`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrLocusRecord {
    pub chrom: String,
    pub pos: u32,
    pub stop: u32,
    pub id: String,
    pub motifs: MotifCatalog,
    pub reference: HaplotypeRecord,
    pub hap1: HaplotypeRecord,
    pub hap2: Option<HaplotypeRecord>,
    pub genotype: String,
}

impl TrLocusRecord {
    /// Sentinel for regions without a call: callers render a "no data"
    /// state from this rather than handling an error.
    pub fn empty() -> Self {
        TrLocusRecord {
            chrom: String::new(),
            pos: 0,
            stop: 0,
            id: String::new(),
            motifs: Vec::new(),
            reference: HaplotypeRecord::empty(),
            hap1: HaplotypeRecord::empty(),
            hap2: None,
            genotype: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chrom.is_empty() && self.motifs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_is_empty() {
        let record = TrLocusRecord::empty();
        assert!(record.is_empty());
        assert!(!record.reference.has_sequence());
    }

    #[test]
    fn haplotype_derives_motif_ids_from_spans() {
        let spans = vec![
            Span {
                motif_index: 1,
                start: 0,
                end: 2,
            },
            Span {
                motif_index: 0,
                start: 3,
                end: 5,
            },
        ];
        let hap = HaplotypeRecord::new(spans, "AAATTT".to_string(), 2);
        assert_eq!(hap.motif_ids, vec![1, 0]);
        assert_eq!(hap.motif_ids.len(), hap.spans.len());
    }

    #[test]
    fn missing_sequences_are_flagged() {
        let deleted = HaplotypeRecord::new(Vec::new(), String::new(), 0);
        let uncalled = HaplotypeRecord::new(Vec::new(), ".".to_string(), 0);
        assert!(!deleted.has_sequence());
        assert!(!uncalled.has_sequence());
    }
}
