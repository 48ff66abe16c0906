//! Turns a normalized haplotype into the ordered motif/interruption segment
//! list consumed by the rendering layer. Segments tile the allele sequence
//! exactly: every base belongs to one motif span or one interruption.

use crate::normalize::record::Span;
use std::collections::{BTreeSet, HashMap};

/// Half-open segment of an allele sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Motif {
        motif: String,
        start: usize,
        end: usize,
        seq: String,
    },
    Interruption {
        start: usize,
        end: usize,
        seq: String,
    },
}

impl Segment {
    pub fn seq(&self) -> &str {
        match self {
            Segment::Motif { seq, .. } => seq,
            Segment::Interruption { seq, .. } => seq,
        }
    }
}

/// Builds segment lists for the sequences of one locus and collects
/// interruption diagnostics across them.
pub struct SegmentBuilder<'a> {
    catalog: &'a [String],
    repeated_interruptions: BTreeSet<String>,
}

impl<'a> SegmentBuilder<'a> {
    pub fn new(catalog: &'a [String]) -> Self {
        SegmentBuilder {
            catalog,
            repeated_interruptions: BTreeSet::new(),
        }
    }

    /// Walks the spans of one sequence in order. A gap before a span
    /// becomes an interruption, the span itself a motif segment, and any
    /// remainder after the last span a trailing interruption. Sequences
    /// recorded as `"."` or `""` have nothing to segment. Spans that fall
    /// outside the sequence, overlap a previous span, or name a motif not
    /// in the catalog are skipped; their bases end up in the surrounding
    /// interruptions.
    pub fn build(&mut self, seq: &str, spans: &[Span]) -> Vec<Segment> {
        if seq.is_empty() || seq == "." {
            return Vec::new();
        }

        let bytes = seq.as_bytes();
        let mut segments = Vec::new();
        let mut gap_counts: HashMap<String, usize> = HashMap::new();
        let mut previous_end = 0usize;

        for span in spans {
            if span.end >= bytes.len() || span.start < previous_end {
                continue;
            }
            let motif = match self.catalog.get(span.motif_index) {
                Some(motif) => motif.clone(),
                None => continue,
            };

            if span.start > previous_end {
                let gap = subsequence(bytes, previous_end, span.start);
                *gap_counts.entry(gap.clone()).or_insert(0) += 1;
                segments.push(Segment::Interruption {
                    start: previous_end,
                    end: span.start,
                    seq: gap,
                });
            }

            segments.push(Segment::Motif {
                motif,
                start: span.start,
                end: span.end + 1,
                seq: subsequence(bytes, span.start, span.end + 1),
            });
            previous_end = span.end + 1;
        }

        if previous_end < bytes.len() {
            segments.push(Segment::Interruption {
                start: previous_end,
                end: bytes.len(),
                seq: subsequence(bytes, previous_end, bytes.len()),
            });
        }

        // An interruption that recurs and has the length of a cataloged
        // motif is likely a mis-annotated motif occurrence.
        for (gap, count) in gap_counts {
            if count > 1 && self.catalog.iter().any(|motif| motif.len() == gap.len()) {
                self.repeated_interruptions.insert(gap);
            }
        }

        segments
    }

    /// Interruption substrings seen more than once within a single sequence
    /// whose length matches a cataloged motif.
    pub fn repeated_interruptions(&self) -> &BTreeSet<String> {
        &self.repeated_interruptions
    }
}

fn subsequence(bytes: &[u8], start: usize, end: usize) -> String {
    String::from_utf8_lossy(&bytes[start..end]).into_owned()
}
