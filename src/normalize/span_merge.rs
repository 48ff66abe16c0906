//! Coalesces consecutive same-motif spans into runs for the compressed
//! caller-comparison view. A run only extends while the motif id stays the
//! same and the next span starts exactly one base after the previous one
//! ends; any gap or id change closes the run.

use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder returned for degenerate input, mirroring the `"."` null
/// convention of the VCF fields the spans come from.
pub const NULL_SPAN: &str = ".";

static RAW_INTERVAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d+)-(\d+)\)").unwrap());

/// Merges a Grammar B span string with its positionally aligned motif-id
/// list. Coordinates are taken and re-emitted verbatim. Degenerate input
/// (length mismatch, or either side empty) yields `(".", ["."])` instead of
/// an error, and merging an already-merged pair returns it unchanged.
pub fn merge_spans(encoding: &str, motif_ids: &[String]) -> (String, Vec<String>) {
    let intervals: Vec<(usize, usize)> = RAW_INTERVAL
        .captures_iter(encoding)
        .filter_map(|token| {
            let start = token[1].parse().ok()?;
            let end = token[2].parse().ok()?;
            Some((start, end))
        })
        .collect();

    if intervals.is_empty() || motif_ids.is_empty() || intervals.len() != motif_ids.len() {
        return (NULL_SPAN.to_string(), vec![NULL_SPAN.to_string()]);
    }

    let mut merged = String::new();
    let mut merged_ids = Vec::new();
    let (mut run_start, mut run_end) = intervals[0];
    let mut run_id = &motif_ids[0];

    for ((start, end), id) in intervals.iter().skip(1).zip(motif_ids.iter().skip(1)) {
        if id == run_id && *start == run_end + 1 {
            run_end = *end;
        } else {
            merged.push_str(&format!("({}-{})", run_start, run_end));
            merged_ids.push(run_id.clone());
            run_start = *start;
            run_end = *end;
            run_id = id;
        }
    }
    merged.push_str(&format!("({}-{})", run_start, run_end));
    merged_ids.push(run_id.clone());

    (merged, merged_ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn contiguous_same_motif_spans_coalesce() {
        let (spans, merged_ids) = merge_spans("(0-2)(3-5)(6-8)", &ids(&["0", "0", "1"]));
        assert_eq!(spans, "(0-5)(6-8)");
        assert_eq!(merged_ids, ids(&["0", "1"]));
    }

    #[test]
    fn gaps_break_runs() {
        // (3-5) and (7-9) share a motif but are not contiguous.
        let (spans, merged_ids) = merge_spans("(3-5)(7-9)", &ids(&["2", "2"]));
        assert_eq!(spans, "(3-5)(7-9)");
        assert_eq!(merged_ids, ids(&["2", "2"]));
    }

    #[test]
    fn merge_is_idempotent() {
        let (spans, merged_ids) = merge_spans(
            "(0-8)(9-12)(13-16)(17-20)",
            &ids(&["0", "0", "0", "3"]),
        );
        let (again_spans, again_ids) = merge_spans(&spans, &merged_ids);
        assert_eq!(spans, again_spans);
        assert_eq!(merged_ids, again_ids);
    }

    #[test]
    fn degenerate_inputs_return_null_pair() {
        let null = (NULL_SPAN.to_string(), vec![NULL_SPAN.to_string()]);
        assert_eq!(merge_spans("", &ids(&["0"])), null);
        assert_eq!(merge_spans("(0-2)", &[]), null);
        assert_eq!(merge_spans("(0-2)(3-5)", &ids(&["0"])), null);
        // The null pair is itself a fixed point.
        assert_eq!(merge_spans(NULL_SPAN, &ids(&[NULL_SPAN])), null);
    }

    #[test]
    fn single_span_passes_through() {
        let (spans, merged_ids) = merge_spans("(4-7)", &ids(&["5"]));
        assert_eq!(spans, "(4-7)");
        assert_eq!(merged_ids, ids(&["5"]));
    }
}
