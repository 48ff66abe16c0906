//! Parsers for the two span-string grammars found in TR caller VCFs.
//!
//! Grammar A is id-prefixed, `idx(start-end)` tokens optionally separated by
//! underscores; it is used by TRGT's `MS` field and the assembly caller's
//! `SP` field, and its bounds are written 0-based with consecutive runs
//! sharing their boundary base. Grammar B is bare
//! intervals, `(start-end)`, with the motif id supplied by a parallel `MI`
//! array; it is used by the reads caller's `SP` and `REF_SPAN` fields, and
//! its bounds are written 1-based. All output is 0-based and fully closed.
//!
//! Malformed tokens are dropped silently so that segment building stays
//! usable on partially corrupt files; only the tokens that match the grammar
//! contribute spans.

use crate::normalize::record::{Span, Spans};
use once_cell::sync::Lazy;
use regex::Regex;

/// Grammar A bounds are already 0-based in the source text.
const ID_PREFIXED_BASE: usize = 0;
/// Grammar B bounds are 1-based in the source text.
const BARE_INTERVAL_BASE: usize = 1;

static ID_PREFIXED_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\((\d+)-(\d+)\)").unwrap());
static BARE_INTERVAL_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d+)-(\d+)\)").unwrap());

fn is_null(encoding: &str) -> bool {
    encoding.is_empty() || encoding == "."
}

fn rebase(start: &str, end: &str, base: usize) -> Option<(usize, usize)> {
    let start = start.parse::<usize>().ok()?.checked_sub(base)?;
    let end = end.parse::<usize>().ok()?.checked_sub(base)?;
    if start <= end {
        Some((start, end))
    } else {
        None
    }
}

/// Parses a Grammar A encoding such as `"15(0-51)_0(51-102)"`. Writers of
/// this grammar let consecutive runs share their boundary base; the later
/// span is shifted forward one base so the closed intervals stay
/// non-overlapping, attributing the shared base to the earlier run.
pub fn parse_id_prefixed(encoding: &str) -> Spans {
    if is_null(encoding) {
        return Vec::new();
    }
    let mut spans: Spans = Vec::new();
    for token in ID_PREFIXED_TOKEN.captures_iter(encoding) {
        let motif_index = match token[1].parse() {
            Ok(index) => index,
            Err(_) => continue,
        };
        let (mut start, end) = match rebase(&token[2], &token[3], ID_PREFIXED_BASE) {
            Some(bounds) => bounds,
            None => continue,
        };
        if let Some(previous) = spans.last() {
            if start == previous.end {
                start += 1;
            }
        }
        if start > end {
            continue;
        }
        spans.push(Span {
            motif_index,
            start,
            end,
        });
    }
    spans
}

/// Parses a Grammar B encoding such as `"(1-21)(22-42)"` into bare
/// intervals; pair with `zip_with_ids` to attach the `MI` array.
pub fn parse_bare(encoding: &str) -> Vec<(usize, usize)> {
    if is_null(encoding) {
        return Vec::new();
    }
    BARE_INTERVAL_TOKEN
        .captures_iter(encoding)
        .filter_map(|token| rebase(&token[1], &token[2], BARE_INTERVAL_BASE))
        .collect()
}

/// Attaches a positionally aligned motif-id list to bare intervals. Extra
/// entries on either side are dropped, keeping the two lists the same
/// length.
pub fn zip_with_ids(intervals: &[(usize, usize)], motif_ids: &[usize]) -> Spans {
    intervals
        .iter()
        .zip(motif_ids.iter())
        .map(|(&(start, end), &motif_index)| Span {
            motif_index,
            start,
            end,
        })
        .collect()
}

/// Re-serializes spans as a Grammar B string, the format consumed by
/// `span_merge` and the compressed comparison view.
pub fn encode_bare(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| format!("({}-{})", span.start, span.end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(motif_index: usize, start: usize, end: usize) -> Span {
        Span {
            motif_index,
            start,
            end,
        }
    }

    #[test]
    fn id_prefixed_tokens_parse_without_rebasing() {
        assert_eq!(
            parse_id_prefixed("1(3-9)_2(15-21)"),
            vec![span(1, 3, 9), span(2, 15, 21)]
        );
    }

    #[test]
    fn id_prefixed_tokens_parse_without_separators() {
        assert_eq!(
            parse_id_prefixed("15(0-51)0(52-102)"),
            vec![span(15, 0, 51), span(0, 52, 102)]
        );
    }

    #[test]
    fn abutting_tokens_keep_their_own_runs() {
        // Consecutive runs share their boundary base; the later span moves
        // forward so both occurrences survive as closed intervals.
        assert_eq!(
            parse_id_prefixed("0(0-5)_1(5-10)"),
            vec![span(0, 0, 5), span(1, 6, 10)]
        );
        assert_eq!(
            parse_id_prefixed("15(0-51)_0(51-102)"),
            vec![span(15, 0, 51), span(0, 52, 102)]
        );
    }

    #[test]
    fn abutting_single_base_tokens_are_dropped() {
        assert_eq!(parse_id_prefixed("0(0-5)_1(5-5)"), vec![span(0, 0, 5)]);
    }

    #[test]
    fn null_encodings_yield_no_spans() {
        assert_eq!(parse_id_prefixed(""), Vec::new());
        assert_eq!(parse_id_prefixed("."), Vec::new());
        assert_eq!(parse_bare(""), Vec::new());
        assert_eq!(parse_bare("."), Vec::new());
    }

    #[test]
    fn garbage_is_dropped_silently() {
        assert_eq!(parse_id_prefixed("garbage"), Vec::new());
        assert_eq!(parse_bare("garbage"), Vec::new());
        // The malformed middle token disappears, the rest survive.
        assert_eq!(
            parse_id_prefixed("1(3-9)_x(-)_2(15-21)"),
            vec![span(1, 3, 9), span(2, 15, 21)]
        );
    }

    #[test]
    fn inverted_intervals_are_dropped() {
        assert_eq!(parse_id_prefixed("0(9-3)"), Vec::new());
    }

    #[test]
    fn bare_intervals_rebase_to_zero_based() {
        assert_eq!(parse_bare("(1-21)(22-42)"), vec![(0, 20), (21, 41)]);
    }

    #[test]
    fn zip_truncates_to_shorter_side() {
        let intervals = vec![(0, 2), (3, 5), (6, 8)];
        assert_eq!(
            zip_with_ids(&intervals, &[4, 7]),
            vec![span(4, 0, 2), span(7, 3, 5)]
        );
    }

    #[test]
    fn encode_bare_round_trips_merged_coordinates() {
        let spans = vec![span(0, 0, 5), span(1, 6, 8)];
        assert_eq!(encode_bare(&spans), "(0-5)(6-8)");
    }
}
