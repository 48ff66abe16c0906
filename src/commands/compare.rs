use crate::cache::RecordCache;
use crate::cli::CompareArgs;
use crate::normalize::adapters::{pair_haplotypes, parse_one, Dialect};
use crate::normalize::span_merge::merge_spans;
use crate::normalize::span_parser::encode_bare;
use crate::normalize::{HaplotypeRecord, TrLocusRecord};
use crate::utils::Result;
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;

pub fn compare(args: CompareArgs) -> Result<()> {
    let jobs: Vec<(&str, &PathBuf, Dialect)> = vec![
        ("trgt", &args.trgt_path, Dialect::Trgt),
        ("reads", &args.reads_path, Dialect::Reads),
        ("assembly-h1", &args.hap1_path, Dialect::Assembly),
        ("assembly-h2", &args.hap2_path, Dialect::Assembly),
    ];

    // One reader per job; handles are never shared across threads. The
    // cache dedupes jobs that point at the same file.
    let cache = RecordCache::new();
    let region_key = args.region.to_string();
    let results: Vec<(&str, Result<TrLocusRecord>)> = jobs
        .into_par_iter()
        .map(|(label, path, dialect)| {
            let parsed = cache.get_or_insert_with(path, &region_key, || {
                parse_one(path, dialect, &args.region)
            });
            (label, parsed)
        })
        .collect();

    let mut records: HashMap<&str, TrLocusRecord> = HashMap::new();
    for (label, result) in results {
        match result {
            Ok(record) => {
                records.insert(label, record);
            }
            // One failed caller must not take down the comparison.
            Err(e) => log::error!("Skipping {}: {}", label, e),
        }
    }

    println!("Region {}", args.region);
    if let Some(record) = records.get("trgt") {
        print_caller("trgt", record);
    }
    if let Some(record) = records.get("reads") {
        print_caller("reads", record);
    }
    if let (Some(h1), Some(h2)) = (records.get("assembly-h1"), records.get("assembly-h2")) {
        print_caller("assembly", &pair_haplotypes(h1, h2));
    }
    Ok(())
}

fn print_caller(name: &str, record: &TrLocusRecord) {
    if record.is_empty() {
        println!("{:>8}: no data", name);
        return;
    }
    println!(
        "{:>8}: {}:{}-{} GT={}",
        name,
        record.chrom,
        record.pos,
        record.stop,
        if record.genotype.is_empty() {
            "."
        } else {
            &record.genotype
        }
    );
    println!("{:>8}  ref  {}", "", haplotype_view(&record.reference));
    println!("{:>8}  hap1 {}", "", haplotype_view(&record.hap1));
    if let Some(hap2) = &record.hap2 {
        println!("{:>8}  hap2 {}", "", haplotype_view(hap2));
    }
}

/// Copy number plus the run-merged span view, which collapses contiguous
/// same-motif spans so callers with different span granularity line up.
fn haplotype_view(hap: &HaplotypeRecord) -> String {
    let ids: Vec<String> = hap.motif_ids.iter().map(|id| id.to_string()).collect();
    let (merged_spans, merged_ids) = merge_spans(&encode_bare(&hap.spans), &ids);
    let depth = hap
        .supporting_reads
        .map(|reads| format!(" reads={}", reads))
        .unwrap_or_default();
    format!(
        "CN={}{} spans={} ids={}",
        hap.copy_number,
        depth,
        merged_spans,
        merged_ids.iter().join("_")
    )
}
