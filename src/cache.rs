//! Memoization of parsed loci keyed by file path and region string. There
//! is no TTL; the cache is dropped wholesale when a new file set is loaded.

use crate::normalize::TrLocusRecord;
use crate::utils::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordCache {
    entries: Mutex<HashMap<(PathBuf, String), TrLocusRecord>>,
}

impl RecordCache {
    pub fn new() -> Self {
        RecordCache::default()
    }

    /// Returns the cached record for `(path, region)` or computes, stores,
    /// and returns it. Failed parses are not cached, so a transient read
    /// error does not poison the key. A lock poisoned by a panicking
    /// worker surfaces as an error rather than a cascading panic.
    pub fn get_or_insert_with<F>(&self, path: &Path, region: &str, parse: F) -> Result<TrLocusRecord>
    where
        F: FnOnce() -> Result<TrLocusRecord>,
    {
        let key = (path.to_path_buf(), region.to_string());
        if let Some(record) = self.lock()?.get(&key) {
            return Ok(record.clone());
        }
        let record = parse()?;
        self.lock()?.insert(key, record.clone());
        Ok(record)
    }

    pub fn clear(&self) {
        // Clearing recovers a poisoned cache; the stale entries go away
        // either way.
        match self.entries.lock() {
            Ok(mut entries) => entries.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
        self.entries.clear_poison();
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<(PathBuf, String), TrLocusRecord>>> {
        self.entries
            .lock()
            .map_err(|_| "Record cache lock poisoned by an earlier panic".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(chrom: &str) -> TrLocusRecord {
        TrLocusRecord {
            chrom: chrom.to_string(),
            motifs: vec!["CAG".to_string()],
            ..TrLocusRecord::empty()
        }
    }

    #[test]
    fn second_lookup_skips_the_parser() {
        let cache = RecordCache::new();
        let path = PathBuf::from("a.vcf.gz");
        let mut calls = 0;
        for _ in 0..2 {
            let got = cache
                .get_or_insert_with(&path, "chr1:1-10", || {
                    calls += 1;
                    Ok(record("chr1"))
                })
                .unwrap();
            assert_eq!(got.chrom, "chr1");
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn distinct_regions_are_distinct_keys() {
        let cache = RecordCache::new();
        let path = PathBuf::from("a.vcf.gz");
        cache
            .get_or_insert_with(&path, "chr1:1-10", || Ok(record("chr1")))
            .unwrap();
        let other = cache
            .get_or_insert_with(&path, "chr2:1-10", || Ok(record("chr2")))
            .unwrap();
        assert_eq!(other.chrom, "chr2");
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = RecordCache::new();
        let path = PathBuf::from("a.vcf.gz");
        let err = cache.get_or_insert_with(&path, "chr1:1-10", || Err("read failed".to_string()));
        assert!(err.is_err());
        let got = cache
            .get_or_insert_with(&path, "chr1:1-10", || Ok(record("chr1")))
            .unwrap();
        assert_eq!(got.chrom, "chr1");
    }

    #[test]
    fn poisoned_lock_surfaces_as_an_error() {
        let cache = RecordCache::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = cache.entries.lock().unwrap();
            panic!("worker died");
        }));
        let path = PathBuf::from("a.vcf.gz");
        let result = cache.get_or_insert_with(&path, "chr1:1-10", || Ok(record("chr1")));
        assert!(result.unwrap_err().contains("poisoned"));
        // clear() recovers the cache for subsequent lookups.
        cache.clear();
        let got = cache
            .get_or_insert_with(&path, "chr1:1-10", || Ok(record("chr1")))
            .unwrap();
        assert_eq!(got.chrom, "chr1");
    }

    #[test]
    fn clear_forgets_everything() {
        let cache = RecordCache::new();
        let path = PathBuf::from("a.vcf.gz");
        cache
            .get_or_insert_with(&path, "chr1:1-10", || Ok(record("chr1")))
            .unwrap();
        cache.clear();
        let mut calls = 0;
        cache
            .get_or_insert_with(&path, "chr1:1-10", || {
                calls += 1;
                Ok(record("chr1"))
            })
            .unwrap();
        assert_eq!(calls, 1);
    }
}
