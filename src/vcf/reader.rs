use crate::utils::{GenomicRegion, Result};
use rust_htslib::bcf::{self, Read};
use std::path::{Path, PathBuf};

/// Indexed single-sample VCF handle. One handle serves one worker; handles
/// are never shared across threads.
pub struct VcfReader {
    reader: bcf::IndexedReader,
    pub header: bcf::header::HeaderView,
    path: PathBuf,
}

impl VcfReader {
    pub fn new(path: PathBuf) -> Result<Self> {
        log::debug!("Opening VCF {:?}", &path);
        let reader = bcf::IndexedReader::from_path(&path)
            .map_err(|e| format!("Failed to open VCF file {}: {}", path.display(), e))?;
        let header = reader.header().clone();

        if header.sample_count() > 1 {
            return Err(format!(
                "Unsupported: VCF file with multiple samples: {}",
                path.display()
            ));
        }
        if header.sample_count() == 0 {
            return Err(format!(
                "VCF file has no sample columns: {}",
                path.display()
            ));
        }

        Ok(VcfReader {
            reader,
            header,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// First record overlapping the region, or `None` when the region is
    /// empty or the contig is absent from this file.
    pub fn fetch_first(&mut self, region: &GenomicRegion) -> Result<Option<bcf::Record>> {
        let rid = match self.header.name2rid(region.contig.as_bytes()) {
            Ok(rid) => rid,
            Err(_) => return Ok(None),
        };
        let (start, end) = region.fetch_window();
        self.reader
            .fetch(rid, start, Some(end))
            .map_err(|e| format!("Failed to fetch {} from {}: {}", region, self.path.display(), e))?;

        let mut record = self.reader.empty_record();
        match self.reader.read(&mut record) {
            Some(Ok(())) => Ok(Some(record)),
            Some(Err(e)) => Err(format!(
                "Failed to read record at {} from {}: {}",
                region,
                self.path.display(),
                e
            )),
            None => Ok(None),
        }
    }

    pub fn empty_record(&self) -> bcf::Record {
        self.reader.empty_record()
    }

    pub fn contig_count(&self) -> u32 {
        self.header.contig_count()
    }

    /// Positions the reader at the start of one contig; pair with
    /// `advance` to walk every record on it.
    pub fn fetch_contig(&mut self, rid: u32) -> Result<()> {
        self.reader.fetch(rid, 0, None).map_err(|e| {
            format!(
                "Failed to fetch contig {} from {}: {}",
                rid,
                self.path.display(),
                e
            )
        })
    }

    /// Sequential read used to walk a whole file, e.g. for the region index.
    pub fn advance(&mut self, record: &mut bcf::Record) -> Option<Result<()>> {
        match self.reader.read(record) {
            Some(Ok(())) => Some(Ok(())),
            Some(Err(e)) => Some(Err(format!(
                "Failed to read record from {}: {}",
                self.path.display(),
                e
            ))),
            None => None,
        }
    }

    /// Contig name for a record, as recorded in this file's header.
    pub fn contig_name(&self, record: &bcf::Record) -> String {
        record
            .rid()
            .and_then(|rid| self.header.rid2name(rid).ok())
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .unwrap_or_default()
    }
}
