use crate::utils::Result;
use std::fmt;

/// A 1-based, fully closed genomic interval, the coordinate convention used
/// by region strings like `chr4:3074877-3074966`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenomicRegion {
    pub contig: String,
    pub start: u32,
    pub end: u32,
}

impl GenomicRegion {
    pub fn new(contig: impl Into<String>, start: u32, end: u32) -> Result<Self> {
        if start > end {
            return Err(format!("Invalid region: start {} > end {}", start, end));
        }

        Ok(Self {
            contig: contig.into(),
            start,
            end,
        })
    }

    pub fn from_string(encoding: &str) -> Result<Self> {
        let error_msg = || format!("Invalid region encoding: {}", encoding);
        let elements: Vec<&str> = encoding.split(&[':', '-']).collect();

        if elements.len() != 3 {
            return Err(error_msg());
        }

        let start: u32 = elements[1].parse().map_err(|_| error_msg())?;
        let end: u32 = elements[2].parse().map_err(|_| error_msg())?;

        Self::new(elements[0].to_string(), start, end)
    }

    /// The 0-based, half-open window htslib expects for index lookups.
    pub fn fetch_window(&self) -> (u64, u64) {
        (u64::from(self.start.saturating_sub(1)), u64::from(self.end))
    }
}

impl fmt::Display for GenomicRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.contig, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::GenomicRegion;

    #[test]
    fn init_region_from_valid_string_ok() {
        let region = GenomicRegion::from_string("chr1:100-200").unwrap();
        assert_eq!(region.contig, "chr1");
        assert_eq!(region.start, 100);
        assert_eq!(region.end, 200);
    }

    #[test]
    fn init_region_from_invalid_string_err() {
        assert_eq!(
            GenomicRegion::from_string("chr:1:100-200"),
            Err("Invalid region encoding: chr:1:100-200".to_string())
        );
    }

    #[test]
    fn init_region_from_invalid_interval_err() {
        assert_eq!(
            GenomicRegion::from_string("chr1:200-100"),
            Err("Invalid region: start 200 > end 100".to_string())
        );
    }

    #[test]
    fn region_round_trips_through_display() {
        let region = GenomicRegion::from_string("chrX:147912050-147912110").unwrap();
        assert_eq!(region.to_string(), "chrX:147912050-147912110");
    }

    #[test]
    fn fetch_window_is_half_open() {
        let region = GenomicRegion::new("chr1", 100, 200).unwrap();
        assert_eq!(region.fetch_window(), (99, 200));
    }
}
