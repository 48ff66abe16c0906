pub mod adapters;
pub mod genotype;
pub mod record;
pub mod segments;
pub mod span_merge;
pub mod span_parser;

pub use record::{HaplotypeRecord, MotifCatalog, Span, Spans, TrLocusRecord};
