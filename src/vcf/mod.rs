pub mod fields;
mod reader;

pub use reader::VcfReader;
