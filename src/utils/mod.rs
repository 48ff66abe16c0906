mod region;
mod util;

pub use region::GenomicRegion;
pub use util::{handle_error_and_exit, Result};
