pub mod cache;
pub mod cli;
pub mod commands;
pub mod normalize;
pub mod utils;
pub mod vcf;
