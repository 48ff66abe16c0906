use crate::normalize::adapters::Dialect;
use crate::utils::{GenomicRegion, Result};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| env!("CARGO_PKG_VERSION").to_string());

#[derive(Parser)]
#[command(name="trview",
          version=&**FULL_VERSION,
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Tandem Repeat Locus Inspector")]
    Inspect(InspectArgs),
    #[clap(about = "Tandem Repeat Caller Comparator")]
    Compare(CompareArgs),
    #[clap(about = "Tandem Repeat Region Lister")]
    Regions(RegionsArgs),
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct InspectArgs {
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "vcf")]
    #[clap(help = "Indexed VCF file with tandem repeat calls")]
    #[clap(value_name = "VCF")]
    #[arg(value_parser = check_file_exists)]
    pub vcf_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'r')]
    #[clap(long = "region")]
    #[clap(help = "Tandem repeat region (chr:start-end)")]
    #[clap(value_name = "REGION")]
    #[arg(value_parser = region_from_string)]
    pub region: GenomicRegion,

    #[clap(long = "dialect")]
    #[clap(short = 'd')]
    #[clap(value_name = "DIALECT")]
    #[clap(help = "VCF dialect (reads, assembly, or trgt)")]
    #[clap(default_value = "reads")]
    pub dialect: Dialect,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct CompareArgs {
    #[clap(required = true)]
    #[clap(long = "trgt")]
    #[clap(help = "Indexed TRGT VCF file")]
    #[clap(value_name = "VCF")]
    #[arg(value_parser = check_file_exists)]
    pub trgt_path: PathBuf,

    #[clap(required = true)]
    #[clap(long = "reads")]
    #[clap(help = "Indexed reads-based caller VCF file")]
    #[clap(value_name = "VCF")]
    #[arg(value_parser = check_file_exists)]
    pub reads_path: PathBuf,

    #[clap(required = true)]
    #[clap(long = "hap1")]
    #[clap(help = "Indexed assembly VCF file for haplotype 1")]
    #[clap(value_name = "VCF")]
    #[arg(value_parser = check_file_exists)]
    pub hap1_path: PathBuf,

    #[clap(required = true)]
    #[clap(long = "hap2")]
    #[clap(help = "Indexed assembly VCF file for haplotype 2")]
    #[clap(value_name = "VCF")]
    #[arg(value_parser = check_file_exists)]
    pub hap2_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'r')]
    #[clap(long = "region")]
    #[clap(help = "Tandem repeat region (chr:start-end)")]
    #[clap(value_name = "REGION")]
    #[arg(value_parser = region_from_string)]
    pub region: GenomicRegion,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct RegionsArgs {
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "vcf")]
    #[clap(help = "Indexed VCF file with tandem repeat calls")]
    #[clap(value_name = "VCF")]
    #[arg(value_parser = check_file_exists)]
    pub vcf_path: PathBuf,

    #[clap(long = "dialect")]
    #[clap(short = 'd')]
    #[clap(value_name = "DIALECT")]
    #[clap(help = "VCF dialect (reads, assembly, or trgt)")]
    #[clap(default_value = "reads")]
    pub dialect: Dialect,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn region_from_string(s: &str) -> Result<GenomicRegion> {
    GenomicRegion::from_string(s)
}
