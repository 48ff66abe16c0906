use crate::cli::RegionsArgs;
use crate::normalize::adapters::Dialect;
use crate::utils::Result;
use crate::vcf::{fields, VcfReader};

/// Walks the whole file and prints one `id<TAB>chrom:start-end` line per
/// record, the index used to step through loci one by one. For TRGT files
/// the key is the `TRID` locus id; elsewhere it is the record id.
pub fn regions(args: RegionsArgs) -> Result<()> {
    let mut vcf = VcfReader::new(args.vcf_path.clone())?;
    let mut record = vcf.empty_record();
    let mut count = 0u64;

    for rid in 0..vcf.contig_count() {
        vcf.fetch_contig(rid)?;
        while let Some(read) = vcf.advance(&mut record) {
            read?;
            let chrom = vcf.contig_name(&record);
            let pos = record.pos() as u64 + 1;
            let stop = record.end() as u64;
            let id = match args.dialect {
                Dialect::Trgt => {
                    fields::info_string(&record, b"TRID").unwrap_or_else(|| ".".to_string())
                }
                _ => String::from_utf8_lossy(&record.id()).into_owned(),
            };
            println!("{}\t{}:{}-{}", id, chrom, pos, stop);
            count += 1;
        }
    }

    log::info!("Listed {} regions from {}", count, args.vcf_path.display());
    Ok(())
}
