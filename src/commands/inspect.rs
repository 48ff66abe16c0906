use crate::cli::InspectArgs;
use crate::normalize::adapters::parse_one;
use crate::normalize::genotype::interpret;
use crate::normalize::segments::{Segment, SegmentBuilder};
use crate::normalize::HaplotypeRecord;
use crate::utils::Result;
use itertools::Itertools;

pub fn inspect(args: InspectArgs) -> Result<()> {
    let record = parse_one(&args.vcf_path, args.dialect, &args.region)?;
    if record.is_empty() {
        println!("{}: no data", args.region);
        return Ok(());
    }

    println!(
        "{}:{}-{} id={}",
        record.chrom, record.pos, record.stop, record.id
    );
    println!("motifs: {}", record.motifs.iter().join(","));
    println!(
        "genotype: {} ({})",
        if record.genotype.is_empty() {
            "."
        } else {
            &record.genotype
        },
        interpret(&record.genotype).describe()
    );

    let mut builder = SegmentBuilder::new(&record.motifs);
    print_haplotype("ref ", &record.reference, &mut builder);
    print_haplotype("hap1", &record.hap1, &mut builder);
    if let Some(hap2) = &record.hap2 {
        print_haplotype("hap2", hap2, &mut builder);
    }

    for interruption in builder.repeated_interruptions() {
        log::warn!(
            "Interruption {} recurs and matches a cataloged motif length; possible mis-annotated motif",
            interruption
        );
    }
    Ok(())
}

fn print_haplotype(name: &str, hap: &HaplotypeRecord, builder: &mut SegmentBuilder<'_>) {
    if !hap.has_sequence() {
        println!("{} CN={}: no sequence", name, hap.copy_number);
        return;
    }
    let segments = builder.build(&hap.seq, &hap.spans);
    let rendered = segments
        .iter()
        .map(|segment| match segment {
            Segment::Motif { seq, .. } => format!("[{}]", seq),
            Segment::Interruption { seq, .. } => seq.clone(),
        })
        .join("");
    let depth = hap
        .supporting_reads
        .map(|reads| format!(" reads={}", reads))
        .unwrap_or_default();
    println!("{} CN={}{}: {}", name, hap.copy_number, depth, rendered);
}
