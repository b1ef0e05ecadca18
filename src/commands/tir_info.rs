use crate::annotate::{extract_tir_info, DEFAULT_SCORING};
use crate::cli::TirInfoArgs;
use crate::utils::{read_fasta_records, write_fasta_records, Result};
use itertools::Itertools;

pub fn tir_info(args: TirInfoArgs) -> Result<()> {
    let records = read_fasta_records(&args.in_file)?;

    let annotated = records
        .iter()
        .map(|rec| {
            (
                extract_tir_info(&rec.title, &rec.seq, args.tir_len, &DEFAULT_SCORING),
                rec.seq.as_str(),
            )
        })
        .collect_vec();

    write_fasta_records(
        &args.out_file,
        annotated.iter().map(|(title, seq)| (title.as_str(), *seq)),
    )?;

    log::info!(
        "{} records with TIR information are stored in '{}'",
        annotated.len(),
        args.out_file.display()
    );
    Ok(())
}
