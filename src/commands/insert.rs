use crate::cli::InsertArgs;
use crate::simulate::insert::{insert_elements, InsertionOutcome, COPIES_PER_ELEMENT};
use crate::utils::{read_fasta_records, write_fasta_records, Result, SeqRecord};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn insert(args: InsertArgs) -> Result<()> {
    let mut genome = read_fasta_records(&args.genome)?;
    if genome.is_empty() {
        return Err(format!("No sequences found in {}", args.genome.display()));
    }
    let elements = read_fasta_records(&args.elements)?;

    let outcome = insert_elements(&mut genome, &elements, &mut rand::rng());

    write_fasta_records(
        &args.output_dir.join("genome_with_insertions.fasta"),
        genome.iter().map(|r| (r.title.as_str(), r.seq.as_str())),
    )?;
    write_inserted_sequences(
        &args.output_dir.join("inserted_elements.fasta"),
        &genome,
        &outcome,
    )?;
    write_inserted_gff3(
        &args.output_dir.join("inserted_elements.gff3"),
        &genome,
        &outcome,
    )?;

    log::info!(
        "{} (x{}) CACTA have been inserted into genome. {} of inserted elements are nested",
        elements.len(),
        COPIES_PER_ELEMENT,
        outcome.nested_count
    );
    Ok(())
}

fn write_inserted_sequences(
    path: &Path,
    genome: &[SeqRecord],
    outcome: &InsertionOutcome,
) -> Result<()> {
    let records = (0..genome.len()).flat_map(|i| {
        outcome.positions[&i].iter().map(move |span| {
            (
                format!("{}, {}-{}", span.title, span.start, span.end),
                &genome[i].seq[span.start..span.end],
            )
        })
    });

    let io_err = |e: std::io::Error| format!("Failed to write {}: {}", path.display(), e);
    let file = File::create(path).map_err(io_err)?;
    let mut handle = BufWriter::new(file);
    for (title, seq) in records {
        writeln!(handle, ">{}\n{}", title, seq).map_err(io_err)?;
    }
    Ok(())
}

fn write_inserted_gff3(path: &Path, genome: &[SeqRecord], outcome: &InsertionOutcome) -> Result<()> {
    let io_err = |e: std::io::Error| format!("Failed to write {}: {}", path.display(), e);
    let file = File::create(path).map_err(io_err)?;
    let mut handle = BufWriter::new(file);

    writeln!(handle, "##gff-version 3").map_err(io_err)?;
    for i in 0..genome.len() {
        for span in &outcome.positions[&i] {
            writeln!(
                handle,
                "{}\tcactascan\tCACTA_TIR_transposon\t{}\t{}\t.\t+\t.\tSeqName={}",
                i + 1,
                span.start,
                span.end,
                span.title
            )
            .map_err(io_err)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::read_fasta_records;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_insert_writes_all_three_outputs() {
        let dir = TempDir::new().unwrap();
        let genome_path = dir.path().join("genome.fasta");
        let elements_path = dir.path().join("elements.fasta");
        write_fasta_records(&genome_path, [("chr1", "A".repeat(200).as_str())]).unwrap();
        write_fasta_records(&elements_path, [("elem", "CACTAGGGGGTAGTG")]).unwrap();

        insert(InsertArgs {
            genome: genome_path,
            elements: elements_path,
            output_dir: dir.path().to_path_buf(),
        })
        .unwrap();

        let genome = read_fasta_records(&dir.path().join("genome_with_insertions.fasta")).unwrap();
        assert_eq!(genome.len(), 1);
        assert_eq!(genome[0].seq.len(), 200 + 2 * (15 + 6));

        let inserted = read_fasta_records(&dir.path().join("inserted_elements.fasta")).unwrap();
        assert_eq!(inserted.len(), 2);

        let gff3 = fs::read_to_string(dir.path().join("inserted_elements.gff3")).unwrap();
        assert!(gff3.starts_with("##gff-version 3\n"));
        assert_eq!(gff3.lines().count(), 3);
        assert!(gff3.contains("CACTA_TIR_transposon"));
    }
}
