//! Pseudo-random genome generation for building detection test sets.

use crate::utils::Result;
use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const NUCLEOTIDES: [u8; 4] = *b"ACGT";

#[derive(Debug, Clone, Copy)]
pub struct GenomeSpec {
    /// Overall genome size in bp; rounded down to a multiple of `chromosomes`.
    pub size: usize,
    pub chromosomes: usize,
    /// GC content in percent.
    pub gc_content: usize,
    /// Bases written per chunk, bounding memory use.
    pub chunk_size: usize,
}

fn human_size(size: usize) -> String {
    if size < 1_000_000 {
        format!("{}bp", size)
    } else if size < 1_000_000_000 {
        format!("{:.2}Mb", size as f64 / 1e6)
    } else {
        format!("{:.2}Gb", size as f64 / 1e9)
    }
}

pub fn generate_genome(spec: &GenomeSpec, out_file: &Path) -> Result<()> {
    generate_genome_with_rng(spec, out_file, &mut rand::rng())
}

pub fn generate_genome_with_rng<R: Rng>(
    spec: &GenomeSpec,
    out_file: &Path,
    rng: &mut R,
) -> Result<()> {
    if spec.chromosomes == 0 {
        return Err("Number of chromosomes must be at least 1".to_string());
    }
    if spec.chunk_size == 0 {
        return Err("Chunk size must be at least 1".to_string());
    }

    let at_content = 100usize
        .checked_sub(spec.gc_content)
        .ok_or_else(|| format!("GC content must be at most 100, got {}", spec.gc_content))?;
    // A, C, G, T weights; the AT/GC halves share theirs equally
    let dist = WeightedIndex::new([at_content, spec.gc_content, spec.gc_content, at_content])
        .map_err(|e| format!("Invalid GC content {}: {}", spec.gc_content, e))?;

    let chromosome_size = spec.size / spec.chromosomes;
    let size = chromosome_size * spec.chromosomes;
    log::info!(
        "Generating {} genomic sequence within {} chromosomes and {}% GC content",
        human_size(size),
        spec.chromosomes,
        spec.gc_content
    );

    let file = File::create(out_file).map_err(|e| format!("{}: {}", out_file.display(), e))?;
    let mut handle = BufWriter::new(file);
    let io_err = |e: std::io::Error| format!("Failed to write {}: {}", out_file.display(), e);

    for i in 1..=spec.chromosomes {
        log::debug!(
            "Generating chromosome {} of {} ({}bp)",
            i,
            spec.chromosomes,
            chromosome_size
        );
        writeln!(
            handle,
            ">randomGenome_{}_{}GC_ch{}",
            human_size(size),
            spec.gc_content,
            i
        )
        .map_err(io_err)?;

        let mut remaining = chromosome_size;
        while remaining > 0 {
            let chunk = remaining.min(spec.chunk_size);
            let bases: Vec<u8> = (0..chunk).map(|_| NUCLEOTIDES[dist.sample(rng)]).collect();
            handle.write_all(&bases).map_err(io_err)?;
            remaining -= chunk;
        }
        writeln!(handle).map_err(io_err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::read_fasta_records;
    use tempfile::TempDir;

    #[test]
    fn test_generates_expected_chromosome_sizes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("genome.fasta");
        let spec = GenomeSpec {
            size: 1003, // rounds down to 1000
            chromosomes: 4,
            gc_content: 40,
            chunk_size: 64,
        };
        let mut rng = StdRng::seed_from_u64(7);
        generate_genome_with_rng(&spec, &path, &mut rng).unwrap();

        let records = read_fasta_records(&path).unwrap();
        assert_eq!(records.len(), 4);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.title, format!("randomGenome_1000bp_40GC_ch{}", i + 1));
            assert_eq!(record.seq.len(), 250);
            assert!(record.seq.bytes().all(|b| NUCLEOTIDES.contains(&b)));
        }
    }

    #[test]
    fn test_zero_gc_content_yields_at_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("genome.fasta");
        let spec = GenomeSpec {
            size: 200,
            chromosomes: 1,
            gc_content: 0,
            chunk_size: 50,
        };
        let mut rng = StdRng::seed_from_u64(7);
        generate_genome_with_rng(&spec, &path, &mut rng).unwrap();

        let records = read_fasta_records(&path).unwrap();
        assert!(records[0].seq.bytes().all(|b| b == b'A' || b == b'T'));
    }

    #[test]
    fn test_zero_chromosomes_is_an_error() {
        let dir = TempDir::new().unwrap();
        let spec = GenomeSpec {
            size: 100,
            chromosomes: 0,
            gc_content: 50,
            chunk_size: 50,
        };
        assert!(generate_genome(&spec, &dir.path().join("genome.fasta")).is_err());
    }
}
