use crate::cli::SimulateArgs;
use crate::simulate::genome::{generate_genome, GenomeSpec};
use crate::utils::Result;

pub fn simulate(args: SimulateArgs) -> Result<()> {
    let spec = GenomeSpec {
        size: args.size,
        chromosomes: args.chromosomes,
        gc_content: args.gc_content,
        chunk_size: args.chunk_size,
    };
    generate_genome(&spec, &args.out_file)?;
    log::info!(
        "Genomic sequence has been written to '{}'",
        args.out_file.display()
    );
    Ok(())
}
