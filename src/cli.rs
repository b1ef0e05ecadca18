use crate::utils::Result;
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| env!("CARGO_PKG_VERSION").to_string());

#[derive(Parser)]
#[command(name="cactascan",
          version=&**FULL_VERSION,
          about="Structure-based detection of CACTA transposable elements in genomic sequences",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}",
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
    #[clap(about = "CACTA transposable element detector")]
    Detect(DetectArgs),
    #[clap(about = "Pseudo-random genomic sequence generator")]
    Simulate(SimulateArgs),
    #[clap(about = "Insert transposable elements into a genome")]
    Insert(InsertArgs),
    #[clap(about = "Annotate element records with TIR alignment statistics")]
    TirInfo(TirInfoArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("output").args(["fasta_out", "gff3_out"]).required(true).multiple(true)))]
#[command(arg_required_else_help(true))]
pub struct DetectArgs {
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "in-file")]
    #[clap(help = "Input DNA sequence file (FASTA, optionally gzipped)")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub in_file: PathBuf,

    #[clap(short = 'f')]
    #[clap(long = "fasta-out")]
    #[clap(help = "Output FASTA file with candidate sequences")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_prefix_path)]
    pub fasta_out: Option<PathBuf>,

    #[clap(short = 'g')]
    #[clap(long = "gff3")]
    #[clap(help = "Output GFF3 file with candidate annotation")]
    #[clap(value_name = "GFF3")]
    #[arg(value_parser = check_prefix_path)]
    pub gff3_out: Option<PathBuf>,

    #[clap(long = "min-len")]
    #[clap(value_name = "MIN_LEN")]
    #[clap(help = "Minimum transposon length")]
    #[clap(default_value = "50")]
    #[arg(value_parser = validate_min_len)]
    pub min_len: usize,

    #[clap(long = "max-len")]
    #[clap(value_name = "MAX_LEN")]
    #[clap(help = "Maximum transposon length")]
    #[clap(default_value = "23018")]
    #[arg(value_parser = validate_max_len)]
    pub max_len: usize,

    #[clap(long = "tir-info")]
    #[clap(help = "Append TIR info (TIR length, mismatch count, gap count) to candidate names")]
    pub tir_info: bool,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct SimulateArgs {
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "out-file")]
    #[clap(help = "File to write FASTA formatted sequence into")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_prefix_path)]
    pub out_file: PathBuf,

    #[clap(required = true)]
    #[clap(short = 's')]
    #[clap(long = "size")]
    #[clap(help = "Size of the genomic sequence to generate (bp)")]
    #[clap(value_name = "SIZE")]
    #[arg(value_parser = validate_genome_size)]
    pub size: usize,

    #[clap(required = true)]
    #[clap(short = 'n')]
    #[clap(long = "chromosomes")]
    #[clap(help = "Number of genome chromosomes")]
    #[clap(value_name = "N")]
    #[arg(value_parser = validate_chromosome_number)]
    pub chromosomes: usize,

    #[clap(required = true)]
    #[clap(short = 'c')]
    #[clap(long = "gc-content")]
    #[clap(help = "GC content (%)")]
    #[clap(value_name = "PERC")]
    #[arg(value_parser = validate_gc_content)]
    pub gc_content: usize,

    #[clap(long = "chunk-size")]
    #[clap(help = "Write the sequence in chunks of this many bases to bound memory use")]
    #[clap(value_name = "CHUNK")]
    #[clap(default_value = "1000000")]
    #[arg(value_parser = validate_chunk_size)]
    pub chunk_size: usize,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct InsertArgs {
    #[clap(required = true)]
    #[clap(short = 'g')]
    #[clap(long = "genome")]
    #[clap(help = "FASTA file with the genome sequence to insert transposons into")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub genome: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'e')]
    #[clap(long = "elements")]
    #[clap(help = "FASTA file containing the transposon sequences")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub elements: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-dir")]
    #[clap(help = "Output directory path")]
    #[clap(value_name = "DIR")]
    #[arg(value_parser = check_dir_exists)]
    pub output_dir: PathBuf,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct TirInfoArgs {
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "in-file")]
    #[clap(help = "Input FASTA file with transposable element sequences")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub in_file: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "out-file")]
    #[clap(help = "Output FASTA file with TIR information appended to titles")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_prefix_path)]
    pub out_file: PathBuf,

    #[clap(short = 't')]
    #[clap(long = "tir-length")]
    #[clap(help = "TIR length to be aligned")]
    #[clap(value_name = "LEN")]
    #[clap(default_value = "28")]
    pub tir_len: usize,
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

fn validate_arg_bounds(s: &str, lower: usize, upper: usize) -> Result<usize> {
    let number: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid number", s))?;
    if number < lower || upper < number {
        Err(format!(
            "{} is not from interval [{}, {}]",
            number, lower, upper
        ))
    } else {
        Ok(number)
    }
}

fn validate_min_len(s: &str) -> Result<usize> {
    validate_arg_bounds(s, 50, 23018)
}

fn validate_max_len(s: &str) -> Result<usize> {
    validate_arg_bounds(s, 50, 30000)
}

fn validate_genome_size(s: &str) -> Result<usize> {
    validate_arg_bounds(s, 0, 10_000_000_000)
}

fn validate_chromosome_number(s: &str) -> Result<usize> {
    validate_arg_bounds(s, 1, 300)
}

fn validate_gc_content(s: &str) -> Result<usize> {
    validate_arg_bounds(s, 0, 100)
}

fn validate_chunk_size(s: &str) -> Result<usize> {
    validate_arg_bounds(s, 20, 100_000_000)
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_dir_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.is_dir() {
        Err(format!("Directory does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_prefix_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds_follow_the_documented_intervals() {
        assert!(validate_min_len("49").is_err());
        assert_eq!(validate_min_len("50"), Ok(50));
        assert_eq!(validate_min_len("23018"), Ok(23018));
        assert!(validate_min_len("23019").is_err());

        assert_eq!(validate_max_len("30000"), Ok(30000));
        assert!(validate_max_len("30001").is_err());
        assert!(validate_max_len("abc").is_err());
    }

    #[test]
    fn test_gc_content_is_a_percentage() {
        assert_eq!(validate_gc_content("0"), Ok(0));
        assert_eq!(validate_gc_content("100"), Ok(100));
        assert!(validate_gc_content("101").is_err());
    }
}
