mod io_utils;
mod readers;
mod util;

pub use io_utils::{read_fasta_records, to_seq_record, write_fasta_records, SeqRecord};
pub use readers::open_fasta_reader;
pub use util::{handle_error_and_exit, Result};
