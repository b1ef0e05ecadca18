use super::{open_fasta_reader, Result};
use bio::io::fasta;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One case-normalized sequence record: full FASTA header plus uppercase sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SeqRecord {
    pub title: String,
    pub seq: String,
}

impl SeqRecord {
    pub fn new(title: impl Into<String>, seq: impl Into<String>) -> Self {
        SeqRecord {
            title: title.into(),
            seq: seq.into(),
        }
    }
}

pub fn to_seq_record(rec: &fasta::Record) -> Result<SeqRecord> {
    let title = match rec.desc() {
        Some(desc) => format!("{} {}", rec.id(), desc),
        None => rec.id().to_string(),
    };
    let seq = String::from_utf8(rec.seq().to_ascii_uppercase())
        .map_err(|e| format!("Record '{}' contains non-UTF-8 bytes: {}", rec.id(), e))?;
    Ok(SeqRecord { title, seq })
}

pub fn read_fasta_records(path: &Path) -> Result<Vec<SeqRecord>> {
    let reader = fasta::Reader::new(open_fasta_reader(path)?);
    let mut records = Vec::new();
    for rec in reader.records() {
        let rec = rec.map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
        records.push(to_seq_record(&rec)?);
    }
    Ok(records)
}

pub fn write_fasta_records<'a, I>(path: &Path, records: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let file = File::create(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let mut handle = BufWriter::new(file);
    for (title, seq) in records {
        writeln!(handle, ">{}\n{}", title, seq)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    }
    Ok(())
}
