//! Detection of CACTA transposable-element candidates from TIR structure.

pub mod candidate;
pub mod kmp;
pub mod occurrence;
pub mod pairing;

use crate::utils::{open_fasta_reader, to_seq_record, Result, SeqRecord};
use bio::io::fasta;
use crossbeam_channel::Sender;
use self::occurrence::{collect_occurrences, Orientation};
use self::pairing::match_pairs;
use std::path::Path;

/// One TIR family: the opening motif at the 5' end of an element and the
/// closing motif whose last bases terminate the element at the 3' end.
pub struct TirFamily {
    pub name: &'static str,
    pub opening: &'static [u8],
    pub closing: &'static [u8],
}

/// The two CACTA subfamilies detected per record, in output order.
pub const FAMILIES: [TirFamily; 2] = [
    TirFamily {
        name: "CACTA-TAGTG",
        opening: b"CACTA",
        closing: b"TAGTG",
    },
    TirFamily {
        name: "CACTG-CAGTG",
        opening: b"CACTG",
        closing: b"CAGTG",
    },
];

#[derive(Debug, Clone, Copy)]
pub struct DetectParams {
    pub min_len: usize,
    pub max_len: usize,
}

impl DetectParams {
    pub fn new(min_len: usize, max_len: usize) -> Result<Self> {
        if min_len > max_len {
            return Err(format!(
                "Minimum element length ({}) exceeds maximum element length ({})",
                min_len, max_len
            ));
        }
        Ok(DetectParams { min_len, max_len })
    }
}

/// Runs the occurrence collector and pair matcher for every TIR family over
/// one record. Returns one pair list per entry of [`FAMILIES`], each sorted
/// by opening position.
pub fn detect_record(seq: &[u8], params: &DetectParams) -> Vec<Vec<(usize, usize)>> {
    FAMILIES
        .iter()
        .map(|family| {
            log::debug!(
                "Getting opening {} TIRs",
                String::from_utf8_lossy(family.opening)
            );
            let opens = collect_occurrences(family.opening, seq, Orientation::Opening);
            log::debug!(
                "Getting closing {} TIRs",
                String::from_utf8_lossy(family.closing)
            );
            let closes = collect_occurrences(family.closing, seq, Orientation::Closing);
            match_pairs(&opens, &closes, params.min_len, params.max_len)
        })
        .collect()
}

/// Parses records from a FASTA file (plain or gzipped) and streams them,
/// tagged with their 1-based sequence index, to the detection workers.
pub fn stream_records_into_channel(path: &Path, sender: Sender<(usize, SeqRecord)>) -> Result<()> {
    let reader = fasta::Reader::new(open_fasta_reader(path)?);
    for (index, rec) in reader.records().enumerate() {
        let rec = rec.map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
        let record = to_seq_record(&rec)?;
        sender
            .send((index + 1, record))
            .map_err(|e| format!("Failed to send record to workers: {}", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::candidate::assemble_candidates;
    use super::*;

    /// An element with a 3-bp TSD on both sides, an opening CACTA TIR and a
    /// closing TAGTG TIR whose flanking remainders are reverse complements.
    fn planted_genome() -> String {
        let mut seq = String::from("GGACACTAACGTT");
        seq.push_str(&"C".repeat(35));
        seq.push_str("AACGTTAGTGGGA");
        seq
    }

    #[test]
    fn test_detects_planted_element() {
        let seq = planted_genome();
        let params = DetectParams::new(50, 100).unwrap();
        let pairs = detect_record(seq.as_bytes(), &params);
        assert_eq!(pairs, vec![vec![(3, 53)], vec![]]);
    }

    #[test]
    fn test_length_window_excludes_planted_element() {
        let seq = planted_genome();
        let params = DetectParams::new(60, 100).unwrap();
        let pairs = detect_record(seq.as_bytes(), &params);
        assert_eq!(pairs, vec![vec![], vec![]]);
    }

    #[test]
    fn test_mismatched_tsd_is_not_paired() {
        // Same element but the downstream TSD differs from the upstream one
        let seq = planted_genome().replace("TAGTGGGA", "TAGTGGTA");
        let params = DetectParams::new(50, 100).unwrap();
        let pairs = detect_record(seq.as_bytes(), &params);
        assert_eq!(pairs, vec![vec![], vec![]]);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let seq = planted_genome();
        let record = SeqRecord::new("chr1", seq.clone());
        let params = DetectParams::new(50, 100).unwrap();

        let run = || {
            let mut next_id = 1;
            let mut candidates = Vec::new();
            for pairs in detect_record(seq.as_bytes(), &params) {
                candidates.extend(assemble_candidates(&record, &pairs, 1, &mut next_id));
            }
            candidates
        };

        let first = run();
        let second = run();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].title, "chr1_CACTA1");
        assert_eq!(first[0].seq, &seq[3..58]);
    }

    #[test]
    fn test_invalid_length_window_is_fatal() {
        assert!(DetectParams::new(100, 50).is_err());
        assert!(DetectParams::new(50, 50).is_ok());
    }
}
