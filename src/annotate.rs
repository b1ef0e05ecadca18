//! TIR annotation: locally aligns the two ends of a candidate element and
//! embeds the aligned-TIR length and mismatch/gap counts in its title. The
//! detection core treats this as a plain `(title, sequence)` transform.

use bio::alignment::pairwise::Aligner;
use bio::alignment::AlignmentOperation;
use bio::alphabets::dna;

/// Number of bases aligned from each end of the element.
pub const DEFAULT_TIR_LEN: usize = 28;

#[derive(Debug, Clone, Copy)]
pub struct AlnScoring {
    pub match_scr: i32,
    pub mism_scr: i32,
    pub gapo_scr: i32,
    pub gape_scr: i32,
}

pub const DEFAULT_SCORING: AlnScoring = AlnScoring {
    match_scr: 2,
    mism_scr: -3,
    gapo_scr: -5,
    gape_scr: -2,
};

/// Aligns the first `tir_len` bases of `seq` against the reverse complement
/// of its last `tir_len` bases and returns the title with an appended
/// `_{len}bpTIR(m=.., g=..)` suffix, where `len` counts all aligned columns.
pub fn extract_tir_info(title: &str, seq: &str, tir_len: usize, scoring: &AlnScoring) -> String {
    let seq = seq.as_bytes();
    let len = tir_len.min(seq.len());
    let head = &seq[..len];
    let tail_rc = dna::revcomp(&seq[seq.len() - len..]);

    let (match_scr, mism_scr) = (scoring.match_scr, scoring.mism_scr);
    let score = |a: u8, b: u8| if a == b { match_scr } else { mism_scr };
    let mut aligner =
        Aligner::with_capacity(head.len(), tail_rc.len(), scoring.gapo_scr, scoring.gape_scr, score);
    let alignment = aligner.local(head, &tail_rc);

    let mut identities = 0;
    let mut mismatches = 0;
    let mut gaps = 0;
    for op in &alignment.operations {
        match op {
            AlignmentOperation::Match => identities += 1,
            AlignmentOperation::Subst => mismatches += 1,
            AlignmentOperation::Ins | AlignmentOperation::Del => gaps += 1,
            _ => {}
        }
    }

    format!(
        "{}_{}bpTIR(m={}, g={})",
        title,
        identities + mismatches + gaps,
        mismatches,
        gaps
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_inverted_repeat() {
        // 28-bp TIR, then filler, then its reverse complement
        let tir = "ACGGTACCGTTAGCAATCGGATCCAGTC";
        let tir_rc = String::from_utf8(dna::revcomp(tir.as_bytes())).unwrap();
        let seq = format!("{}{}{}", tir, "A".repeat(40), tir_rc);

        let title = extract_tir_info("elem1", &seq, DEFAULT_TIR_LEN, &DEFAULT_SCORING);
        assert_eq!(title, "elem1_28bpTIR(m=0, g=0)");
    }

    #[test]
    fn test_single_mismatch_is_counted() {
        let tir = "ACGGTACCGTTAGCAATCGGATCCAGTC";
        let mut tail = String::from_utf8(dna::revcomp(tir.as_bytes())).unwrap();
        // One substitution in the middle of the tail TIR
        tail.replace_range(14..15, if &tail[14..15] == "A" { "C" } else { "A" });
        let seq = format!("{}{}{}", tir, "G".repeat(40), tail);

        let title = extract_tir_info("elem2", &seq, DEFAULT_TIR_LEN, &DEFAULT_SCORING);
        assert_eq!(title, "elem2_28bpTIR(m=1, g=0)");
    }

    #[test]
    fn test_sequence_shorter_than_tir_window() {
        let seq = "ACGT";
        let title = extract_tir_info("short", seq, DEFAULT_TIR_LEN, &DEFAULT_SCORING);
        assert!(title.starts_with("short_"));
        assert!(title.contains("bpTIR"));
    }
}
