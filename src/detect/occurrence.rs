//! Collects validated TIR occurrences: every exact motif match that has
//! complete flanking context and an ACGT-only remainder/TSD window, together
//! with a strand-canonical hash of those flanks.

use super::kmp;
use bio::alphabets::dna;

/// All flank-window arithmetic below is derived from this motif length.
/// Making motif lengths configurable would require re-deriving the offsets,
/// not just changing this constant.
pub const TIR_MOTIF_LEN: usize = 5;

/// Bases of the element interior hashed next to each motif.
const REMAINDER_LEN: usize = 5;
/// Target site duplication length.
const TSD_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// 5'-side TIR; remainder lies downstream of the motif, TSD upstream.
    Opening,
    /// 3'-side TIR; remainder lies upstream of the motif, TSD downstream.
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub pos: usize,
    pub hash: u64,
}

fn base_code(base: u8) -> Option<u64> {
    match base {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Encodes a TIR remainder and its TSD as one base-4 numeral so that matching
/// opening/closing occurrences compare equal instead of base-by-base against
/// a reverse complement. The closing remainder is reverse complemented before
/// encoding; the TSD is duplicated verbatim by the insertion mechanism and is
/// hashed as-is for both orientations. Returns `None` if any symbol falls
/// outside ACGT.
///
/// `tir_tsd_hash(b"CACTA", b"ATT", Closing) == tir_tsd_hash(b"TAGTG", b"ATT", Opening)`
pub fn tir_tsd_hash(remainder: &[u8], tsd: &[u8], orientation: Orientation) -> Option<u64> {
    if !remainder
        .iter()
        .chain(tsd)
        .all(|b| matches!(b, b'A' | b'C' | b'G' | b'T'))
    {
        return None;
    }

    let canonical = match orientation {
        Orientation::Opening => remainder.to_vec(),
        Orientation::Closing => dna::revcomp(remainder),
    };

    let mut hash = 0u64;
    let mut exponent = 0u32;
    for &base in canonical.iter().chain(tsd) {
        hash += base_code(base)? * 4u64.pow(exponent);
        exponent += 1;
    }

    Some(hash)
}

/// True if the occurrence is far enough from both sequence ends for the
/// remainder and TSD windows to be sliced without running out of range.
pub fn has_flank_context(pos: usize, seq_len: usize, orientation: Orientation) -> bool {
    match orientation {
        Orientation::Opening => pos >= TSD_LEN && seq_len >= pos + TIR_MOTIF_LEN + REMAINDER_LEN,
        Orientation::Closing => pos >= REMAINDER_LEN && seq_len >= pos + TIR_MOTIF_LEN + TSD_LEN,
    }
}

fn flank_windows(seq: &[u8], pos: usize, orientation: Orientation) -> (&[u8], &[u8]) {
    match orientation {
        Orientation::Opening => (
            &seq[pos + TIR_MOTIF_LEN..pos + TIR_MOTIF_LEN + REMAINDER_LEN],
            &seq[pos - TSD_LEN..pos],
        ),
        Orientation::Closing => (
            &seq[pos - REMAINDER_LEN..pos],
            &seq[pos + TIR_MOTIF_LEN..pos + TIR_MOTIF_LEN + TSD_LEN],
        ),
    }
}

/// Finds every occurrence of `motif` in `seq` and keeps those with complete,
/// ACGT-only flanking context. Positions are emitted in strictly increasing
/// order, which the pair matcher depends on.
pub fn collect_occurrences(motif: &[u8], seq: &[u8], orientation: Orientation) -> Vec<Occurrence> {
    debug_assert_eq!(motif.len(), TIR_MOTIF_LEN);

    kmp::find_all(motif, seq)
        .into_iter()
        .filter_map(|pos| {
            if !has_flank_context(pos, seq.len(), orientation) {
                return None;
            }
            let (remainder, tsd) = flank_windows(seq, pos, orientation);
            tir_tsd_hash(remainder, tsd, orientation).map(|hash| Occurrence { pos, hash })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::Orientation::{Closing, Opening};
    use super::*;

    #[test]
    fn test_hash_canonicalizes_strands() {
        assert_eq!(tir_tsd_hash(b"AAAAA", b"CCC", Opening), Some(21504));
        assert_eq!(tir_tsd_hash(b"TTTTT", b"CCC", Closing), Some(21504));
        assert_eq!(
            tir_tsd_hash(b"CACTA", b"ATT", Closing),
            tir_tsd_hash(b"TAGTG", b"ATT", Opening)
        );
    }

    #[test]
    fn test_hash_tsd_is_not_complemented() {
        assert_ne!(
            tir_tsd_hash(b"AAAAA", b"CCC", Opening),
            tir_tsd_hash(b"TTTTT", b"GGG", Closing)
        );
    }

    #[test]
    fn test_hash_rejects_ambiguity_codes() {
        assert_eq!(tir_tsd_hash(b"AANAA", b"CCC", Opening), None);
        assert_eq!(tir_tsd_hash(b"AAAAA", b"CNC", Closing), None);
    }

    #[test]
    fn test_boundary_rejection_near_sequence_ends() {
        // Opening TIRs need 3 bases upstream and 5 remainder bases past the motif
        assert!(!has_flank_context(2, 100, Opening));
        assert!(has_flank_context(3, 13, Opening));
        assert!(!has_flank_context(3, 12, Opening));

        // Closing TIRs need 5 bases upstream and 3 TSD bases past the motif
        assert!(!has_flank_context(4, 100, Closing));
        assert!(has_flank_context(5, 13, Closing));
        assert!(!has_flank_context(93, 100, Closing)); // seq_len - 7
        assert!(has_flank_context(92, 100, Closing));
    }

    #[test]
    fn test_collect_opening_occurrence_with_flanks() {
        // TSD "GGA", motif "CACTA" at 3, remainder "ACGTT"
        let seq = b"GGACACTAACGTT";
        let occurrences = collect_occurrences(b"CACTA", seq, Opening);
        assert_eq!(
            occurrences,
            vec![Occurrence {
                pos: 3,
                hash: tir_tsd_hash(b"ACGTT", b"GGA", Opening).unwrap(),
            }]
        );
    }

    #[test]
    fn test_collect_drops_occurrence_with_ambiguous_flank() {
        let seq = b"GGACACTAACGNT";
        assert!(collect_occurrences(b"CACTA", seq, Opening).is_empty());
    }

    #[test]
    fn test_collect_drops_occurrence_without_context() {
        // Motif starts at 0: no upstream TSD window
        assert!(collect_occurrences(b"CACTA", b"CACTAACGTTAAA", Opening).is_empty());
    }

    #[test]
    fn test_collect_positions_strictly_increase() {
        let seq = "GGACACTAACGTTGGCACTATTTTTAAA".as_bytes();
        let occurrences = collect_occurrences(b"CACTA", seq, Opening);
        assert!(occurrences.windows(2).all(|w| w[0].pos < w[1].pos));
        assert_eq!(occurrences.len(), 2);
    }
}
