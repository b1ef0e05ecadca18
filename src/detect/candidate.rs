//! Turns confirmed TIR pairs into candidate element records.

use super::occurrence::TIR_MOTIF_LEN;
use crate::utils::SeqRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub title: String,
    pub seq: String,
    pub start: usize,
    pub end: usize,
    pub seq_id: usize,
}

/// Fixed family tag used in candidate titles; both motif families are
/// subfamilies of the CACTA superfamily.
const FAMILY_TAG: &str = "CACTA";

/// Slices one candidate per confirmed pair out of `record`, spanning from the
/// opening motif start to the end of the closing motif. `next_id` is the
/// run-scoped candidate counter: it is owned by the caller, advanced once per
/// candidate and never reused, so identifiers are strictly increasing across
/// the whole run.
pub fn assemble_candidates(
    record: &SeqRecord,
    pairs: &[(usize, usize)],
    seq_id: usize,
    next_id: &mut u64,
) -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(pairs.len());

    for &(opening, closing) in pairs {
        let end = closing + TIR_MOTIF_LEN;
        candidates.push(Candidate {
            title: format!("{}_{}{}", record.title, FAMILY_TAG, next_id),
            seq: record.seq[opening..end].to_string(),
            start: opening,
            end,
            seq_id,
        });
        *next_id += 1;
    }

    candidates
}
