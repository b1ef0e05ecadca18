//! Pairs opening and closing TIR occurrences under a length window.

use super::occurrence::Occurrence;

/// Offset between the motif-start conventions of the two spacing bounds:
/// element length is measured from the opening motif start to the end of the
/// closing motif minus one, and the closing motif is 5 bp long.
const SPACING_OFFSET: usize = 4;

/// Returns every `(opening position, closing position)` pair with equal
/// flank hashes whose spacing falls inside `[min_len, max_len]`.
///
/// Both occurrence lists must be sorted ascending by position (the collector
/// guarantees this). A single cursor into `closes` is shared across all
/// openings and only ever advances: once a closing occurrence falls below the
/// lower spacing bound for some opening, it falls below it for every later
/// opening as well. The scan for one opening stops at the first closing
/// occurrence past the upper bound. Total work is O(|opens| + |closes|).
pub fn match_pairs(
    opens: &[Occurrence],
    closes: &[Occurrence],
    min_len: usize,
    max_len: usize,
) -> Vec<(usize, usize)> {
    debug_assert!(opens.windows(2).all(|w| w[0].pos <= w[1].pos));
    debug_assert!(closes.windows(2).all(|w| w[0].pos <= w[1].pos));

    let mut smallest_relevant = 0;
    let mut pairs = Vec::new();

    for open in opens {
        for (i, close) in closes.iter().enumerate().skip(smallest_relevant) {
            if open.pos + max_len < close.pos {
                break;
            }
            if close.pos + SPACING_OFFSET < open.pos + min_len {
                smallest_relevant = i + 1;
                continue;
            }
            if open.hash == close.hash {
                pairs.push((open.pos, close.pos));
            }
        }
    }

    pairs
}
