//! Inserts transposable elements into a genome, flanking each copy with a
//! random target site duplication, to build ground-truth detection inputs.

use crate::utils::SeqRecord;
use rand::prelude::*;
use std::collections::HashMap;

const NUCLEOTIDES: [u8; 4] = *b"ACGT";
const TSD_LEN: usize = 3;
/// Copies inserted per element.
pub const COPIES_PER_ELEMENT: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct InsertedSpan {
    pub title: String,
    /// Element start in the final genome, TSD excluded.
    pub start: usize,
    pub end: usize,
}

pub struct InsertionOutcome {
    /// Spans of inserted elements per chromosome index, in insertion order.
    pub positions: HashMap<usize, Vec<InsertedSpan>>,
    /// Insertions that landed inside a previously inserted element.
    pub nested_count: usize,
}

/// Splices `tsd + element + tsd` into the chromosome at `insert_position`,
/// shifts previously recorded spans displaced by the insertion and records
/// the new element span. Returns the number of spans the insertion nested
/// into (their interval grows instead of shifting).
fn apply_insertion(
    chromosome_seq: &mut String,
    spans: &mut Vec<InsertedSpan>,
    insert_position: usize,
    tsd: &str,
    element_seq: &str,
    title: String,
) -> usize {
    let element_start = insert_position + tsd.len();
    let element_end = element_start + element_seq.len();
    let insertion_len = element_seq.len() + 2 * tsd.len();

    let mut with_insertion = String::with_capacity(chromosome_seq.len() + insertion_len);
    with_insertion.push_str(&chromosome_seq[..insert_position]);
    with_insertion.push_str(tsd);
    with_insertion.push_str(element_seq);
    with_insertion.push_str(tsd);
    with_insertion.push_str(&chromosome_seq[insert_position..]);
    *chromosome_seq = with_insertion;

    let mut nested = 0;
    for span in spans.iter_mut() {
        if span.end <= insert_position {
            // Upstream, unaffected
        } else if insert_position <= span.start {
            span.start += insertion_len;
            span.end += insertion_len;
        } else {
            span.end += insertion_len;
            nested += 1;
        }
    }

    spans.push(InsertedSpan {
        title,
        start: element_start,
        end: element_end,
    });

    nested
}

pub fn insert_elements<R: Rng>(
    genome: &mut [SeqRecord],
    elements: &[SeqRecord],
    rng: &mut R,
) -> InsertionOutcome {
    assert!(!genome.is_empty(), "Genome must contain at least one sequence");

    let mut nested_count = 0;
    let mut positions: HashMap<usize, Vec<InsertedSpan>> =
        (0..genome.len()).map(|i| (i, Vec::new())).collect();

    for element in elements {
        for copy in 1..=COPIES_PER_ELEMENT {
            let chromosome = rng.random_range(0..genome.len());
            let chromosome_seq = &mut genome[chromosome].seq;
            let insert_position = rng.random_range(0..chromosome_seq.len().max(1));
            let tsd: String = (0..TSD_LEN)
                .map(|_| NUCLEOTIDES[rng.random_range(0..NUCLEOTIDES.len())] as char)
                .collect();

            let spans = positions.get_mut(&chromosome).expect("chromosome indexed above");
            nested_count += apply_insertion(
                chromosome_seq,
                spans,
                insert_position,
                &tsd,
                &element.seq,
                format!("{}_{}_ch{}", element.title, copy, chromosome + 1),
            );
        }
    }

    InsertionOutcome {
        positions,
        nested_count,
    }
}
