//! Knuth-Morris-Pratt exact matching over nucleotide sequences.

/// Longest proper prefix that is also a suffix, for each prefix of `pattern`.
pub fn prefix_table(pattern: &[u8]) -> Vec<usize> {
    let mut table = vec![0; pattern.len()];
    let mut matched = 0;

    for i in 1..pattern.len() {
        while matched > 0 && pattern[matched] != pattern[i] {
            matched = table[matched - 1];
        }
        if pattern[matched] == pattern[i] {
            matched += 1;
            table[i] = matched;
        }
    }

    table
}

/// Returns the start offset of every occurrence of `pattern` in `text`,
/// overlapping ones included, in increasing order.
pub fn find_all(pattern: &[u8], text: &[u8]) -> Vec<usize> {
    let pattern_len = pattern.len();
    let mut positions = Vec::new();

    if pattern_len == 0 {
        return positions;
    }

    let table = prefix_table(pattern);
    let mut matched = 0;

    for (i, &symbol) in text.iter().enumerate() {
        while matched > 0 && symbol != pattern[matched] {
            matched = table[matched - 1];
        }
        if symbol != pattern[matched] {
            continue;
        }
        matched += 1;
        if matched == pattern_len {
            positions.push(i + 1 - pattern_len);
            // Fall back so overlapping occurrences are still found
            matched = table[matched - 1];
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_occurrences() {
        assert_eq!(find_all(b"ACA", b"ACACACA"), vec![0, 2, 4]);
    }

    #[test]
    fn test_motif_at_both_ends() {
        assert_eq!(find_all(b"CACTA", b"CACTAGGCACTA"), vec![0, 7]);
    }

    #[test]
    fn test_no_occurrence() {
        assert!(find_all(b"TAGTG", b"AAAAAAAA").is_empty());
        assert!(find_all(b"TAGTG", b"TAG").is_empty());
    }

    #[test]
    fn test_empty_pattern_yields_nothing() {
        assert!(find_all(b"", b"ACGT").is_empty());
    }

    #[test]
    fn test_pattern_equals_text() {
        assert_eq!(find_all(b"CAGTG", b"CAGTG"), vec![0]);
    }

    #[test]
    fn test_prefix_table_periodic_pattern() {
        assert_eq!(prefix_table(b"ACACA"), vec![0, 0, 1, 2, 3]);
        assert_eq!(prefix_table(b"CACTA"), vec![0, 0, 1, 0, 0]);
    }
}
