use crate::{
    dna_sequence::DNAsequence,
    pcr::find_primer_sites,
    primer::{Primer, Strand},
};
use serde::{Deserialize, Serialize};

/// Statistics of a primer read against one unambiguous genomic context.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrimerStats {
    /// Wallace rule: 2·(A+T) + 4·(G+C), in °C.
    pub melting_temperature: f64,
    /// 0..100
    pub gc_percent: f64,
}

impl PrimerStats {
    /// Computes the statistics of a concrete base string. Codes that are
    /// not A/C/G/T (eg a stray N) contribute to neither count.
    pub fn of_concrete(sequence: &[u8]) -> Self {
        let gc = sequence
            .iter()
            .filter(|&&c| c == b'G' || c == b'C')
            .count();
        let at = sequence
            .iter()
            .filter(|&&c| c == b'A' || c == b'T')
            .count();
        Self {
            melting_temperature: (2 * at + 4 * gc) as f64,
            gc_percent: 100.0 * gc as f64 / sequence.len() as f64,
        }
    }
}

/// Melting temperature and GC content of a primer in the context of a
/// target. `None` is the "N/A" answer: the primer is empty, or its
/// degenerate codes do not resolve to a single concrete reading.
///
/// A concrete primer is its own context and is evaluated directly. A
/// degenerate primer is evaluated against the target bases at its
/// zero-mismatch sites; when every site reads the same concrete sequence
/// the ambiguity is resolved and that sequence is scored, otherwise the
/// temperature is inapplicable.
pub fn estimate(primer: &Primer, target: &DNAsequence) -> Option<PrimerStats> {
    if primer.is_empty() {
        return None;
    }
    if !primer.is_degenerate() {
        return Some(PrimerStats::of_concrete(primer.sequence()));
    }

    let minus_strand = primer.strand == Strand::Complementary;
    let sites = find_primer_sites(primer, target, 0, 0, minus_strand);
    let mut readings: Vec<Vec<u8>> = sites
        .iter()
        .filter_map(|site| target.get_range_safe(site.start..site.start + primer.len()))
        .collect();
    readings.sort();
    readings.dedup();

    match readings.as_slice() {
        [unique] => Some(PrimerStats::of_concrete(unique)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(bases: &str) -> DNAsequence {
        DNAsequence::from_sequence(bases).unwrap()
    }

    #[test]
    fn test_wallace_rule_pinned_values() {
        let stats = PrimerStats::of_concrete(b"AAAA");
        assert_eq!(stats.melting_temperature, 8.0);
        assert_eq!(stats.gc_percent, 0.0);

        let stats = PrimerStats::of_concrete(b"GGCC");
        assert_eq!(stats.melting_temperature, 16.0);
        assert_eq!(stats.gc_percent, 100.0);

        // 2·2 + 4·2
        let stats = PrimerStats::of_concrete(b"ACGT");
        assert_eq!(stats.melting_temperature, 12.0);
        assert_eq!(stats.gc_percent, 50.0);
    }

    #[test]
    fn test_concrete_primer_ignores_context() {
        let primer = Primer::direct("AAAA");
        let stats = estimate(&primer, &linear("GGGGGGGG")).unwrap();
        assert_eq!(stats.melting_temperature, 8.0);
        assert_eq!(stats.gc_percent, 0.0);
    }

    #[test]
    fn test_empty_primer_is_not_applicable() {
        assert!(estimate(&Primer::direct(""), &linear("ACGT")).is_none());
        assert!(estimate(&Primer::direct("---"), &linear("ACGT")).is_none());
    }

    #[test]
    fn test_degenerate_resolved_by_unique_site() {
        // S = C|G; the target holds only the C reading
        let primer = Primer::direct("TTCGGTS");
        let stats = estimate(&primer, &linear("AAATTCGGTCAAA")).unwrap();
        // TTCGGTC: 3 A/T, 4 G/C
        assert_eq!(stats.melting_temperature, 22.0);
    }

    #[test]
    fn test_degenerate_ambiguous_across_sites() {
        // Both readings of S occur, at different regions
        let primer = Primer::direct("TTCGGTS");
        let target = linear("AAATTCGGTCAAATTCGGTGAAA");
        assert!(estimate(&primer, &target).is_none());
    }

    #[test]
    fn test_degenerate_repeated_identical_sites_still_resolve() {
        let primer = Primer::direct("TTCGGTS");
        let target = linear("AAATTCGGTCAAATTCGGTCAAA");
        let stats = estimate(&primer, &target).unwrap();
        assert_eq!(stats.melting_temperature, 22.0);
    }

    #[test]
    fn test_degenerate_without_site_is_not_applicable() {
        let primer = Primer::direct("TTCGGTS");
        assert!(estimate(&primer, &linear("AAAAAAAAAA")).is_none());
    }

    #[test]
    fn test_x_primer_is_not_applicable() {
        // X matches no base, so no site can resolve it
        let primer = Primer::direct("ACGX");
        assert!(estimate(&primer, &linear("ACGTACGT")).is_none());
    }

    #[test]
    fn test_reverse_strand_degenerate_primer() {
        // Plus-strand site GAAACCC; reverse primer GGGTTTY (Y = C|T)
        // anneals to the minus strand and resolves against it.
        let primer = Primer::complementary("GGGTTTY");
        let stats = estimate(&primer, &linear("AAGAAACCCAA")).unwrap();
        // Site reads GAAACCC: 3 A/T, 4 G/C
        assert_eq!(stats.melting_temperature, 22.0);
    }
}
