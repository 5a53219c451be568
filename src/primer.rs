use crate::iupac_code::IupacCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which strand of the target a primer anneals to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strand {
    /// Forward primer, matched against the plus strand.
    Direct,
    /// Reverse primer, matched against the minus strand.
    Complementary,
}

/// An oligonucleotide over the extended DNA alphabet. The stored sequence
/// is always sanitized; raw user input never survives construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Primer {
    pub name: String,
    sequence: Vec<u8>,
    pub strand: Strand,
}

impl Primer {
    pub fn new(name: &str, raw_sequence: &str, strand: Strand) -> Self {
        Self {
            name: name.to_string(),
            sequence: IupacCode::sanitize(raw_sequence.as_bytes()),
            strand,
        }
    }

    pub fn direct(raw_sequence: &str) -> Self {
        Self::new("", raw_sequence, Strand::Direct)
    }

    pub fn complementary(raw_sequence: &str) -> Self {
        Self::new("", raw_sequence, Strand::Complementary)
    }

    #[inline(always)]
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// True when any code names more than one base, or names none (`X`).
    pub fn is_degenerate(&self) -> bool {
        self.sequence
            .iter()
            .any(|c| !IupacCode::from_letter(*c).is_concrete())
    }

    /// True when the primer contains codes beyond A/C/G/T/N. Callers show
    /// an extended-alphabet advisory for these; matching still works.
    pub fn has_non_acgtn(&self) -> bool {
        self.sequence
            .iter()
            .any(|c| !matches!(c, b'A' | b'C' | b'G' | b'T' | b'N'))
    }

    pub fn reverse_complement(&self) -> Vec<u8> {
        IupacCode::reverse_complement(&self.sequence)
    }
}

impl fmt::Display for Primer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primer_sanitizes_on_construction() {
        let primer = Primer::direct("at cg\r\nQ%1");
        assert_eq!(primer.sequence(), b"ATCG");

        let primer = Primer::direct("---");
        assert!(primer.is_empty());
    }

    #[test]
    fn test_degenerate_detection() {
        assert!(!Primer::direct("ACGT").is_degenerate());
        assert!(Primer::direct("ACGTN").is_degenerate());
        assert!(Primer::direct("TTCGGTS").is_degenerate());
        assert!(Primer::direct("ACGX").is_degenerate());
    }

    #[test]
    fn test_non_acgtn_advisory() {
        assert!(!Primer::direct("ACGTN").has_non_acgtn());
        assert!(Primer::direct("KGGCCAHACAGRATATCTSTGGTAAGCAGT").has_non_acgtn());
        assert!(Primer::complementary("NNNNNNNNNNNNNNNNNNNNNNNNNNNNNR").has_non_acgtn());
    }

    #[test]
    fn test_reverse_complement() {
        let primer = Primer::direct("ACGTMRWSYKVHDBNX");
        assert_eq!(primer.reverse_complement(), b"XNVHDBMRSWYKACGT".to_vec());
    }
}
