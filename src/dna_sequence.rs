use crate::iupac_code::IupacCode;
use anyhow::Result;
use bio::io::fasta;
use gb_io::seq::{Seq, Topology};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fs::File,
    ops::{Range, RangeInclusive},
};

type DNAstring = Vec<u8>;

/// A PCR target: concrete bases (A/C/G/T, possibly with stray N) plus a
/// circularity flag, backed by a GenBank `Seq` so name and topology travel
/// with the bases.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DNAsequence {
    seq: Seq,
}

impl DNAsequence {
    pub fn from_sequence(sequence: &str) -> Result<DNAsequence> {
        Ok(DNAsequence::from_u8(sequence.as_bytes()))
    }

    pub fn from_fasta_file(filename: &str) -> Result<Vec<DNAsequence>> {
        let file = File::open(filename)?;
        Ok(fasta::Reader::new(file)
            .records()
            .filter_map(|record| record.ok())
            .map(|record| DNAsequence::from_fasta_record(&record))
            .collect())
    }

    pub fn from_genbank_file(filename: &str) -> Result<Vec<DNAsequence>> {
        Ok(gb_io::reader::parse_file(filename)?
            .into_iter()
            .map(DNAsequence::from_genbank_seq)
            .collect())
    }

    pub fn from_genbank_seq(seq: Seq) -> Self {
        Self { seq }
    }

    pub fn from_fasta_record(record: &bio::io::fasta::Record) -> Self {
        let mut ret = Self::from_u8(record.seq());
        ret.seq.name = Some(record.id().to_string());
        if let Some(desc) = record.desc() {
            ret.seq.comments.push(desc.to_string())
        }
        ret
    }

    fn from_u8(s: &[u8]) -> Self {
        let bases = Self::validate_dna_sequence(s);
        let seq = Seq {
            name: None,
            topology: Topology::Linear,
            date: None,
            len: Some(bases.len()),
            molecule_type: None,
            division: String::new(),
            definition: None,
            accession: None,
            version: None,
            source: None,
            dblink: None,
            keywords: None,
            references: vec![],
            comments: vec![],
            seq: bases,
            contig: None,
            features: vec![],
        };
        Self { seq }
    }

    /// Raw user input cleanup: whitespace and non-alphabet characters are
    /// dropped, letters upper-cased. Same policy as primer sanitization.
    pub fn validate_dna_sequence(v: &[u8]) -> DNAstring {
        IupacCode::sanitize(v)
    }

    #[inline(always)]
    pub fn forward(&self) -> &Vec<u8> {
        &self.seq.seq
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.forward().len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward().is_empty()
    }

    pub fn name(&self) -> &Option<String> {
        &self.seq.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.seq.name = Some(name.to_string());
    }

    pub fn get_forward_string(&self) -> String {
        String::from_utf8_lossy(self.forward()).to_string()
    }

    pub fn is_circular(&self) -> bool {
        self.seq.topology == Topology::Circular
    }

    pub fn set_circular(&mut self, is_circular: bool) {
        self.seq.topology = match is_circular {
            true => Topology::Circular,
            false => Topology::Linear,
        };
    }

    #[inline(always)]
    pub fn get_base_safe(&self, i: usize) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let i = if self.is_circular() {
            i % self.len()
        } else {
            i
        };
        self.forward().get(i).copied()
    }

    pub fn get_inclusive_range_safe(&self, range: RangeInclusive<usize>) -> Option<DNAstring> {
        let start = *range.start();
        let end = *range.end() + 1;
        self.get_range_safe(start..end)
    }

    /// Returns the bases in `range`, wrapping past the origin for circular
    /// sequences. `None` when the range runs off a linear sequence.
    pub fn get_range_safe(&self, range: Range<usize>) -> Option<DNAstring> {
        let Range { start, end } = range;
        if start >= end || self.is_empty() {
            return None;
        }
        let start = if self.is_circular() {
            start % self.len()
        } else {
            start
        };
        let end = if self.is_circular() {
            (end - 1) % self.len()
        } else {
            end - 1
        };
        if start >= self.len() || end >= self.len() {
            return None;
        }
        if start > end {
            if self.is_circular() {
                Some(
                    self.forward()[start..]
                        .iter()
                        .chain(self.forward()[..=end].iter())
                        .copied()
                        .collect(),
                )
            } else {
                None
            }
        } else {
            Some(self.forward()[start..=end].to_vec())
        }
    }
}

impl fmt::Display for DNAsequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.forward()))
    }
}

impl From<String> for DNAsequence {
    fn from(s: String) -> Self {
        DNAsequence::from_u8(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sequence_sanitizes() {
        let dna = DNAsequence::from_sequence("ac\r\ngt q%1").unwrap();
        assert_eq!(dna.get_forward_string(), "ACGT");
    }

    #[test]
    fn test_get_base_safe() {
        let mut dna = DNAsequence::from("ATGC".to_string());

        // linear
        dna.set_circular(false);
        assert_eq!(dna.get_base_safe(0), Some(b'A'));
        assert_eq!(dna.get_base_safe(3), Some(b'C'));
        assert_eq!(dna.get_base_safe(4), None);

        // circular
        dna.set_circular(true);
        assert_eq!(dna.get_base_safe(4), Some(b'A'));
    }

    #[test]
    fn test_get_range_safe() {
        let mut dna = DNAsequence::from("ATGC".to_string());

        // linear
        dna.set_circular(false);
        assert_eq!(dna.get_range_safe(0..4), Some(b"ATGC".to_vec()));
        assert_eq!(dna.get_range_safe(0..5), None);

        // circular
        dna.set_circular(true);
        assert_eq!(dna.get_range_safe(0..4), Some(b"ATGC".to_vec()));
        assert_eq!(dna.get_range_safe(4..8), Some(b"ATGC".to_vec()));
        assert_eq!(dna.get_range_safe(1..5), Some(b"TGCA".to_vec())); // Wraps around 0 point
    }

    #[test]
    fn test_get_inclusive_range_safe() {
        let mut dna = DNAsequence::from("ATGC".to_string());
        dna.set_circular(true);
        assert_eq!(dna.get_inclusive_range_safe(0..=3), Some(b"ATGC".to_vec()));
        assert_eq!(dna.get_inclusive_range_safe(1..=4), Some(b"TGCA".to_vec()));
    }
}
