const DNA_BITMASK_A: u8 = 1;
const DNA_BITMASK_C: u8 = 2;
const DNA_BITMASK_G: u8 = 4;
const DNA_BITMASK_T: u8 = 8;
const DNA_BITMASK_N: u8 = DNA_BITMASK_A | DNA_BITMASK_C | DNA_BITMASK_G | DNA_BITMASK_T;

/// The extended DNA alphabet, in canonical order. `X` is the placeholder
/// produced by reverse-complementing `N` and represents no base at all.
pub const EXTENDED_DNA_ALPHABET: &[u8; 16] = b"ACGTMRWSYKVHDBNX";

/// A bitmasked IUPAC code for DNA bases, eg DNA_BITMASK_A|DNA_BITMASK_C
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct IupacCode(u8);

impl IupacCode {
    pub fn new(bitmask: u8) -> Self {
        Self(bitmask)
    }

    #[inline(always)]
    pub fn from_letter(letter: u8) -> Self {
        match letter.to_ascii_uppercase() {
            b'A' => Self(DNA_BITMASK_A),
            b'C' => Self(DNA_BITMASK_C),
            b'G' => Self(DNA_BITMASK_G),
            b'T' => Self(DNA_BITMASK_T),
            b'M' => Self(DNA_BITMASK_A | DNA_BITMASK_C),
            b'R' => Self(DNA_BITMASK_A | DNA_BITMASK_G),
            b'W' => Self(DNA_BITMASK_A | DNA_BITMASK_T),
            b'S' => Self(DNA_BITMASK_C | DNA_BITMASK_G),
            b'Y' => Self(DNA_BITMASK_C | DNA_BITMASK_T),
            b'K' => Self(DNA_BITMASK_G | DNA_BITMASK_T),
            b'V' => Self(DNA_BITMASK_A | DNA_BITMASK_C | DNA_BITMASK_G),
            b'H' => Self(DNA_BITMASK_A | DNA_BITMASK_C | DNA_BITMASK_T),
            b'D' => Self(DNA_BITMASK_A | DNA_BITMASK_G | DNA_BITMASK_T),
            b'B' => Self(DNA_BITMASK_C | DNA_BITMASK_G | DNA_BITMASK_T),
            b'N' => Self(DNA_BITMASK_N),
            _ => Self(0), // includes 'X'
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True for codes that name exactly one concrete base.
    #[inline(always)]
    pub fn is_concrete(&self) -> bool {
        self.0.count_ones() == 1
    }

    #[inline(always)]
    pub fn subset(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline(always)]
    pub fn is_valid_letter(letter: u8) -> bool {
        EXTENDED_DNA_ALPHABET.contains(&letter.to_ascii_uppercase())
    }

    #[inline(always)]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut ret = Vec::with_capacity(4);
        if self.0 & DNA_BITMASK_A != 0 {
            ret.push(b'A');
        }
        if self.0 & DNA_BITMASK_C != 0 {
            ret.push(b'C');
        }
        if self.0 & DNA_BITMASK_G != 0 {
            ret.push(b'G');
        }
        if self.0 & DNA_BITMASK_T != 0 {
            ret.push(b'T');
        }
        ret
    }

    /// Complement over the extended alphabet. The table is symmetric
    /// (A↔T, C↔G, M↔K, R↔Y, W↔W, S↔S, V↔B, H↔D; N and X are their own
    /// complements), so applying it twice returns the original letter.
    #[inline(always)]
    pub fn letter_complement(letter: u8) -> u8 {
        match letter.to_ascii_uppercase() {
            b'A' => b'T',
            b'T' => b'A',
            b'C' => b'G',
            b'G' => b'C',
            b'M' => b'K',
            b'K' => b'M',
            b'R' => b'Y',
            b'Y' => b'R',
            b'W' => b'W',
            b'S' => b'S',
            b'V' => b'B',
            b'B' => b'V',
            b'H' => b'D',
            b'D' => b'H',
            b'N' => b'N',
            b'X' => b'X',
            other => other,
        }
    }

    /// Reverses the sequence and complements every symbol. Callers are
    /// expected to sanitize first; unknown letters pass through unchanged.
    pub fn reverse_complement(sequence: &[u8]) -> Vec<u8> {
        sequence
            .iter()
            .rev()
            .map(|c| Self::letter_complement(*c))
            .collect()
    }

    /// Cleans raw user input into extended-alphabet codes: whitespace,
    /// control characters, gap symbols and anything else outside the
    /// 16-letter alphabet is dropped, the rest is upper-cased.
    pub fn sanitize(raw: &[u8]) -> Vec<u8> {
        raw.iter()
            .map(|c| c.to_ascii_uppercase())
            .filter(|c| EXTENDED_DNA_ALPHABET.contains(c))
            .collect()
    }
}
