use crate::iupac_code::IupacCode;

/// Outcome of testing one primer placement against one target window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub is_match: bool,
    /// Positions (primer coordinates, 5'→3') that failed the base-set test.
    pub mismatch_positions: Vec<usize>,
}

impl MatchResult {
    fn no_match() -> Self {
        Self::default()
    }

    pub fn mismatch_count(&self) -> usize {
        self.mismatch_positions.len()
    }
}

/// Tests a primer against an equally long target window.
///
/// Both slices are read in the same 5'→3' orientation, so the 3' end is
/// always the trailing end; callers matching against the minus strand
/// reverse-complement the window into primer orientation first.
///
/// Position i matches when the base sets of primer[i] and window[i]
/// intersect, which makes degenerate codes on either side (a primer `R`, a
/// stray target `N`) count as zero mismatches wherever they can agree.
/// Two independent budgets apply: at most `max_mismatches` over the whole
/// primer, and zero mismatches within the trailing `perfect_match_len`
/// positions. A window of the wrong length is a non-match, not an error.
pub fn matches(
    primer: &[u8],
    window: &[u8],
    max_mismatches: usize,
    perfect_match_len: usize,
) -> MatchResult {
    if primer.is_empty() || window.len() != primer.len() {
        return MatchResult::no_match();
    }

    let mismatch_positions: Vec<usize> = primer
        .iter()
        .zip(window.iter())
        .enumerate()
        .filter(|(_, (p, t))| {
            IupacCode::from_letter(**p)
                .subset(IupacCode::from_letter(**t))
                .is_empty()
        })
        .map(|(i, _)| i)
        .collect();

    let perfect_zone_start = primer.len().saturating_sub(perfect_match_len);
    let perfect_zone_clean = mismatch_positions
        .iter()
        .all(|pos| *pos < perfect_zone_start);
    let is_match = mismatch_positions.len() <= max_mismatches && perfect_zone_clean;

    MatchResult {
        is_match,
        mismatch_positions,
    }
}
