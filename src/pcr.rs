use crate::{
    dna_sequence::DNAsequence,
    iupac_code::IupacCode,
    primer::Primer,
    primer_match::{self, MatchResult},
};
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A primer placement found on the target, in plus-strand coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimerSite {
    /// 0-based start of the annealing window, reduced modulo target length.
    pub start: usize,
    pub match_result: MatchResult,
}

/// One predicted PCR product. `start` and `end` are 0-based inclusive
/// plus-strand coordinates; `start > end` denotes a product wrapping the
/// origin of a circular target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amplicon {
    pub start: usize,
    pub end: usize,
    pub length: usize,
    pub forward_mismatches: usize,
    pub reverse_mismatches: usize,
}

impl Amplicon {
    pub fn is_wrapped(&self) -> bool {
        self.end < self.start
    }

    /// Human-facing 1-based inclusive region, eg "9 - 1196"; a wrapped
    /// circular product reads eg "7223 - 60".
    pub fn region_string(&self) -> String {
        format!("{} - {}", self.start + 1, self.end + 1)
    }

    /// Copies the product out of the target as a new linear sequence,
    /// following the wrap on circular targets.
    pub fn extract(&self, target: &DNAsequence) -> Option<DNAsequence> {
        let end = if self.is_wrapped() {
            self.end + target.len()
        } else {
            self.end
        };
        let bases = target.get_inclusive_range_safe(self.start..=end)?;
        let name = format!(
            "{}_{}-{}",
            target.name().clone().unwrap_or_default(),
            self.start + 1,
            self.end + 1
        );
        let mut product = DNAsequence::from_sequence(&String::from_utf8_lossy(&bases)).ok()?;
        product.set_name(&name);
        Some(product)
    }
}

/// Knobs for one in-silico PCR run. Mismatch budgets are per strand; the
/// 3' perfect-match length applies to both primers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InSilicoPcrSettings {
    pub forward: Primer,
    pub reverse: Primer,
    pub forward_mismatches: usize,
    pub reverse_mismatches: usize,
    pub perfect_match_len: usize,
    pub max_product_size: usize,
}

impl InSilicoPcrSettings {
    pub fn new(forward: Primer, reverse: Primer) -> Self {
        Self {
            forward,
            reverse,
            forward_mismatches: 0,
            reverse_mismatches: 0,
            perfect_match_len: 0,
            max_product_size: usize::MAX,
        }
    }

    /// Enumerates every amplicon the primer pair supports on the target,
    /// ordered by ascending start, ties by ascending end.
    ///
    /// The forward primer is matched against the plus strand, the reverse
    /// primer against the minus strand. On circular targets the scan wraps
    /// past the origin and positions are reduced modulo the length, so
    /// wrapped products come out naturally; linear targets never wrap.
    pub fn find_products(&self, target: &DNAsequence) -> Vec<Amplicon> {
        if self.forward.is_empty() || self.reverse.is_empty() || target.is_empty() {
            return vec![];
        }

        let forward_sites = find_primer_sites(
            &self.forward,
            target,
            self.forward_mismatches,
            self.perfect_match_len,
            false,
        );
        let reverse_sites = find_primer_sites(
            &self.reverse,
            target,
            self.reverse_mismatches,
            self.perfect_match_len,
            true,
        );

        let min_product_size = self.forward.len() + self.reverse.len();
        forward_sites
            .iter()
            .cartesian_product(reverse_sites.iter())
            .filter_map(|(fwd, rev)| {
                let end = (rev.start + self.reverse.len() - 1) % target.len();
                let length = self.product_length(target, fwd.start, end)?;
                if length < min_product_size || length > self.max_product_size {
                    return None;
                }
                Some(Amplicon {
                    start: fwd.start,
                    end,
                    length,
                    forward_mismatches: fwd.match_result.mismatch_count(),
                    reverse_mismatches: rev.match_result.mismatch_count(),
                })
            })
            .sorted_by_key(|amplicon| (amplicon.start, amplicon.end))
            .collect()
    }

    fn product_length(&self, target: &DNAsequence, start: usize, end: usize) -> Option<usize> {
        if end >= start {
            Some(end - start + 1)
        } else if target.is_circular() {
            Some(end + target.len() - start + 1)
        } else {
            None
        }
    }
}

/// Scans every window start for a primer placement. For `minus_strand`
/// placements the window is reverse-complemented into primer orientation
/// before testing, which keeps the 3' perfect-match zone trailing.
pub fn find_primer_sites(
    primer: &Primer,
    target: &DNAsequence,
    max_mismatches: usize,
    perfect_match_len: usize,
    minus_strand: bool,
) -> Vec<PrimerSite> {
    let primer_len = primer.len();
    if primer_len == 0 || primer_len > target.len() {
        return vec![];
    }
    let scan_len = if target.is_circular() {
        target.len()
    } else {
        target.len() - primer_len + 1
    };

    let mut sites: Vec<PrimerSite> = (0..scan_len)
        .into_par_iter()
        .filter_map(|start| {
            let window = target.get_range_safe(start..start + primer_len)?;
            let window = if minus_strand {
                IupacCode::reverse_complement(&window)
            } else {
                window
            };
            let match_result =
                primer_match::matches(primer.sequence(), &window, max_mismatches, perfect_match_len);
            match_result.is_match.then_some(PrimerSite {
                start,
                match_result,
            })
        })
        .collect();
    sites.sort_by_key(|site| site.start);
    sites
}
