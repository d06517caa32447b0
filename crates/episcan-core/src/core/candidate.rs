use serde::{Deserialize, Serialize};

/// An inclusive, 1-based residue range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResidueRange {
    pub start: usize,
    pub end: usize,
}

impl ResidueRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn residues(&self) -> impl Iterator<Item = usize> + '_ {
        self.start..=self.end
    }
}

impl std::fmt::Display for ResidueRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A contiguous peptide window flagged by the hydrophilicity heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpitopeCandidate {
    pub peptide: String,
    pub start: usize,
    pub end: usize,
    /// Fraction of hydrophilic residues in the window, rounded to two decimals.
    pub score: f64,
}

impl EpitopeCandidate {
    pub fn range(&self) -> ResidueRange {
        ResidueRange::new(self.start, self.end)
    }
}

impl std::fmt::Display for EpitopeCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Peptide: {}, Start: {}, End: {}, Score: {:?}",
            self.peptide, self.start, self.end, self.score
        )
    }
}
