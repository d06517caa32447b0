use phf::{Set, phf_set};

/// Residue codes counted as hydrophilic by the epitope heuristic.
pub static HYDROPHILIC_RESIDUES: Set<char> = phf_set! {
    'K', 'R', 'D', 'E', 'Q', 'N',
};

#[inline]
pub fn is_hydrophilic(residue: char) -> bool {
    HYDROPHILIC_RESIDUES.contains(&residue)
}

/// A protein sequence normalized for scoring.
///
/// Normalization only uppercases the input; characters outside the standard
/// amino-acid alphabet are kept and simply never count as hydrophilic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedSequence {
    residues: Vec<char>,
}

impl NormalizedSequence {
    pub fn new(raw: &str) -> Self {
        Self {
            residues: raw.to_uppercase().chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn residues(&self) -> &[char] {
        &self.residues
    }

    /// Returns the residues in `[start, start + len)`, or `None` if the slice
    /// would run past the end of the sequence.
    pub fn window(&self, start: usize, len: usize) -> Option<&[char]> {
        self.residues.get(start..start.checked_add(len)?)
    }

    pub fn hydrophilic_count(residues: &[char]) -> usize {
        residues.iter().filter(|&&r| is_hydrophilic(r)).count()
    }
}

impl std::fmt::Display for NormalizedSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for residue in &self.residues {
            write!(f, "{}", residue)?;
        }
        Ok(())
    }
}
