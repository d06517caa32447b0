use super::candidate::ResidueRange;
use super::sequence::NormalizedSequence;
use serde::Serialize;

/// A published linear epitope with known disease relevance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KnownEpitope {
    pub name: &'static str,
    pub sequence: &'static str,
    pub antibody: &'static str,
    pub location: &'static str,
    pub significance: &'static str,
}

static KNOWN_EPITOPES: &[KnownEpitope] = &[KnownEpitope {
    name: "HIV-1 gp41 Epitope",
    sequence: "ELDKWAS",
    antibody: "2F5",
    location: "Fusion peptide region of gp41",
    significance: "Critical for HIV entry into host cells, targeted by neutralizing antibodies.",
}];

pub fn known_epitopes() -> &'static [KnownEpitope] {
    KNOWN_EPITOPES
}

/// An occurrence of a [`KnownEpitope`] inside a scanned sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnownEpitopeHit {
    pub epitope: &'static KnownEpitope,
    pub range: ResidueRange,
}

/// Finds every (possibly overlapping) occurrence of the cataloged epitopes.
pub fn locate_known_epitopes(sequence: &NormalizedSequence) -> Vec<KnownEpitopeHit> {
    let residues = sequence.residues();
    let mut hits = Vec::new();

    for epitope in KNOWN_EPITOPES {
        let motif: Vec<char> = epitope.sequence.chars().collect();
        if motif.is_empty() || motif.len() > residues.len() {
            continue;
        }
        for (i, window) in residues.windows(motif.len()).enumerate() {
            if window == motif.as_slice() {
                hits.push(KnownEpitopeHit {
                    epitope,
                    range: ResidueRange::new(i + 1, i + motif.len()),
                });
            }
        }
    }

    hits.sort_by_key(|hit| hit.range);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_contains_2f5_epitope() {
        let epitope = known_epitopes()
            .iter()
            .find(|e| e.antibody == "2F5")
            .expect("2F5 epitope should be cataloged");
        assert_eq!(epitope.sequence, "ELDKWAS");
        assert_eq!(epitope.name, "HIV-1 gp41 Epitope");
        assert_eq!(epitope.location, "Fusion peptide region of gp41");
    }

    #[test]
    fn catalog_sequences_are_uppercase() {
        for epitope in known_epitopes() {
            assert_eq!(epitope.sequence, epitope.sequence.to_uppercase());
        }
    }

    #[test]
    fn locate_finds_case_insensitive_occurrences() {
        let seq = NormalizedSequence::new("aaeldkwasGGELDKWAS");
        let hits = locate_known_epitopes(&seq);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].range, ResidueRange::new(3, 9));
        assert_eq!(hits[1].range, ResidueRange::new(12, 18));
        assert_eq!(hits[0].epitope.antibody, "2F5");
    }

    #[test]
    fn locate_returns_nothing_for_short_or_unrelated_sequences() {
        assert!(locate_known_epitopes(&NormalizedSequence::new("ELDK")).is_empty());
        assert!(locate_known_epitopes(&NormalizedSequence::new("MKTAYIAKQRQ")).is_empty());
        assert!(locate_known_epitopes(&NormalizedSequence::default()).is_empty());
    }
}
