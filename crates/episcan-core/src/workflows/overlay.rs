use crate::core::candidate::{EpitopeCandidate, ResidueRange};
use crate::core::io::pdb::{PdbFile, Structure};
use crate::engine::progress::ProgressReporter;
use crate::structure::error::StructureError;
use crate::structure::id::StructureId;
use crate::structure::viewer::{OverlayStyle, render_overlay};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct StructureOverlay {
    pub structure_id: StructureId,
    pub structure: Structure,
    pub html: String,
    pub highlighted: Vec<ResidueRange>,
    /// Ranges that end past the highest residue number in the structure.
    pub out_of_range: Vec<ResidueRange>,
}

/// Parses `structure_text` and renders one highlight per candidate.
///
/// Candidate positions are sequence positions; they are passed to the viewer
/// as residue numbers unchanged, so ranges past the end of the structure are
/// still rendered but reported in [`StructureOverlay::out_of_range`].
#[instrument(skip_all, name = "overlay_workflow", fields(structure = %structure_id))]
pub fn run(
    structure_id: &StructureId,
    structure_text: &str,
    candidates: &[EpitopeCandidate],
    style: &OverlayStyle,
    reporter: &ProgressReporter,
) -> Result<StructureOverlay, StructureError> {
    reporter.phase("Rendering structure overlay", || {
        let structure = PdbFile::parse(structure_text)?;
        info!(
            "Parsed structure {}: {} atoms, {} residues, chains {:?}.",
            structure_id,
            structure.atom_count,
            structure.residues.len(),
            structure.chain_ids()
        );

        let highlighted: Vec<ResidueRange> =
            candidates.iter().map(EpitopeCandidate::range).collect();
        let out_of_range: Vec<ResidueRange> = match structure.max_residue_number() {
            Some(max) => highlighted
                .iter()
                .copied()
                .filter(|r| r.end as isize > max)
                .collect(),
            None => highlighted.clone(),
        };
        if !out_of_range.is_empty() {
            warn!(
                "{} highlight range(s) extend past the last residue of {}.",
                out_of_range.len(),
                structure_id
            );
        }

        let title = format!("{} with Highlighted Epitopes", structure_id);
        let html = render_overlay(&title, structure_text, &highlighted, style)?;

        Ok(StructureOverlay {
            structure_id: structure_id.clone(),
            structure,
            html,
            highlighted,
            out_of_range,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pdb::PdbError;

    const PDB: &str = "\
ATOM      1  CA  LYS A   1       0.000   0.000   0.000  1.00  0.00           C
ATOM      2  CA  ARG A   2       3.800   0.000   0.000  1.00  0.00           C
ATOM      3  CA  ASP A   3       7.600   0.000   0.000  1.00  0.00           C
ATOM      4  CA  GLU A  12      11.400   0.000   0.000  1.00  0.00           C
END
";

    fn candidate(start: usize, end: usize) -> EpitopeCandidate {
        EpitopeCandidate {
            peptide: "K".repeat(end - start + 1),
            start,
            end,
            score: 1.0,
        }
    }

    #[test]
    fn overlay_highlights_every_candidate() {
        let id = StructureId::parse("1abc").unwrap();
        let candidates = [candidate(1, 3), candidate(2, 4)];
        let overlay = run(
            &id,
            PDB,
            &candidates,
            &OverlayStyle::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(overlay.structure_id.as_str(), "1ABC");
        assert_eq!(overlay.structure.atom_count, 4);
        assert_eq!(
            overlay.highlighted,
            vec![ResidueRange::new(1, 3), ResidueRange::new(2, 4)]
        );
        assert!(overlay.out_of_range.is_empty());
        assert!(overlay.html.contains("const highlights = [[1,2,3],[2,3,4]];"));
        assert!(overlay.html.contains("1ABC with Highlighted Epitopes"));
    }

    #[test]
    fn ranges_past_structure_end_are_reported_but_rendered() {
        let id = StructureId::parse("1abc").unwrap();
        let candidates = [candidate(5, 13)];
        let overlay = run(
            &id,
            PDB,
            &candidates,
            &OverlayStyle::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(overlay.out_of_range, vec![ResidueRange::new(5, 13)]);
        assert!(overlay.html.contains("[5,6,7,8,9,10,11,12,13]"));
    }

    #[test]
    fn malformed_structure_is_a_parse_error() {
        let id = StructureId::parse("1abc").unwrap();
        let result = run(
            &id,
            "not a structure",
            &[candidate(1, 3)],
            &OverlayStyle::default(),
            &ProgressReporter::new(),
        );
        assert!(matches!(
            result,
            Err(StructureError::Parse(PdbError::NoAtoms))
        ));
    }

    #[test]
    fn no_candidates_still_renders_plain_structure() {
        let id = StructureId::parse("1abc").unwrap();
        let overlay = run(
            &id,
            PDB,
            &[],
            &OverlayStyle::default(),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert!(overlay.highlighted.is_empty());
        assert!(overlay.html.contains("const highlights = [];"));
    }
}
