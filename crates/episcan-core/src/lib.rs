//! # EpiScan Core Library
//!
//! Predicts linear epitope candidates in protein sequences with a sliding-window
//! hydrophilicity heuristic, and prepares 3D structure overlays of the results.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Sequence normalization, the epitope scorer, reference
//!   epitopes, and file formats (FASTA, PDB, reports).
//!
//! - **[`structure`]: Structure Collaborators.** Structure identifiers, the structure error
//!   taxonomy, and the 3Dmol.js overlay renderer.
//!
//! - **[`engine`]: Configuration and Plumbing.** Validated prediction settings, engine
//!   errors, and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Explicit-request prediction (single and batch)
//!   and structure overlay workflows.
//!
//! ## Quick Start
//!
//! ```
//! use episcan::core::scoring::predict_epitopes;
//!
//! let candidates = predict_epitopes("KRDEQNKRD", 9, 0.3).unwrap();
//! assert_eq!(candidates.len(), 1);
//! assert_eq!((candidates[0].start, candidates[0].end), (1, 9));
//! assert_eq!(candidates[0].score, 1.0);
//! ```

pub mod core;
pub mod engine;
pub mod structure;
pub mod workflows;
