//! Input and output formats.
//!
//! Sequences come in as raw text or FASTA ([`fasta`]), structures as PDB text
//! ([`pdb`]), and prediction results leave as text, JSON or CSV ([`report`]).

pub mod fasta;
pub mod pdb;
pub mod report;
