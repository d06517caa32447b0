//! # Core Module
//!
//! Stateless building blocks for epitope prediction.
//!
//! ## Architecture
//!
//! - **Sequences** ([`sequence`]) - Normalization and the hydrophilic residue set
//! - **Results** ([`candidate`]) - Epitope candidates and the residue ranges derived from them
//! - **Scoring** ([`scoring`]) - The sliding-window hydrophilicity scorer
//! - **Reference Data** ([`reference`]) - Known disease-associated epitopes
//! - **File I/O** ([`io`]) - FASTA input, PDB parsing and report writers
//!
//! Everything here is pure: no I/O outside of [`io`], no shared state, and every
//! function is safe to call from several threads at once.

pub mod candidate;
pub mod io;
pub mod reference;
pub mod scoring;
pub mod sequence;
