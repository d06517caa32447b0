//! # Workflows Module
//!
//! Top-level entry points of the library.
//!
//! - **Prediction** ([`predict`]) - Scores one explicit [`predict::PredictionRequest`],
//!   or a batch of sequences in parallel.
//! - **Structure Overlay** ([`overlay`]) - Parses downloaded structure text and renders
//!   the candidates of a finished prediction onto it.
//!
//! The two are deliberately separate: a failed overlay never touches a prediction
//! that has already been produced.

pub mod overlay;
pub mod predict;
