//! # Engine Module
//!
//! Plumbing shared by the workflows: validated configuration ([`config`]),
//! the engine error type ([`error`]) and progress reporting ([`progress`]).

pub mod config;
pub mod error;
pub mod progress;
