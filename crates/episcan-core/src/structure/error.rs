use crate::core::io::pdb::PdbError;
use std::io;
use thiserror::Error;

/// Failures of the structure retrieval and rendering collaborators.
///
/// None of these invalidate an already computed prediction; callers report them
/// alongside the epitope listing.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error("Invalid structure identifier '{0}'. Expected a 4-character PDB code (e.g., 1TUP).")]
    InvalidIdentifier(String),

    #[error("Network error while fetching structure {id}: {message}")]
    Network { id: String, message: String },

    #[error("Structure {id} was not found in the archive")]
    NotFound { id: String },

    #[error("Timed out after {seconds}s while fetching structure {id}")]
    Timeout { id: String, seconds: u64 },

    #[error("Failed to parse structure: {0}")]
    Parse(#[from] PdbError),

    #[error("Failed to render structure overlay: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StructureError {
    /// Short category name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StructureError::InvalidIdentifier(_) => "invalid-identifier",
            StructureError::Network { .. } => "network",
            StructureError::NotFound { .. } => "not-found",
            StructureError::Timeout { .. } => "timeout",
            StructureError::Parse(_) => "parse",
            StructureError::Render(_) => "render",
            StructureError::Io(_) => "io",
        }
    }
}
