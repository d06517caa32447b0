//! # Structure Module
//!
//! Everything needed to show epitope candidates on a 3D structure, short of the
//! network download itself: identifier validation ([`id`]), the error taxonomy
//! shared by retrieval and rendering ([`error`]), and the 3Dmol.js page
//! generator ([`viewer`]).

pub mod error;
pub mod id;
pub mod viewer;

pub use error::StructureError;
pub use id::StructureId;
pub use viewer::{OverlayStyle, render_overlay};
