//! Error type for extended stereo perception and numbering.
//!
//! Degenerate geometry is not an error: the classifier reports it as
//! `Ok(None)`. The variants below are contract violations by the caller or
//! internal invariant violations, and must reach whoever asked for the layer.

use thiserror::Error;

use crate::stereo::GeometryClass;

/// Errors produced while classifying, resolving or assembling extended
/// stereocenters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StereoError {
    /// The classifier was handed a ligand count it has no geometry for.
    #[error("atom {atom} has {count} ligands; extended stereo needs 4, 5 or 6")]
    UnsupportedCoordination { atom: usize, count: usize },

    /// A focus or ligand atom without 3D coordinates reached the classifier.
    #[error("atom {atom} has no 3D coordinates")]
    MissingCoordinates { atom: usize },

    /// A descriptor was built with the wrong number of carriers for its class.
    #[error("{class} center on atom {atom} needs {expected} carriers, got {got}")]
    CarrierCount {
        atom: usize,
        class: GeometryClass,
        expected: usize,
        got: usize,
    },

    /// The same atom was listed twice among a center's carriers.
    #[error("atom {carrier} is listed more than once as a carrier of atom {atom}")]
    DuplicateCarrier { atom: usize, carrier: usize },

    /// A configuration order outside the numbered range of its class.
    #[error("configuration {config} does not exist for {class} centers")]
    ConfigOutOfRange { class: GeometryClass, config: u8 },

    /// No catalog family contains the resolved permutation.
    ///
    /// This means the classifier or resolver produced an inconsistent
    /// permutation. It is never recovered from: a wrong configuration number
    /// is worse than none.
    #[error("permutation {permutation:?} is not in the {class} catalog")]
    CatalogMiss {
        class: GeometryClass,
        permutation: Vec<u8>,
    },

    /// A perception tolerance is not a finite value in `(0, 1)`.
    #[error("{name} must lie strictly between 0 and 1, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },
}
