//! Perception and canonical numbering of square-planar,
//! trigonal-bipyramidal and octahedral stereocenters.
//!
//! The pipeline runs in three steps:
//!
//! 1. [`perceive`] classifies every 4-, 5- and 6-coordinate atom of a
//!    [`Mol`] from its 3D coordinates and attaches a [`StereoDescriptor`].
//! 2. [`config_number`] resolves a descriptor against canonical ranks and
//!    symmetry classes ([`CanonicalLabeling`]) into a configuration number
//!    that automorphic ligands cannot change.
//! 3. [`metal_layer`] orders the resolved centers by rank and writes the
//!    layer text, which [`append_metal_layer`] adds to a base identifier.
//!
//! ```
//! use metalstereo::{
//!     append_metal_layer, metal_layer, perceive, Atom, Bond, GraphLabeling, Mol,
//!     WithPosition3D,
//! };
//!
//! // trans-[PtCl2(NH3)2]
//! let mut mol = Mol::new();
//! let pt = mol.add_atom(WithPosition3D::new(Atom::element(78), [0.0, 0.0, 0.0]));
//! let ligands = [
//!     (7, [2.0, 0.0, 0.0]),
//!     (17, [0.0, 2.3, 0.0]),
//!     (7, [-2.0, 0.0, 0.0]),
//!     (17, [0.0, -2.3, 0.0]),
//! ];
//! for (atomic_num, position) in ligands {
//!     let atom = Atom { hydrogen_count: if atomic_num == 7 { 3 } else { 0 }, ..Atom::element(atomic_num) };
//!     let ligand = mol.add_atom(WithPosition3D::new(atom, position));
//!     mol.add_bond(pt, ligand, Bond::default());
//! }
//!
//! assert_eq!(perceive(&mut mol).unwrap(), 1);
//! let labeling = GraphLabeling::new(&mol);
//! let layer = metal_layer(&mol, &labeling).unwrap();
//! assert_eq!(layer, "5sp2");
//! assert_eq!(append_metal_layer("InChI=1S/2ClH.2H3N.Pt", &layer), "InChI=1S/2ClH.2H3N.Pt/ma5sp2");
//! ```

pub mod atom;
pub mod bond;
pub mod canonical;
pub mod catalog;
pub mod config;
pub mod error;
mod geometry;
pub mod layer;
pub mod mol;
pub mod perceive;
pub mod resolve;
pub mod stereo;
pub mod traits;
pub mod wrappers;

pub use atom::Atom;
pub use bond::{Bond, BondOrder};
pub use canonical::{CanonicalLabeling, GraphLabeling};
pub use config::PerceptionConfig;
pub use error::StereoError;
pub use layer::{
    append_metal_layer, metal_layer, resolve_and_assemble, resolve_centers, ResolvedCenter,
    LAYER_PREFIX,
};
pub use mol::Mol;
pub use perceive::{classify, classify_atom, perceive, perceive_with};
pub use resolve::config_number;
pub use stereo::{GeometryClass, Handedness, SquarePlanarShape, StereoDescriptor};
pub use traits::{
    HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount, HasIsotope, HasPosition3D,
};
pub use wrappers::WithPosition3D;
