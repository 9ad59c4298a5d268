//! Serialization of resolved centers into the `/ma` identifier layer.
//!
//! Each center is written as `<rank><tag><number>`, for example `5sp2` or
//! `13o1`, in ascending rank order and joined with commas.

use std::fmt;

use petgraph::graph::NodeIndex;

use crate::canonical::CanonicalLabeling;
use crate::error::StereoError;
use crate::mol::Mol;
use crate::resolve::config_number;
use crate::stereo::{GeometryClass, StereoDescriptor};

/// Prefix that introduces the layer in an identifier.
pub const LAYER_PREFIX: &str = "/ma";

/// A stereocenter with its canonical configuration number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCenter {
    pub focus: NodeIndex,
    pub rank: usize,
    pub class: GeometryClass,
    pub config: u8,
}

impl fmt::Display for ResolvedCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.rank, self.class.tag(), self.config)
    }
}

/// Resolve every descriptor and order the results by the rank of their
/// focus. Equal ranks keep the input order.
///
/// Stops at the first center that fails to resolve.
pub fn resolve_centers<L>(
    descriptors: &[StereoDescriptor],
    labeling: &L,
) -> Result<Vec<ResolvedCenter>, StereoError>
where
    L: CanonicalLabeling + ?Sized,
{
    let mut centers = descriptors
        .iter()
        .map(|d| {
            Ok(ResolvedCenter {
                focus: d.focus(),
                rank: labeling.rank_of(d.focus()),
                class: d.class(),
                config: config_number(d, labeling)?,
            })
        })
        .collect::<Result<Vec<_>, StereoError>>()?;
    centers.sort_by_key(|c| c.rank);
    Ok(centers)
}

/// Layer text for a set of descriptors, without the prefix. Empty when
/// there are no descriptors.
pub fn resolve_and_assemble<L>(
    descriptors: &[StereoDescriptor],
    labeling: &L,
) -> Result<String, StereoError>
where
    L: CanonicalLabeling + ?Sized,
{
    let centers = resolve_centers(descriptors, labeling)?;
    let parts: Vec<String> = centers.iter().map(ResolvedCenter::to_string).collect();
    Ok(parts.join(","))
}

/// Layer text for the descriptors attached to a molecule.
pub fn metal_layer<A, B, L>(mol: &Mol<A, B>, labeling: &L) -> Result<String, StereoError>
where
    L: CanonicalLabeling + ?Sized,
{
    resolve_and_assemble(mol.stereo(), labeling)
}

/// Append a layer to a base identifier. An empty layer still adds the
/// prefix.
pub fn append_metal_layer(base: &str, layer: &str) -> String {
    format!("{base}{LAYER_PREFIX}{layer}")
}
