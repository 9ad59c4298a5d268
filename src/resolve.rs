//! Canonical configuration numbers.
//!
//! A descriptor's carriers are relabeled by canonical rank, with carriers of
//! one symmetry class sharing a label. When labels repeat, every way of
//! telling the tied carriers apart is tried and the smallest configuration
//! number wins, so automorphic atoms can never change the result.

use petgraph::graph::NodeIndex;

use crate::canonical::CanonicalLabeling;
use crate::catalog;
use crate::error::StereoError;
use crate::stereo::StereoDescriptor;

const MAX_CARRIERS: usize = 6;

/// Carrier labels in listing order. A small value type so each search
/// branch owns its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Labels {
    values: [u8; MAX_CARRIERS],
    len: usize,
}

impl Labels {
    pub(crate) fn new(values: &[u8]) -> Self {
        let mut labels = Self {
            values: [0; MAX_CARRIERS],
            len: values.len(),
        };
        labels.values[..values.len()].copy_from_slice(values);
        labels
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.values[..self.len]
    }

    fn smallest_repeated(&self) -> Option<u8> {
        let values = self.as_slice();
        let mut sorted = self.values;
        let sorted = &mut sorted[..values.len()];
        sorted.sort_unstable();
        sorted.windows(2).find(|w| w[0] == w[1]).map(|w| w[0])
    }

    /// Copy in which only position `keep` still holds `value`; the other
    /// holders of `value` get `value + 1`.
    fn individualize(&self, value: u8, keep: usize) -> Self {
        let mut next = *self;
        for (i, v) in next.values[..self.len].iter_mut().enumerate() {
            if *v == value && i != keep {
                *v = value + 1;
            }
        }
        next
    }
}

/// Label each carrier by the rank-sorted position where its run of equal
/// symmetry classes starts. Returned in the carriers' own order.
pub(crate) fn symmetry_labels<L>(carriers: &[NodeIndex], labeling: &L) -> Labels
where
    L: CanonicalLabeling + ?Sized,
{
    let mut sorted: Vec<NodeIndex> = carriers.to_vec();
    sorted.sort_by_key(|&atom| labeling.rank_of(atom));

    let mut by_rank = Vec::with_capacity(sorted.len());
    let mut label = 0u8;
    for (i, &atom) in sorted.iter().enumerate() {
        if i > 0 && labeling.symmetry_class_of(atom) != labeling.symmetry_class_of(sorted[i - 1]) {
            label = i as u8;
        }
        by_rank.push((atom, label));
    }

    let values: Vec<u8> = carriers
        .iter()
        .map(|c| {
            by_rank
                .iter()
                .find(|(atom, _)| atom == c)
                .map_or(0, |&(_, label)| label)
        })
        .collect();
    Labels::new(&values)
}

/// Smallest configuration number reachable by breaking label ties.
///
/// `lookup` maps a tie-free label permutation to its configuration number.
/// With no repeated label it is called once. Otherwise one branch is
/// explored per holder of the smallest repeated label.
pub(crate) fn backtrack<F>(labels: Labels, lookup: &mut F) -> Result<u8, StereoError>
where
    F: FnMut(&[u8]) -> Result<u8, StereoError>,
{
    let Some(value) = labels.smallest_repeated() else {
        return lookup(labels.as_slice());
    };
    let holders: Vec<usize> = (0..labels.len)
        .filter(|&i| labels.values[i] == value)
        .collect();
    holders.into_iter().try_fold(u8::MAX, |best, keep| {
        let branch = labels.individualize(value, keep);
        log::trace!("tie on {value}: keep position {keep}, try {:?}", branch.as_slice());
        Ok(best.min(backtrack(branch, lookup)?))
    })
}

/// Canonical configuration number of a stereocenter.
///
/// The descriptor is normalized to configuration order 1 first. A
/// permutation missing from the catalog is reported, never defaulted.
pub fn config_number<L>(descriptor: &StereoDescriptor, labeling: &L) -> Result<u8, StereoError>
where
    L: CanonicalLabeling + ?Sized,
{
    let normalized = descriptor.normalize();
    let class = normalized.class();
    let labels = symmetry_labels(normalized.carriers(), labeling);
    backtrack(labels, &mut |perm: &[u8]| {
        let found = catalog::lookup(class, perm);
        log::trace!("{class} {perm:?} -> {found:?}");
        found.ok_or_else(|| StereoError::CatalogMiss {
            class,
            permutation: perm.to_vec(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::GraphLabeling;
    use crate::stereo::GeometryClass;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn atoms(ids: &[usize]) -> Vec<NodeIndex> {
        ids.iter().map(|&i| n(i)).collect()
    }

    /// Atom `i` gets rank `i`; `classes[i]` is its symmetry class.
    fn labeling(classes: &[usize]) -> GraphLabeling {
        GraphLabeling::from_parts((0..classes.len()).collect(), classes.to_vec())
    }

    #[test]
    fn distinct_classes_give_rank_positions() {
        let l = labeling(&[0, 1, 2, 3, 4]);
        let labels = symmetry_labels(&atoms(&[3, 1, 4, 2]), &l);
        assert_eq!(labels.as_slice(), &[2, 0, 3, 1]);
    }

    #[test]
    fn shared_classes_share_labels() {
        // Atoms 1 and 2 are equivalent, as are 3 and 4.
        let l = labeling(&[0, 7, 7, 9, 9]);
        let labels = symmetry_labels(&atoms(&[1, 3, 2, 4]), &l);
        assert_eq!(labels.as_slice(), &[0, 2, 0, 2]);
    }

    #[test]
    fn rank_sort_is_stable() {
        let l = GraphLabeling::from_parts(vec![0, 1, 1, 2], vec![0, 1, 2, 3]);
        let labels = symmetry_labels(&atoms(&[2, 1, 3]), &l);
        assert_eq!(labels.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn no_repeat_is_one_lookup() {
        let mut calls = Vec::new();
        let result = backtrack(Labels::new(&[1, 0, 3, 2]), &mut |perm: &[u8]| {
            calls.push(perm.to_vec());
            Ok(2)
        });
        assert_eq!(result, Ok(2));
        assert_eq!(calls, vec![vec![1, 0, 3, 2]]);
    }

    #[test]
    fn each_holder_of_a_repeat_is_tried() {
        let mut calls = Vec::new();
        let result = backtrack(Labels::new(&[0, 0, 2, 3]), &mut |perm: &[u8]| {
            calls.push(perm.to_vec());
            Ok(1)
        });
        assert_eq!(result, Ok(1));
        assert_eq!(calls, vec![vec![0, 1, 2, 3], vec![1, 0, 2, 3]]);
    }

    #[test]
    fn triple_repeat_branches_three_ways() {
        let mut calls = 0;
        backtrack(Labels::new(&[0, 0, 0, 3]), &mut |perm: &[u8]| {
            let mut sorted = perm.to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![0, 1, 2, 3]);
            calls += 1;
            Ok(1)
        })
        .unwrap();
        // Three choices for the first tie, then two for the remaining pair.
        assert_eq!(calls, 6);
    }

    #[test]
    fn smallest_configuration_wins() {
        let result = backtrack(Labels::new(&[0, 0, 2, 2]), &mut |perm: &[u8]| {
            Ok(match perm {
                [0, 1, 3, 2] => 2,
                [1, 0, 2, 3] => 1,
                _ => 3,
            })
        });
        assert_eq!(result, Ok(1));
    }

    #[test]
    fn lookup_errors_propagate() {
        let result = backtrack(Labels::new(&[0, 0, 2, 3]), &mut |perm: &[u8]| {
            Err(StereoError::CatalogMiss {
                class: GeometryClass::SquarePlanar,
                permutation: perm.to_vec(),
            })
        });
        assert!(matches!(result, Err(StereoError::CatalogMiss { .. })));
    }

    #[test]
    fn platin_cis_and_trans() {
        // Atom 0 is Pt; 1 and 2 are NH3, 3 and 4 are Cl.
        let l = labeling(&[0, 1, 1, 3, 3]);
        let cis = StereoDescriptor::new(n(0), GeometryClass::SquarePlanar, atoms(&[1, 2, 3, 4]), 1)
            .unwrap();
        let trans =
            StereoDescriptor::new(n(0), GeometryClass::SquarePlanar, atoms(&[1, 3, 2, 4]), 1)
                .unwrap();
        assert_eq!(config_number(&cis, &l), Ok(1));
        assert_eq!(config_number(&trans, &l), Ok(2));

        // A Z-shaped listing of the trans isomer resolves the same way.
        let trans_z =
            StereoDescriptor::new(n(0), GeometryClass::SquarePlanar, atoms(&[1, 3, 4, 2]), 3)
                .unwrap();
        assert_eq!(config_number(&trans_z, &l), Ok(2));
    }

    #[test]
    fn asymmetric_square_planar_shapes() {
        let l = labeling(&[0, 1, 2, 3, 4]);
        let numbers: Vec<u8> = (1..=3)
            .map(|config| {
                let d = StereoDescriptor::new(
                    n(0),
                    GeometryClass::SquarePlanar,
                    atoms(&[1, 2, 3, 4]),
                    config,
                )
                .unwrap();
                config_number(&d, &l).unwrap()
            })
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}
