//! Permutation catalog for square-planar, trigonal-bipyramidal and
//! octahedral configurations.
//!
//! Each geometry class has one family of permutations per configuration
//! number. A family holds every restatement of one spatial arrangement
//! under the rotations of the shape: 8 for square-planar, 6 for
//! trigonal-bipyramidal, 24 for octahedral. The families are generated at
//! build time from the seeds in `data/configurations.txt`.
//!
//! The tables are immutable statics and safe to read from any thread.

use crate::stereo::GeometryClass;

mod tables {
    include!(concat!(env!("OUT_DIR"), "/configurations.rs"));
}

use tables::{
    OCTAHEDRAL_FAMILIES, OCTAHEDRAL_SEEDS, SQUARE_PLANAR_FAMILIES, SQUARE_PLANAR_SEEDS,
    TRIGONAL_BIPYRAMIDAL_FAMILIES, TRIGONAL_BIPYRAMIDAL_SEEDS,
};

/// Configuration number (1-based family index) of a permutation.
///
/// `perm[p]` is the label of the carrier at position `p` of an order-1
/// listing. Returns `None` when no family holds the permutation, which
/// includes permutations of the wrong length or with repeated labels.
pub fn lookup(class: GeometryClass, perm: &[u8]) -> Option<u8> {
    match class {
        GeometryClass::SquarePlanar => find(&SQUARE_PLANAR_FAMILIES, perm),
        GeometryClass::TrigonalBipyramidal => find(&TRIGONAL_BIPYRAMIDAL_FAMILIES, perm),
        GeometryClass::Octahedral => find(&OCTAHEDRAL_FAMILIES, perm),
    }
}

/// Every permutation of one configuration, or `None` if `config` does not
/// exist for `class`.
pub fn family(class: GeometryClass, config: u8) -> Option<Vec<&'static [u8]>> {
    let index = (config as usize).checked_sub(1)?;
    match class {
        GeometryClass::SquarePlanar => members(&SQUARE_PLANAR_FAMILIES, index),
        GeometryClass::TrigonalBipyramidal => members(&TRIGONAL_BIPYRAMIDAL_FAMILIES, index),
        GeometryClass::Octahedral => members(&OCTAHEDRAL_FAMILIES, index),
    }
}

pub(crate) fn family_count(class: GeometryClass) -> u8 {
    let count = match class {
        GeometryClass::SquarePlanar => SQUARE_PLANAR_FAMILIES.len(),
        GeometryClass::TrigonalBipyramidal => TRIGONAL_BIPYRAMIDAL_FAMILIES.len(),
        GeometryClass::Octahedral => OCTAHEDRAL_FAMILIES.len(),
    };
    count as u8
}

/// Seed permutation of a configuration. `config` must be in range.
pub(crate) fn seed(class: GeometryClass, config: u8) -> &'static [u8] {
    let index = config as usize - 1;
    match class {
        GeometryClass::SquarePlanar => &SQUARE_PLANAR_SEEDS[index],
        GeometryClass::TrigonalBipyramidal => &TRIGONAL_BIPYRAMIDAL_SEEDS[index],
        GeometryClass::Octahedral => &OCTAHEDRAL_SEEDS[index],
    }
}

fn find<const K: usize, const W: usize>(families: &[[[u8; K]; W]], perm: &[u8]) -> Option<u8> {
    families
        .iter()
        .position(|family| family.iter().any(|p| p.as_slice() == perm))
        .map(|i| i as u8 + 1)
}

fn members<const K: usize, const W: usize>(
    families: &'static [[[u8; K]; W]],
    index: usize,
) -> Option<Vec<&'static [u8]>> {
    families
        .get(index)
        .map(|family| family.iter().map(|p| p.as_slice()).collect())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn all_permutations(k: u8) -> Vec<Vec<u8>> {
        let mut out = vec![Vec::new()];
        for _ in 0..k {
            let mut next = Vec::new();
            for prefix in &out {
                for x in 0..k {
                    if !prefix.contains(&x) {
                        let mut p = prefix.clone();
                        p.push(x);
                        next.push(p);
                    }
                }
            }
            out = next;
        }
        out
    }

    #[test]
    fn identity_is_configuration_one() {
        assert_eq!(lookup(GeometryClass::SquarePlanar, &[0, 1, 2, 3]), Some(1));
        assert_eq!(lookup(GeometryClass::TrigonalBipyramidal, &[0, 1, 2, 3, 4]), Some(1));
        assert_eq!(lookup(GeometryClass::Octahedral, &[0, 1, 2, 3, 4, 5]), Some(1));
    }

    #[test]
    fn family_sizes() {
        for (class, width) in [
            (GeometryClass::SquarePlanar, 8),
            (GeometryClass::TrigonalBipyramidal, 6),
            (GeometryClass::Octahedral, 24),
        ] {
            for config in 1..=family_count(class) {
                assert_eq!(family(class, config).unwrap().len(), width);
            }
        }
    }

    #[test]
    fn families_partition_all_permutations() {
        for class in GeometryClass::ALL {
            let k = class.coordination() as u8;
            let mut seen = HashSet::new();
            for perm in all_permutations(k) {
                let config = lookup(class, &perm);
                assert!(config.is_some(), "{class}: {perm:?} missing");
                seen.insert(config);
            }
            assert_eq!(seen.len(), family_count(class) as usize);
        }
    }

    #[test]
    fn seeds_belong_to_their_family() {
        for class in GeometryClass::ALL {
            for config in 1..=family_count(class) {
                assert_eq!(lookup(class, seed(class, config)), Some(config));
            }
        }
    }

    #[test]
    fn square_planar_u_family() {
        let mut members: Vec<Vec<u8>> = family(GeometryClass::SquarePlanar, 1)
            .unwrap()
            .into_iter()
            .map(<[u8]>::to_vec)
            .collect();
        members.sort();
        let expected: Vec<Vec<u8>> = vec![
            vec![0, 1, 2, 3],
            vec![0, 3, 2, 1],
            vec![1, 0, 3, 2],
            vec![1, 2, 3, 0],
            vec![2, 1, 0, 3],
            vec![2, 3, 0, 1],
            vec![3, 0, 1, 2],
            vec![3, 2, 1, 0],
        ];
        assert_eq!(members, expected);
    }

    #[test]
    fn rejects_malformed_permutations() {
        assert_eq!(lookup(GeometryClass::SquarePlanar, &[0, 0, 2, 3]), None);
        assert_eq!(lookup(GeometryClass::SquarePlanar, &[0, 1, 2]), None);
        assert_eq!(lookup(GeometryClass::Octahedral, &[0, 1, 2, 3, 4]), None);
        assert!(family(GeometryClass::Octahedral, 0).is_none());
        assert!(family(GeometryClass::Octahedral, 31).is_none());
    }
}
