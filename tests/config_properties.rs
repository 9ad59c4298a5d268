use std::collections::BTreeSet;

use metalstereo::{
    config_number, metal_layer, Atom, Bond, BondOrder, GeometryClass, GraphLabeling, Mol,
    StereoDescriptor,
};
use petgraph::graph::NodeIndex;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Labeling for a center on atom 0 with carriers 1..=k, where carrier `i`
/// has ligand kind `kinds[i - 1]`. Ligands of one kind share a symmetry
/// class; ranks order by kind, then by `tiebreak`.
fn labeling(kinds: &[usize], tiebreak: &[usize]) -> GraphLabeling {
    let k = kinds.len();
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by_key(|&i| (kinds[i], tiebreak[i]));

    let mut ranks = vec![0; k + 1];
    ranks[0] = k + 1;
    for (rank, &i) in order.iter().enumerate() {
        ranks[i + 1] = rank + 1;
    }
    let mut classes = vec![usize::MAX];
    classes.extend_from_slice(kinds);
    GraphLabeling::from_parts(ranks, classes)
}

/// Configuration number of every configuration order of `class`, with the
/// carriers listed as atoms 1..=k.
fn numbers(class: GeometryClass, labeling: &GraphLabeling) -> Vec<u8> {
    let carriers: Vec<NodeIndex> = (1..=class.coordination()).map(NodeIndex::new).collect();
    (1..=class.config_count())
        .map(|config| {
            let d = StereoDescriptor::new(NodeIndex::new(0), class, carriers.clone(), config)
                .unwrap();
            config_number(&d, labeling).unwrap()
        })
        .collect()
}

fn distinct(class: GeometryClass, kinds: &[usize]) -> BTreeSet<u8> {
    let identity: Vec<usize> = (0..kinds.len()).collect();
    numbers(class, &labeling(kinds, &identity))
        .into_iter()
        .collect()
}

fn permutations(n: usize) -> Vec<Vec<usize>> {
    let mut out = vec![Vec::new()];
    for _ in 0..n {
        let mut next = Vec::new();
        for prefix in &out {
            for x in 0..n {
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

// ---------------------------------------------------------------------------
// Collapse of configuration numbers under ligand symmetry
// ---------------------------------------------------------------------------

#[test]
fn asymmetric_square_planar_has_three_configurations() {
    let found = distinct(GeometryClass::SquarePlanar, &[0, 1, 2, 3]);
    assert_eq!(found, BTreeSet::from([1, 2, 3]));
}

#[test]
fn two_pairs_square_planar_is_cis_or_trans() {
    let found = distinct(GeometryClass::SquarePlanar, &[0, 0, 1, 1]);
    assert_eq!(found, BTreeSet::from([1, 2]));
}

#[test]
fn asymmetric_octahedron_keeps_all_thirty() {
    let found = distinct(GeometryClass::Octahedral, &[0, 1, 2, 3, 4, 5]);
    assert_eq!(found, (1..=30).collect());
}

#[test]
fn asymmetric_trigonal_bipyramid_keeps_all_twenty() {
    let found = distinct(GeometryClass::TrigonalBipyramidal, &[0, 1, 2, 3, 4]);
    assert_eq!(found, (1..=20).collect());
}

#[test]
fn three_and_three_octahedron_is_fac_or_mer() {
    let found = distinct(GeometryClass::Octahedral, &[0, 0, 0, 1, 1, 1]);
    assert_eq!(found, BTreeSet::from([1, 8]));
}

#[test]
fn four_and_two_octahedron_is_cis_or_trans() {
    let found = distinct(GeometryClass::Octahedral, &[0, 0, 0, 1, 0, 1]);
    assert_eq!(found, BTreeSet::from([1, 12]));
}

#[test]
fn three_pairs_octahedron() {
    let found = distinct(GeometryClass::Octahedral, &[0, 0, 1, 1, 2, 2]);
    assert_eq!(found, BTreeSet::from([1, 2, 4, 12, 25, 27]));
}

#[test]
fn two_and_three_trigonal_bipyramid() {
    let found = distinct(GeometryClass::TrigonalBipyramidal, &[1, 0, 0, 0, 1]);
    assert_eq!(found, BTreeSet::from([1, 5, 17]));
}

#[test]
fn identical_ligands_have_one_configuration() {
    assert_eq!(distinct(GeometryClass::TrigonalBipyramidal, &[0; 5]), BTreeSet::from([1]));
    assert_eq!(distinct(GeometryClass::Octahedral, &[0; 6]), BTreeSet::from([1]));
}

// ---------------------------------------------------------------------------
// Independence from how tied ranks are handed out
// ---------------------------------------------------------------------------

fn assert_rank_invariant(class: GeometryClass, kinds: &[usize]) {
    let identity: Vec<usize> = (0..kinds.len()).collect();
    let expected = numbers(class, &labeling(kinds, &identity));
    for tiebreak in permutations(kinds.len()) {
        let got = numbers(class, &labeling(kinds, &tiebreak));
        assert_eq!(got, expected, "{class} {kinds:?} with tiebreak {tiebreak:?}");
    }
}

#[test]
fn square_planar_ignores_tied_rank_order() {
    assert_rank_invariant(GeometryClass::SquarePlanar, &[0, 0, 1, 1]);
    assert_rank_invariant(GeometryClass::SquarePlanar, &[0, 1, 0, 0]);
}

#[test]
fn trigonal_bipyramid_ignores_tied_rank_order() {
    assert_rank_invariant(GeometryClass::TrigonalBipyramidal, &[1, 0, 0, 0, 1]);
}

#[test]
fn octahedron_ignores_tied_rank_order() {
    assert_rank_invariant(GeometryClass::Octahedral, &[0, 0, 0, 1, 1, 1]);
    assert_rank_invariant(GeometryClass::Octahedral, &[0, 0, 1, 1, 2, 2]);
}

// ---------------------------------------------------------------------------
// Declared configurations on whole molecules
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Ligand {
    Chloride,
    Nitro,
    Amine(u8),
}

/// A metal bonded to `ligands` in order, with every configuration order of
/// `class` declared in turn. Returns the distinct layers.
fn declared_layers(metal: u8, class: GeometryClass, ligands: &[Ligand]) -> BTreeSet<String> {
    let mut mol: Mol<Atom, Bond> = Mol::new();
    let center = mol.add_atom(Atom::element(metal));
    let mut carriers = Vec::new();
    for &ligand in ligands {
        let donor = match ligand {
            Ligand::Chloride => mol.add_atom(Atom::element(17)),
            Ligand::Amine(hydrogen_count) => mol.add_atom(Atom {
                hydrogen_count,
                ..Atom::element(7)
            }),
            Ligand::Nitro => {
                let n = mol.add_atom(Atom {
                    formal_charge: 1,
                    ..Atom::element(7)
                });
                let o1 = mol.add_atom(Atom::element(8));
                let o2 = mol.add_atom(Atom {
                    formal_charge: -1,
                    ..Atom::element(8)
                });
                mol.add_bond(n, o1, Bond::new(BondOrder::Double));
                mol.add_bond(n, o2, Bond::default());
                n
            }
        };
        mol.add_bond(center, donor, Bond::default());
        carriers.push(donor);
    }

    let labeling = GraphLabeling::new(&mol);
    (1..=class.config_count())
        .map(|config| {
            let d = StereoDescriptor::new(center, class, carriers.clone(), config).unwrap();
            mol.set_stereo(vec![d]);
            metal_layer(&mol, &labeling).unwrap()
        })
        .collect()
}

fn layers(expected: &[&str]) -> BTreeSet<String> {
    expected.iter().map(|s| s.to_string()).collect()
}

#[test]
fn declared_cis_trans_platin() {
    use Ligand::*;
    let ligands = [Chloride, Chloride, Amine(3), Amine(3)];
    let found = declared_layers(78, GeometryClass::SquarePlanar, &ligands);
    assert_eq!(found, layers(&["5sp1", "5sp2"]));
}

#[test]
fn declared_cis_trans_cobalt_nitro() {
    use Ligand::*;
    let ligands = [Chloride, Chloride, Chloride, Nitro, Chloride, Nitro];
    let found = declared_layers(27, GeometryClass::Octahedral, &ligands);
    assert_eq!(found, layers(&["11o1", "11o25"]));
}

#[test]
fn declared_fac_mer_cobalt_nitro() {
    use Ligand::*;
    let ligands = [Chloride, Chloride, Chloride, Nitro, Nitro, Nitro];
    let found = declared_layers(27, GeometryClass::Octahedral, &ligands);
    assert_eq!(found, layers(&["13o1", "13o8"]));
}

#[test]
fn declared_trigonal_bipyramid_two_and_three() {
    use Ligand::*;
    let ligands = [Amine(2), Chloride, Chloride, Chloride, Amine(2)];
    let found = declared_layers(27, GeometryClass::TrigonalBipyramidal, &ligands);
    assert_eq!(found, layers(&["6tb1", "6tb7", "6tb15"]));
}
