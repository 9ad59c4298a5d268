//! Canonical ranks and symmetry classes.
//!
//! The resolver only needs two numbers per atom: a canonical rank (a total
//! order independent of input atom order) and a symmetry class (equal for
//! atoms that graph automorphisms exchange). Any canonicalization engine can
//! supply them through [`CanonicalLabeling`]. [`GraphLabeling`] is a
//! self-contained one built on neighborhood refinement.

use petgraph::graph::NodeIndex;

use crate::bond::BondOrder;
use crate::mol::Mol;
use crate::traits::{HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount, HasIsotope};

/// Per-atom canonical rank and symmetry class.
///
/// Ranks order atoms canonically; lower ranks come first in the layer.
/// Two atoms must share a symmetry class exactly when some automorphism of
/// the molecular graph maps one onto the other.
pub trait CanonicalLabeling {
    fn rank_of(&self, atom: NodeIndex) -> usize;
    fn symmetry_class_of(&self, atom: NodeIndex) -> usize;
}

/// Ranks and symmetry classes stored per atom index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphLabeling {
    ranks: Vec<usize>,
    symmetry_classes: Vec<usize>,
}

impl GraphLabeling {
    /// Label a molecule.
    ///
    /// Symmetry classes come from refining atom invariants by neighbor
    /// classes until the partition is stable. Canonical ranks then break the
    /// remaining ties one class at a time, keeping the choice whose refined
    /// partition reads smallest. Ranks are 1-based and distinct.
    pub fn new<A, B>(mol: &Mol<A, B>) -> Self
    where
        A: HasAtomicNum + HasHydrogenCount + HasFormalCharge + HasIsotope,
        B: HasBondOrder,
    {
        let n = mol.atom_count();
        let invariants: Vec<AtomInvariant> = (0..n)
            .map(|i| atom_invariant(mol, NodeIndex::new(i)))
            .collect();

        let mut ranks = ranks_from_keys(&invariants);
        refine(mol, &mut ranks);
        let symmetry_classes: Vec<usize> = ranks.iter().map(|r| r + 1).collect();

        break_ties(mol, &mut ranks, &invariants);
        Self {
            ranks: ranks.iter().map(|r| r + 1).collect(),
            symmetry_classes,
        }
    }

    /// Wrap ranks and symmetry classes computed elsewhere, indexed by atom.
    pub fn from_parts(ranks: Vec<usize>, symmetry_classes: Vec<usize>) -> Self {
        debug_assert_eq!(ranks.len(), symmetry_classes.len());
        Self {
            ranks,
            symmetry_classes,
        }
    }

    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    pub fn symmetry_classes(&self) -> &[usize] {
        &self.symmetry_classes
    }
}

impl CanonicalLabeling for GraphLabeling {
    fn rank_of(&self, atom: NodeIndex) -> usize {
        self.ranks[atom.index()]
    }

    fn symmetry_class_of(&self, atom: NodeIndex) -> usize {
        self.symmetry_classes[atom.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct AtomInvariant {
    atomic_num: u8,
    degree: u8,
    hydrogen_count: u8,
    formal_charge: i8,
    isotope: u16,
    singles: u8,
    doubles: u8,
    triples: u8,
}

fn atom_invariant<A, B>(mol: &Mol<A, B>, idx: NodeIndex) -> AtomInvariant
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge + HasIsotope,
    B: HasBondOrder,
{
    let atom = mol.atom(idx);
    let mut singles: u8 = 0;
    let mut doubles: u8 = 0;
    let mut triples: u8 = 0;
    for edge in mol.bonds_of(idx) {
        match mol.bond(edge).bond_order() {
            BondOrder::Single => singles += 1,
            BondOrder::Double => doubles += 1,
            BondOrder::Triple => triples += 1,
        }
    }
    AtomInvariant {
        atomic_num: atom.atomic_num(),
        degree: mol.degree(idx) as u8,
        hydrogen_count: atom.hydrogen_count(),
        formal_charge: atom.formal_charge(),
        isotope: atom.isotope(),
        singles,
        doubles,
        triples,
    }
}

/// Rank of each key: the number of keys strictly smaller than it.
fn ranks_from_keys<K: Ord>(keys: &[K]) -> Vec<usize> {
    let n = keys.len();
    let mut indices: Vec<usize> = (0..n).collect();
    indices.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
    let mut ranks = vec![0usize; n];
    for i in 1..n {
        ranks[indices[i]] = if keys[indices[i]] == keys[indices[i - 1]] {
            ranks[indices[i - 1]]
        } else {
            i
        };
    }
    ranks
}

fn count_distinct(ranks: &[usize]) -> usize {
    let mut sorted: Vec<usize> = ranks.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len()
}

fn neighbor_ranks<A, B>(mol: &Mol<A, B>, node: NodeIndex, ranks: &[usize]) -> Vec<usize> {
    let mut nb: Vec<usize> = mol.neighbors(node).map(|nb| ranks[nb.index()]).collect();
    nb.sort_unstable();
    nb
}

/// Split classes by the ranks of their neighbors until nothing splits.
/// Existing class order is kept.
fn refine<A, B>(mol: &Mol<A, B>, ranks: &mut Vec<usize>) {
    let mut prev_distinct = count_distinct(ranks);
    loop {
        let keys: Vec<(usize, Vec<usize>)> = mol
            .atoms()
            .map(|node| (ranks[node.index()], neighbor_ranks(mol, node, ranks)))
            .collect();
        let new_ranks = ranks_from_keys(&keys);
        let distinct = count_distinct(&new_ranks);
        if distinct <= prev_distinct {
            return;
        }
        *ranks = new_ranks;
        prev_distinct = distinct;
    }
}

fn break_ties<A, B>(mol: &Mol<A, B>, ranks: &mut Vec<usize>, invariants: &[AtomInvariant]) {
    let n = ranks.len();
    while count_distinct(ranks) < n {
        let Some(tied_rank) = smallest_tied_rank(ranks) else {
            return;
        };
        let tied_atoms: Vec<usize> = (0..n).filter(|&i| ranks[i] == tied_rank).collect();

        // Individualize each candidate in turn: it keeps the class rank and
        // its classmates move up by one, then everything is refined again.
        let mut best: Option<(Vec<(AtomInvariant, Vec<usize>)>, Vec<usize>)> = None;
        for &candidate in &tied_atoms {
            let mut trial = ranks.clone();
            for &other in &tied_atoms {
                if other != candidate {
                    trial[other] = tied_rank + 1;
                }
            }
            refine(mol, &mut trial);

            let mut order: Vec<usize> = (0..n).collect();
            order.sort_by_key(|&i| trial[i]);
            let trace: Vec<(AtomInvariant, Vec<usize>)> = order
                .iter()
                .map(|&i| {
                    let nb = neighbor_ranks(mol, NodeIndex::new(i), &trial);
                    (invariants[i].clone(), nb)
                })
                .collect();
            if best.as_ref().map_or(true, |(best_trace, _)| trace < *best_trace) {
                best = Some((trace, trial));
            }
        }
        match best {
            Some((_, trial)) => *ranks = trial,
            None => return,
        }
    }
}

fn smallest_tied_rank(ranks: &[usize]) -> Option<usize> {
    let mut sorted: Vec<usize> = ranks.to_vec();
    sorted.sort_unstable();
    sorted.windows(2).find(|w| w[0] == w[1]).map(|w| w[0])
}
