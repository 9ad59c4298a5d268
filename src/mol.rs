use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::stereo::StereoDescriptor;

/// A molecule: atoms and bonds in an undirected petgraph graph, plus the
/// extended stereocenters known for it.
///
/// At most one descriptor is kept per focus atom.
pub struct Mol<A, B> {
    graph: UnGraph<A, B>,
    stereo: Vec<StereoDescriptor>,
}

impl<A, B> Mol<A, B> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            stereo: Vec::new(),
        }
    }

    pub fn graph(&self) -> &UnGraph<A, B> {
        &self.graph
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut A {
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        self.graph.add_node(atom)
    }

    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    /// Neighbors of `idx` in the order their bonds were added.
    ///
    /// This is the input order the classifier sees, so it must not depend on
    /// petgraph's adjacency list layout.
    pub fn ligands(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges(idx)
            .map(|e| {
                let other = if e.source() == idx {
                    e.target()
                } else {
                    e.source()
                };
                (e.id(), other)
            })
            .collect();
        edges.sort_by_key(|&(edge, _)| edge);
        edges.into_iter().map(|(_, other)| other).collect()
    }

    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges(idx).count()
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn stereo(&self) -> &[StereoDescriptor] {
        &self.stereo
    }

    pub fn set_stereo(&mut self, stereo: Vec<StereoDescriptor>) {
        self.stereo = stereo;
    }

    pub fn stereo_for(&self, focus: NodeIndex) -> Option<&StereoDescriptor> {
        self.stereo.iter().find(|s| s.focus() == focus)
    }

    /// Attach a descriptor, replacing any earlier one on the same focus.
    pub fn add_stereo(&mut self, stereo: StereoDescriptor) {
        self.remove_stereo(stereo.focus());
        self.stereo.push(stereo);
    }

    pub fn remove_stereo(&mut self, focus: NodeIndex) {
        self.stereo.retain(|s| s.focus() != focus);
    }
}

impl<A: Clone, B: Clone> Clone for Mol<A, B> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            stereo: self.stereo.clone(),
        }
    }
}

impl<A, B> Default for Mol<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Mol<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mol")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .field("stereo", &self.stereo)
            .finish()
    }
}
