use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::cyclic::{CyclicVertexSearch, SystemKind};
use crate::error::RingError;
use crate::graph_ops::{adjacency_list, induced_fragment};
use crate::mol::Mol;

/// Ring perception over a [`Mol`], answered in terms of atoms and bonds.
///
/// The adjacency list is built once and handed to [`CyclicVertexSearch`];
/// every query afterwards is a lookup.
///
/// # Examples
///
/// ```
/// use ringcrab::{Atom, Bond, Mol, RingSearch};
///
/// // Methylcyclopropane: a triangle with one substituent.
/// let mut mol = Mol::<Atom, Bond>::new();
/// let atoms: Vec<_> = (0..4).map(|_| mol.add_atom(Atom::new(6))).collect();
/// mol.add_bond(atoms[0], atoms[1], Bond::default());
/// mol.add_bond(atoms[1], atoms[2], Bond::default());
/// mol.add_bond(atoms[2], atoms[0], Bond::default());
/// let methyl = mol.add_bond(atoms[0], atoms[3], Bond::default());
///
/// let rs = RingSearch::new(&mol).unwrap();
/// assert_eq!(rs.cyclic_atoms(), &atoms[..3]);
/// assert!(!rs.cyclic_bond(methyl).unwrap());
/// assert_eq!(rs.ring_fragments().bond_count(), 3);
/// ```
pub struct RingSearch<'a, A, B> {
    mol: &'a Mol<A, B>,
    search: CyclicVertexSearch,
}

impl<'a, A, B> RingSearch<'a, A, B> {
    pub fn new(mol: &'a Mol<A, B>) -> Result<Self, RingError> {
        let search = CyclicVertexSearch::new(&adjacency_list(mol))?;
        Ok(Self { mol, search })
    }

    pub fn mol(&self) -> &'a Mol<A, B> {
        self.mol
    }

    /// The underlying index-level search.
    pub fn search(&self) -> &CyclicVertexSearch {
        &self.search
    }

    pub fn cyclic_atom(&self, atom: NodeIndex) -> Result<bool, RingError> {
        Ok(self.search.is_cyclic(self.mol.index_of(atom)?))
    }

    /// Whether `bond` lies in a ring.
    pub fn cyclic_bond(&self, bond: EdgeIndex) -> Result<bool, RingError> {
        let (a, b) = self.mol.bond_index_of(bond)?;
        Ok(self.edge_in_ring(a, b))
    }

    /// Whether `a` and `b` are bonded and that bond lies in a ring.
    pub fn cyclic_pair(&self, a: NodeIndex, b: NodeIndex) -> Result<bool, RingError> {
        let (u, v) = (self.mol.index_of(a)?, self.mol.index_of(b)?);
        Ok(self.mol.bond_between(a, b).is_some() && self.edge_in_ring(u, v))
    }

    fn edge_in_ring(&self, u: usize, v: usize) -> bool {
        if u == v {
            self.search.is_cyclic(u)
        } else {
            self.search.is_cyclic_edge(u, v)
        }
    }

    /// Cyclic atoms in index order.
    pub fn cyclic_atoms(&self) -> Vec<NodeIndex> {
        self.search
            .cyclic()
            .iter()
            .map(|&v| NodeIndex::new(v))
            .collect()
    }

    /// Ring bonds in index order.
    pub fn cyclic_bonds(&self) -> Vec<EdgeIndex> {
        self.mol
            .bonds()
            .filter(|&e| {
                self.mol
                    .bond_endpoints(e)
                    .is_some_and(|(a, b)| self.edge_in_ring(a.index(), b.index()))
            })
            .collect()
    }

    pub fn isolated(&self) -> Vec<Vec<NodeIndex>> {
        to_atoms(self.search.isolated())
    }

    pub fn fused(&self) -> Vec<Vec<NodeIndex>> {
        to_atoms(self.search.fused())
    }

    /// Per-atom ring system id, `None` for acyclic atoms.
    pub fn vertex_color(&self) -> &[Option<usize>] {
        self.search.vertex_color()
    }

    pub fn num_ring_systems(&self) -> usize {
        self.search.num_systems()
    }
}

impl<A: Clone, B: Clone> RingSearch<'_, A, B> {
    /// All cyclic atoms and all ring bonds as one molecule.
    ///
    /// Bonds joining two different ring systems are left out even though both
    /// of their atoms are cyclic.
    pub fn ring_fragments(&self) -> Mol<A, B> {
        let atoms = self.cyclic_atoms();
        induced_fragment(self.mol, &atoms, |_, a, b| {
            self.edge_in_ring(a.index(), b.index())
        })
    }

    /// One molecule per isolated ring system.
    pub fn isolated_ring_fragments(&self) -> Vec<Mol<A, B>> {
        self.system_fragments(SystemKind::Isolated)
    }

    /// One molecule per fused ring system.
    pub fn fused_ring_fragments(&self) -> Vec<Mol<A, B>> {
        self.system_fragments(SystemKind::Fused)
    }

    fn system_fragments(&self, kind: SystemKind) -> Vec<Mol<A, B>> {
        (0..self.search.num_systems())
            .filter(|&id| self.search.system_kind(id) == kind)
            .map(|id| {
                let atoms: Vec<NodeIndex> = self
                    .search
                    .system(id)
                    .iter()
                    .map(|&v| NodeIndex::new(v))
                    .collect();
                induced_fragment(self.mol, &atoms, |_, a, b| {
                    a == b
                        || (self.search.systems_of(a.index()).contains(&id)
                            && self.search.systems_of(b.index()).contains(&id))
                })
            })
            .collect()
    }
}

fn to_atoms(groups: &[Vec<usize>]) -> Vec<Vec<NodeIndex>> {
    groups
        .iter()
        .map(|g| g.iter().map(|&v| NodeIndex::new(v)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::bond::{Bond, BondOrder};

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn mol_from_edges(count: usize, edges: &[(usize, usize)]) -> Mol<Atom, Bond> {
        let mut mol = Mol::new();
        for _ in 0..count {
            mol.add_atom(Atom::new(6));
        }
        for &(a, b) in edges {
            mol.add_bond(n(a), n(b), Bond::new(BondOrder::Single));
        }
        mol
    }

    fn hexagon(offset: usize) -> Vec<(usize, usize)> {
        (0..6).map(|i| (offset + i, offset + (i + 1) % 6)).collect()
    }

    fn biphenyl() -> Mol<Atom, Bond> {
        let mut edges = hexagon(0);
        edges.extend(hexagon(6));
        edges.push((0, 6));
        mol_from_edges(12, &edges)
    }

    #[test]
    fn biphenyl_linker_is_not_a_ring_bond() {
        let mol = biphenyl();
        let rs = RingSearch::new(&mol).unwrap();
        assert!(rs.cyclic_atom(n(0)).unwrap());
        assert!(rs.cyclic_atom(n(6)).unwrap());
        assert!(!rs.cyclic_pair(n(0), n(6)).unwrap());
        let linker = mol.bond_between(n(0), n(6)).unwrap();
        assert!(!rs.cyclic_bond(linker).unwrap());
        assert_eq!(rs.cyclic_bonds().len(), 12);
    }

    #[test]
    fn biphenyl_fragments() {
        let mol = biphenyl();
        let rs = RingSearch::new(&mol).unwrap();
        let all = rs.ring_fragments();
        assert_eq!(all.atom_count(), 12);
        assert_eq!(all.bond_count(), 12);

        let isolated = rs.isolated_ring_fragments();
        assert_eq!(isolated.len(), 2);
        for frag in &isolated {
            assert_eq!(frag.atom_count(), 6);
            assert_eq!(frag.bond_count(), 6);
        }
        assert!(rs.fused_ring_fragments().is_empty());
    }

    #[test]
    fn cyclic_pair_requires_bond() {
        let mol = mol_from_edges(6, &hexagon(0));
        let rs = RingSearch::new(&mol).unwrap();
        assert!(rs.cyclic_pair(n(0), n(1)).unwrap());
        assert!(!rs.cyclic_pair(n(0), n(3)).unwrap());
    }

    #[test]
    fn unknown_atom_is_an_error() {
        let mol = mol_from_edges(6, &hexagon(0));
        let rs = RingSearch::new(&mol).unwrap();
        assert_eq!(
            rs.cyclic_atom(n(42)).unwrap_err(),
            RingError::AtomNotFound {
                index: 42,
                atom_count: 6
            }
        );
        assert!(rs.cyclic_pair(n(0), n(6)).is_err());
        assert_eq!(
            rs.cyclic_bond(EdgeIndex::new(9)).unwrap_err(),
            RingError::BondNotFound {
                index: 9,
                bond_count: 6
            }
        );
    }

    #[test]
    fn naphthalene_fused_fragment() {
        let mut edges: Vec<_> = (0..10).map(|i| (i, (i + 1) % 10)).collect();
        edges.push((0, 5));
        edges.push((3, 10)); // substituent
        let mol = mol_from_edges(11, &edges);
        let rs = RingSearch::new(&mol).unwrap();
        assert!(rs.isolated().is_empty());
        assert_eq!(rs.fused().len(), 1);
        assert_eq!(rs.fused()[0].len(), 10);
        let frags = rs.fused_ring_fragments();
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].atom_count(), 10);
        assert_eq!(frags[0].bond_count(), 11);
        assert_eq!(rs.ring_fragments().bond_count(), 11);
        assert_eq!(rs.vertex_color()[10], None);
    }

    #[test]
    fn spiro_fragments_share_the_spiro_atom() {
        let mut edges = hexagon(0);
        edges.extend([(0, 6), (6, 7), (7, 8), (8, 9), (9, 10), (10, 0)]);
        let mol = mol_from_edges(11, &edges);
        let rs = RingSearch::new(&mol).unwrap();
        let frags = rs.isolated_ring_fragments();
        assert_eq!(frags.len(), 2);
        assert!(frags.iter().all(|f| f.atom_count() == 6 && f.bond_count() == 6));
        let all = rs.ring_fragments();
        assert_eq!(all.atom_count(), 11);
        assert_eq!(all.bond_count(), 12);
    }

    #[test]
    fn fragments_keep_payloads() {
        let mut mol = mol_from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        mol.atom_mut(n(1)).atomic_num = 8;
        let rs = RingSearch::new(&mol).unwrap();
        let frag = rs.ring_fragments();
        assert_eq!(frag.atom(n(1)).atomic_num, 8);
    }

    #[test]
    fn acyclic_molecule() {
        let mol = mol_from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let rs = RingSearch::new(&mol).unwrap();
        assert!(rs.cyclic_atoms().is_empty());
        assert!(rs.cyclic_bonds().is_empty());
        assert_eq!(rs.ring_fragments().atom_count(), 0);
        assert_eq!(rs.num_ring_systems(), 0);
    }
}
