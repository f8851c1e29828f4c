use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::mol::Mol;

/// Adjacency list of `mol` over dense atom indices, in bond insertion order.
pub fn adjacency_list<A, B>(mol: &Mol<A, B>) -> Vec<Vec<usize>> {
    let mut adj = vec![Vec::new(); mol.atom_count()];
    for edge in mol.bonds() {
        if let Some((a, b)) = mol.bond_endpoints(edge) {
            adj[a.index()].push(b.index());
            if a != b {
                adj[b.index()].push(a.index());
            }
        }
    }
    adj
}

/// Adjacency list from an edge list. The list grows past `n` if an edge
/// names a larger vertex.
pub fn adjacency_from_edges(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let order = edges
        .iter()
        .map(|&(a, b)| a.max(b) + 1)
        .max()
        .map_or(n, |m| m.max(n));
    let mut adj = vec![Vec::new(); order];
    for &(a, b) in edges {
        adj[a].push(b);
        if a != b {
            adj[b].push(a);
        }
    }
    adj
}

/// Copy `atoms` and the bonds accepted by `keep_bond` into a new molecule.
///
/// Atoms are added in the given order. A bond is considered only when both of
/// its endpoints are in `atoms`, and is added once.
pub fn induced_fragment<A: Clone, B: Clone>(
    mol: &Mol<A, B>,
    atoms: &[NodeIndex],
    keep_bond: impl Fn(EdgeIndex, NodeIndex, NodeIndex) -> bool,
) -> Mol<A, B> {
    let mut frag = Mol::new();
    let mut index_map: Vec<Option<NodeIndex>> = vec![None; mol.atom_count()];
    for &old_idx in atoms {
        if index_map[old_idx.index()].is_none() {
            index_map[old_idx.index()] = Some(frag.add_atom(mol.atom(old_idx).clone()));
        }
    }
    for edge in mol.bonds() {
        let Some((a, b)) = mol.bond_endpoints(edge) else {
            continue;
        };
        let (Some(new_a), Some(new_b)) = (index_map[a.index()], index_map[b.index()]) else {
            continue;
        };
        if keep_bond(edge, a, b) {
            frag.add_bond(new_a, new_b, mol.bond(edge).clone());
        }
    }
    frag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::bond::Bond;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn propanol() -> Mol<Atom, Bond> {
        let mut mol = Mol::new();
        let c1 = mol.add_atom(Atom::new(6));
        let c2 = mol.add_atom(Atom::new(6));
        let c3 = mol.add_atom(Atom::new(6));
        let o = mol.add_atom(Atom::new(8));
        mol.add_bond(c1, c2, Bond::default());
        mol.add_bond(c2, c3, Bond::default());
        mol.add_bond(c3, o, Bond::default());
        mol
    }

    #[test]
    fn adjacency_list_is_symmetric() {
        let adj = adjacency_list(&propanol());
        assert_eq!(adj, vec![vec![1], vec![0, 2], vec![1, 3], vec![2]]);
    }

    #[test]
    fn adjacency_from_edges_grows() {
        let adj = adjacency_from_edges(2, &[(0, 3)]);
        assert_eq!(adj.len(), 4);
        assert_eq!(adj[3], vec![0]);
        assert!(adjacency_from_edges(3, &[]).iter().all(Vec::is_empty));
    }

    #[test]
    fn self_loop_listed_once() {
        let adj = adjacency_from_edges(1, &[(0, 0)]);
        assert_eq!(adj, vec![vec![0]]);
    }

    #[test]
    fn induced_fragment_keeps_internal_bonds() {
        let mol = propanol();
        let frag = induced_fragment(&mol, &[n(1), n(2), n(3)], |_, _, _| true);
        assert_eq!(frag.atom_count(), 3);
        assert_eq!(frag.bond_count(), 2);
        assert_eq!(frag.atom(n(2)).atomic_num, 8);
    }

    #[test]
    fn induced_fragment_filters_bonds() {
        let mol = propanol();
        let frag = induced_fragment(&mol, &[n(0), n(1), n(2)], |_, a, _| a != n(0));
        assert_eq!(frag.atom_count(), 3);
        assert_eq!(frag.bond_count(), 1);
    }

    #[test]
    fn induced_fragment_ignores_duplicate_atoms() {
        let mol = propanol();
        let frag = induced_fragment(&mol, &[n(0), n(1), n(0)], |_, _, _| true);
        assert_eq!(frag.atom_count(), 2);
        assert_eq!(frag.bond_count(), 1);
    }
}
