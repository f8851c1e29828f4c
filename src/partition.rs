//! Regrouping a flat ring list into ring systems.
//!
//! Two rings belong to the same group when they share an atom, directly or
//! through a chain of other rings. Spiro, fused and bridged rings all end up
//! together; rings joined only by an acyclic linker do not.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use petgraph::graph::NodeIndex;
use petgraph::unionfind::UnionFind;

use crate::error::RingError;
use crate::graph_ops::induced_fragment;
use crate::mol::Mol;
use crate::rings::Ring;

/// Group `rings` into connected clusters of atom-sharing rings.
///
/// Groups are ordered by their first ring, and each group keeps the input
/// order of its rings.
pub fn partition_rings(rings: &[Ring]) -> Vec<Vec<Ring>> {
    let mut sets = UnionFind::<usize>::new(rings.len());
    let mut first_ring: HashMap<usize, usize> = HashMap::new();
    for (i, ring) in rings.iter().enumerate() {
        for &v in ring.vertices() {
            match first_ring.entry(v) {
                Entry::Occupied(e) => {
                    sets.union(*e.get(), i);
                }
                Entry::Vacant(e) => {
                    e.insert(i);
                }
            }
        }
    }

    let mut group_of: HashMap<usize, usize> = HashMap::new();
    let mut groups: Vec<Vec<Ring>> = Vec::new();
    for (i, ring) in rings.iter().enumerate() {
        let root = sets.find_mut(i);
        let g = *group_of.entry(root).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[g].push(ring.clone());
    }
    groups
}

/// Merge a ring group into one molecule holding its atoms and ring bonds.
///
/// Atoms appear in order of first occurrence. Bonds between two ring atoms
/// that are not themselves ring edges (a chord not in any given ring) are
/// left out.
pub fn convert_to_mol<A: Clone, B: Clone>(
    mol: &Mol<A, B>,
    rings: &[Ring],
) -> Result<Mol<A, B>, RingError> {
    let mut seen = HashSet::new();
    let mut atoms = Vec::new();
    for ring in rings {
        for atom in ring.atoms() {
            mol.index_of(atom)?;
            if seen.insert(atom) {
                atoms.push(atom);
            }
        }
    }
    let ring_bonds: HashSet<(usize, usize)> = rings.iter().flat_map(Ring::bonds).collect();
    Ok(induced_fragment(mol, &atoms, |_, a: NodeIndex, b: NodeIndex| {
        let (a, b) = (a.index(), b.index());
        ring_bonds.contains(&(a.min(b), a.max(b)))
    }))
}
