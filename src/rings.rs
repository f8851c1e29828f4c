use std::cmp::Ordering;

use petgraph::graph::NodeIndex;

/// One simple cycle as an ordered vertex sequence.
///
/// Rings are stored normalized: the smallest vertex comes first, and the
/// traversal direction is the one whose second vertex is smaller. Two rings
/// over the same cycle therefore compare equal regardless of where or in
/// which direction they were walked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ring {
    vertices: Vec<usize>,
}

impl Ring {
    /// Build a ring from any rotation or direction of a cycle.
    pub fn from_cycle(cycle: &[usize]) -> Self {
        Self {
            vertices: normalize_ring(cycle),
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.vertices.iter().map(|&v| NodeIndex::new(v))
    }

    pub fn contains(&self, v: usize) -> bool {
        self.vertices.contains(&v)
    }

    /// Ring bonds as `(low, high)` vertex pairs, in walk order.
    pub fn bonds(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let len = self.vertices.len();
        (0..len).map(move |i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % len];
            (a.min(b), a.max(b))
        })
    }

    pub fn contains_bond(&self, u: usize, v: usize) -> bool {
        let key = (u.min(v), u.max(v));
        self.bonds().any(|b| b == key)
    }
}

impl PartialOrd for Ring {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Smaller rings first, then lexicographic by vertex.
impl Ord for Ring {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.vertices.cmp(&other.vertices))
    }
}

fn normalize_ring(ring: &[usize]) -> Vec<usize> {
    let Some(min_pos) = ring
        .iter()
        .enumerate()
        .min_by_key(|&(_, v)| v)
        .map(|(i, _)| i)
    else {
        return vec![];
    };

    let len = ring.len();
    let mut normalized = Vec::with_capacity(len);
    for i in 0..len {
        normalized.push(ring[(min_pos + i) % len]);
    }

    if len > 2 && normalized[1] > normalized[len - 1] {
        normalized[1..].reverse();
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_and_direction_normalize() {
        let a = Ring::from_cycle(&[3, 4, 5, 0, 1, 2]);
        let b = Ring::from_cycle(&[2, 1, 0, 5, 4, 3]);
        assert_eq!(a, b);
        assert_eq!(a.vertices(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn reversed_walk() {
        let r = Ring::from_cycle(&[7, 2, 9, 4]);
        assert_eq!(r.vertices(), &[2, 7, 4, 9]);
    }

    #[test]
    fn bonds_wrap_around() {
        let r = Ring::from_cycle(&[0, 1, 2]);
        let bonds: Vec<_> = r.bonds().collect();
        assert_eq!(bonds, vec![(0, 1), (1, 2), (0, 2)]);
        assert!(r.contains_bond(2, 0));
        assert!(!r.contains_bond(0, 3));
    }

    #[test]
    fn ordering_by_size_then_vertices() {
        let mut rings = vec![
            Ring::from_cycle(&[0, 1, 2, 3, 4]),
            Ring::from_cycle(&[5, 6, 7]),
            Ring::from_cycle(&[0, 1, 2]),
        ];
        rings.sort();
        assert_eq!(rings[0].vertices(), &[0, 1, 2]);
        assert_eq!(rings[1].vertices(), &[5, 6, 7]);
        assert_eq!(rings[2].len(), 5);
    }

    #[test]
    fn atoms_are_node_indices() {
        let r = Ring::from_cycle(&[1, 3, 2]);
        let atoms: Vec<_> = r.atoms().collect();
        assert_eq!(atoms, vec![NodeIndex::new(1), NodeIndex::new(2), NodeIndex::new(3)]);
    }

    #[test]
    fn empty_cycle() {
        let r = Ring::from_cycle(&[]);
        assert!(r.is_empty());
        assert_eq!(r.bonds().count(), 0);
    }
}
