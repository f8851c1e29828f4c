//! Cyclic vertex search: biconnected decomposition into ring systems.
//!
//! A single depth-first pass (Hopcroft–Tarjan discovery times and low links)
//! splits the graph into blocks. Every block with at least three vertices
//! contains a cycle and becomes a ring system; two-vertex blocks are bridges.
//! The DFS runs on an explicit work stack so long acyclic chains never hit a
//! recursion limit.
//!
//! A vertex that joins two blocks (a spiro atom) is a member of both systems.
//! [`CyclicVertexSearch::vertex_color`] reports the lowest system id for such
//! a vertex, while the edge query checks every system the vertex belongs to.

use tracing::debug;

use crate::bits::{BitSet, VertexSet, WORD_BITS};
use crate::error::RingError;

const UNSET: usize = usize::MAX;

/// How a ring system is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemKind {
    /// A single simple cycle.
    Isolated,
    /// Several cycles sharing edges (ortho-fused or bridged).
    Fused,
}

/// Ring-system membership of every vertex, computed once at construction.
#[derive(Debug, Clone)]
pub struct CyclicVertexSearch {
    order: usize,
    membership: Membership,
    neighbors: Vec<Vec<usize>>,
    self_loops: Vec<bool>,
    systems: Vec<Vec<usize>>,
    kinds: Vec<SystemKind>,
    systems_of: Vec<Vec<usize>>,
    colors: Vec<Option<usize>>,
    cyclic: Vec<usize>,
    isolated: Vec<Vec<usize>>,
    fused: Vec<Vec<usize>>,
    circuit_rank: usize,
}

#[derive(Debug, Clone)]
enum Membership {
    Word(Vec<u64>),
    Wide(Vec<BitSet>),
}

impl Membership {
    fn contains(&self, system: usize, v: usize) -> bool {
        match self {
            Self::Word(sets) => sets[system].contains(v),
            Self::Wide(sets) => sets[system].contains(v),
        }
    }
}

struct Block<S> {
    set: S,
    edges: usize,
}

impl CyclicVertexSearch {
    /// Run the search over an adjacency list with dense vertex ids `0..graph.len()`.
    ///
    /// Self-loops and parallel edges are accepted. A neighbour outside the
    /// vertex range is rejected with [`RingError::VertexOutOfRange`].
    pub fn new(graph: &[Vec<usize>]) -> Result<Self, RingError> {
        let order = graph.len();
        let (neighbors, self_loops) = simplify(graph)?;

        let search = if order <= WORD_BITS {
            Self::build::<u64>(order, neighbors, self_loops, Membership::Word)
        } else {
            Self::build::<BitSet>(order, neighbors, self_loops, Membership::Wide)
        };

        debug!(
            vertices = order,
            jumbo = search.is_jumbo(),
            isolated = search.isolated.len(),
            fused = search.fused.len(),
            "cyclic vertex search"
        );
        Ok(search)
    }

    fn build<S: VertexSet>(
        order: usize,
        neighbors: Vec<Vec<usize>>,
        self_loops: Vec<bool>,
        wrap: fn(Vec<S>) -> Membership,
    ) -> Self {
        let mut blocks: Vec<Block<S>> = biconnected_blocks(&neighbors);

        let mut circuit_rank: usize = blocks.iter().map(|b| b.edges + 1 - b.set.len()).sum();
        circuit_rank += self_loops.iter().filter(|&&l| l).count();

        // A self-loop alone still closes a ring.
        for v in (0..order).filter(|&v| self_loops[v]) {
            if !blocks.iter().any(|b| b.set.contains(v)) {
                let mut set = S::with_order(order);
                set.insert(v);
                blocks.push(Block { set, edges: 1 });
            }
        }

        let mut members: Vec<(Vec<usize>, S)> = blocks
            .into_iter()
            .map(|b| (b.set.to_vec(), b.set))
            .collect();
        members.sort_by(|a, b| a.0.cmp(&b.0));

        let mut systems = Vec::with_capacity(members.len());
        let mut sets = Vec::with_capacity(members.len());
        let mut kinds = Vec::with_capacity(members.len());
        let mut systems_of = vec![Vec::new(); order];
        let mut colors = vec![None; order];
        let mut in_ring = S::with_order(order);
        let mut isolated = Vec::new();
        let mut fused = Vec::new();

        for (id, (vertices, set)) in members.into_iter().enumerate() {
            let kind = if is_simple_cycle(&vertices, &set, &neighbors) {
                isolated.push(vertices.clone());
                SystemKind::Isolated
            } else {
                fused.push(vertices.clone());
                SystemKind::Fused
            };
            for &v in &vertices {
                systems_of[v].push(id);
                if colors[v].is_none() {
                    colors[v] = Some(id);
                }
            }
            in_ring.union_with(&set);
            kinds.push(kind);
            systems.push(vertices);
            sets.push(set);
        }

        Self {
            order,
            membership: wrap(sets),
            neighbors,
            self_loops,
            systems,
            kinds,
            systems_of,
            colors,
            cyclic: in_ring.to_vec(),
            isolated,
            fused,
            circuit_rank,
        }
    }

    /// Number of vertices in the searched graph.
    pub fn order(&self) -> usize {
        self.order
    }

    /// All vertices lying on at least one cycle, ascending.
    pub fn cyclic(&self) -> &[usize] {
        &self.cyclic
    }

    /// Whether `v` lies on a cycle. Out-of-range vertices are not cyclic.
    pub fn is_cyclic(&self, v: usize) -> bool {
        self.colors.get(v).is_some_and(Option::is_some)
    }

    /// Whether `u` and `v` are members of one ring system.
    ///
    /// Adjacency is not checked. For an actual bond this is exactly "the bond
    /// is in a ring", since two adjacent members of one biconnected block are
    /// always joined by an edge of that block.
    pub fn is_cyclic_edge(&self, u: usize, v: usize) -> bool {
        if u >= self.order || v >= self.order {
            return false;
        }
        self.systems_of[u]
            .iter()
            .any(|&id| self.membership.contains(id, v))
    }

    /// One ascending vertex array per isolated ring system.
    pub fn isolated(&self) -> &[Vec<usize>] {
        &self.isolated
    }

    /// One ascending vertex array per fused ring system.
    pub fn fused(&self) -> &[Vec<usize>] {
        &self.fused
    }

    /// Per-vertex ring system id, `None` for acyclic vertices.
    pub fn vertex_color(&self) -> &[Option<usize>] {
        &self.colors
    }

    pub fn num_systems(&self) -> usize {
        self.systems.len()
    }

    /// Vertices of system `id`, ascending. Ids order systems by their members.
    pub fn system(&self, id: usize) -> &[usize] {
        &self.systems[id]
    }

    pub fn system_kind(&self, id: usize) -> SystemKind {
        self.kinds[id]
    }

    /// Ids of every system containing `v`; more than one only for spiro atoms.
    pub fn systems_of(&self, v: usize) -> &[usize] {
        self.systems_of.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of independent cycles (the cyclomatic number of the ring part).
    pub fn circuit_rank(&self) -> usize {
        self.circuit_rank
    }

    /// Deduplicated adjacency without self-loops, as searched.
    pub(crate) fn neighbors(&self) -> &[Vec<usize>] {
        &self.neighbors
    }

    pub(crate) fn has_self_loop(&self, v: usize) -> bool {
        self.self_loops.get(v).copied().unwrap_or(false)
    }

    /// Whether the multi-word bitset backend is in use.
    pub fn is_jumbo(&self) -> bool {
        matches!(self.membership, Membership::Wide(_))
    }
}

/// Validate, drop self-loops and collapse parallel edges.
fn simplify(graph: &[Vec<usize>]) -> Result<(Vec<Vec<usize>>, Vec<bool>), RingError> {
    let order = graph.len();
    let mut self_loops = vec![false; order];
    let mut neighbors = Vec::with_capacity(order);
    for (v, adj) in graph.iter().enumerate() {
        let mut out: Vec<usize> = Vec::with_capacity(adj.len());
        for &w in adj {
            if w >= order {
                return Err(RingError::VertexOutOfRange { vertex: w, order });
            }
            if w == v {
                self_loops[v] = true;
            } else if !out.contains(&w) {
                out.push(w);
            }
        }
        neighbors.push(out);
    }
    // Half-listed edges count as undirected.
    for v in 0..order {
        for i in 0..neighbors[v].len() {
            let w = neighbors[v][i];
            if !neighbors[w].contains(&v) {
                neighbors[w].push(v);
            }
        }
    }
    Ok((neighbors, self_loops))
}

fn biconnected_blocks<S: VertexSet>(neighbors: &[Vec<usize>]) -> Vec<Block<S>> {
    let n = neighbors.len();
    let mut disc = vec![0usize; n];
    let mut low = vec![0usize; n];
    let mut parent = vec![UNSET; n];
    let mut next_edge = vec![0usize; n];
    let mut edges: Vec<(usize, usize)> = Vec::new();
    let mut blocks = Vec::new();
    let mut timer = 1;

    for root in 0..n {
        if disc[root] != 0 {
            continue;
        }
        disc[root] = timer;
        low[root] = timer;
        timer += 1;
        let mut u = root;
        loop {
            if let Some(&w) = neighbors[u].get(next_edge[u]) {
                next_edge[u] += 1;
                if w == parent[u] {
                    continue;
                }
                if disc[w] == 0 {
                    edges.push((u, w));
                    parent[w] = u;
                    disc[w] = timer;
                    low[w] = timer;
                    timer += 1;
                    u = w;
                } else if disc[w] < disc[u] {
                    edges.push((u, w));
                    low[u] = low[u].min(disc[w]);
                }
                continue;
            }

            let p = parent[u];
            if p == UNSET {
                break;
            }
            low[p] = low[p].min(low[u]);
            if low[u] >= disc[p] {
                let mut block = Vec::new();
                while let Some(edge) = edges.pop() {
                    block.push(edge);
                    if edge == (p, u) {
                        break;
                    }
                }
                // A single edge is a bridge.
                if block.len() > 1 {
                    let mut set = S::with_order(n);
                    for &(a, b) in &block {
                        set.insert(a);
                        set.insert(b);
                    }
                    blocks.push(Block {
                        set,
                        edges: block.len(),
                    });
                }
            }
            u = p;
        }
    }
    blocks
}

fn is_simple_cycle<S: VertexSet>(vertices: &[usize], set: &S, neighbors: &[Vec<usize>]) -> bool {
    vertices.iter().all(|&v| {
        // Self-loop singletons have no in-system neighbours.
        let inside = neighbors[v].iter().filter(|&&w| set.contains(w)).count();
        inside == 2 || (vertices.len() == 1 && inside == 0)
    })
}
