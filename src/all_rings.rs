//! Exhaustive enumeration of every simple cycle.
//!
//! The graph is first split into ring systems by [`CyclicVertexSearch`].
//! Rings never cross a system boundary, so each system is searched on its
//! own. An isolated system is a single ring and is read off directly; a fused
//! system is searched by growing simple paths from each start vertex through
//! higher-numbered vertices of the same system and closing a ring whenever a
//! path returns to its start.
//!
//! The number of rings in a fused system grows exponentially with its size,
//! so every search runs under a [`RingLimits`] policy and an optional
//! [`CancelFlag`]. Both are checked at every path extension.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::cyclic::{CyclicVertexSearch, SystemKind};
use crate::error::{Limit, RingError};
use crate::graph_ops::adjacency_list;
use crate::mol::Mol;
use crate::rings::Ring;

/// What to return when a limit stops the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnLimit {
    /// Return the rings found so far, flagged as incomplete.
    #[default]
    Partial,
    /// Fail with [`RingError::LimitExceeded`].
    Fail,
}

/// Bounds on an exhaustive ring search. The default is unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RingLimits {
    /// Largest ring to report, in vertices.
    pub max_ring_size: Option<usize>,
    /// Most rings to report before stopping.
    pub max_rings: Option<usize>,
    /// Wall-clock budget for one search.
    pub timeout: Option<Duration>,
    pub on_limit: OnLimit,
}

impl RingLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_ring_size(mut self, size: usize) -> Self {
        self.max_ring_size = Some(size);
        self
    }

    pub fn with_max_rings(mut self, count: usize) -> Self {
        self.max_rings = Some(count);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_on_limit(mut self, on_limit: OnLimit) -> Self {
        self.on_limit = on_limit;
        self
    }
}

/// A shared flag for cooperatively cancelling a running search.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Complete,
    LimitReached(Limit),
}

/// Rings found by [`AllRingsFinder`], sorted by size and then by vertices.
#[derive(Debug, Clone)]
pub struct AllRings {
    rings: Vec<Ring>,
    outcome: SearchOutcome,
}

impl AllRings {
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn outcome(&self) -> SearchOutcome {
        self.outcome
    }

    pub fn is_complete(&self) -> bool {
        self.outcome == SearchOutcome::Complete
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn into_rings(self) -> Vec<Ring> {
        self.rings
    }
}

/// Finds every simple cycle of a graph, subject to [`RingLimits`].
///
/// # Examples
///
/// ```
/// use ringcrab::{AllRingsFinder, RingLimits};
///
/// // Two squares sharing the edge 1-4.
/// let graph = vec![
///     vec![1, 3],
///     vec![0, 2, 4],
///     vec![1, 5],
///     vec![0, 4],
///     vec![3, 1, 5],
///     vec![4, 2],
/// ];
/// let found = AllRingsFinder::new(RingLimits::unbounded()).find(&graph).unwrap();
/// assert_eq!(found.len(), 3);
/// assert!(found.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AllRingsFinder {
    limits: RingLimits,
    cancel: Option<CancelFlag>,
}

impl AllRingsFinder {
    pub fn new(limits: RingLimits) -> Self {
        Self {
            limits,
            cancel: None,
        }
    }

    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn limits(&self) -> &RingLimits {
        &self.limits
    }

    pub fn find_in_mol<A, B>(&self, mol: &Mol<A, B>) -> Result<AllRings, RingError> {
        self.find(&adjacency_list(mol))
    }

    pub fn find(&self, graph: &[Vec<usize>]) -> Result<AllRings, RingError> {
        let search = CyclicVertexSearch::new(graph)?;
        let neighbors = search.neighbors();
        let mut budget = Budget::new(&self.limits, self.cancel.as_ref());
        let mut in_system = vec![false; graph.len()];
        let mut rings = Vec::new();

        if budget.fits(1) {
            for v in (0..graph.len()).filter(|&v| search.has_self_loop(v)) {
                if !budget.step() || !budget.admit(&mut rings, Ring::from_cycle(&[v])) {
                    break;
                }
            }
        }

        for id in 0..search.num_systems() {
            if budget.stopped.is_some() {
                break;
            }
            let members = search.system(id);
            if members.len() < 3 {
                continue;
            }
            let before = rings.len();
            for &v in members {
                in_system[v] = true;
            }
            match search.system_kind(id) {
                SystemKind::Isolated => {
                    if budget.fits(members.len()) && budget.step() {
                        let ring = walk_cycle(members, neighbors, &in_system);
                        budget.admit(&mut rings, ring);
                    }
                }
                SystemKind::Fused => {
                    enumerate_system(members, neighbors, &in_system, &mut budget, &mut rings)
                }
            }
            for &v in members {
                in_system[v] = false;
            }
            debug!(
                system = id,
                size = members.len(),
                rings = rings.len() - before,
                "enumerated ring system"
            );
        }

        rings.sort();
        match budget.stopped {
            None => Ok(AllRings {
                rings,
                outcome: SearchOutcome::Complete,
            }),
            Some(limit) => {
                warn!(%limit, found = rings.len(), "ring search stopped early");
                match self.limits.on_limit {
                    OnLimit::Partial => Ok(AllRings {
                        rings,
                        outcome: SearchOutcome::LimitReached(limit),
                    }),
                    OnLimit::Fail => Err(RingError::LimitExceeded {
                        limit,
                        found: rings.len(),
                    }),
                }
            }
        }
    }
}

struct Budget<'a> {
    max_ring_size: usize,
    max_rings: Option<usize>,
    deadline: Option<Instant>,
    cancel: Option<&'a CancelFlag>,
    stopped: Option<Limit>,
}

impl<'a> Budget<'a> {
    fn new(limits: &RingLimits, cancel: Option<&'a CancelFlag>) -> Self {
        Self {
            max_ring_size: limits.max_ring_size.unwrap_or(usize::MAX),
            max_rings: limits.max_rings,
            // A timeout past the clock's range means no deadline.
            deadline: limits.timeout.and_then(|t| Instant::now().checked_add(t)),
            cancel,
            stopped: None,
        }
    }

    fn fits(&self, size: usize) -> bool {
        size <= self.max_ring_size
    }

    /// Returns false once the search must stop.
    fn step(&mut self) -> bool {
        if self.stopped.is_some() {
            return false;
        }
        if self.cancel.is_some_and(CancelFlag::is_cancelled) {
            self.stopped = Some(Limit::Cancelled);
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            self.stopped = Some(Limit::Deadline);
        }
        self.stopped.is_none()
    }

    fn admit(&mut self, rings: &mut Vec<Ring>, ring: Ring) -> bool {
        if let Some(max) = self.max_rings {
            if rings.len() >= max {
                self.stopped = Some(Limit::MaxRings(max));
                return false;
            }
        }
        rings.push(ring);
        true
    }
}

/// Walk a simple cycle from its smallest vertex toward its smaller neighbour.
fn walk_cycle(members: &[usize], neighbors: &[Vec<usize>], in_system: &[bool]) -> Ring {
    let start = members[0];
    let mut cycle = Vec::with_capacity(members.len());
    let mut prev = start;
    let mut cur = start;
    loop {
        cycle.push(cur);
        let next = neighbors[cur]
            .iter()
            .copied()
            .filter(|&w| in_system[w] && w != prev)
            .min();
        match next {
            Some(w) if w != start && cycle.len() < members.len() => {
                prev = cur;
                cur = w;
            }
            _ => break,
        }
    }
    Ring::from_cycle(&cycle)
}

/// Depth-first path extension over one fused system.
///
/// A ring is reported once: from its smallest vertex, in the direction whose
/// second vertex is smaller than its last.
fn enumerate_system(
    members: &[usize],
    neighbors: &[Vec<usize>],
    in_system: &[bool],
    budget: &mut Budget<'_>,
    rings: &mut Vec<Ring>,
) {
    let mut on_path = vec![false; neighbors.len()];
    for &start in members {
        let mut path = vec![start];
        let mut cursor = vec![0usize];
        on_path[start] = true;

        while let Some(&u) = path.last() {
            if !budget.step() {
                return;
            }
            let depth = path.len() - 1;
            let Some(&w) = neighbors[u].get(cursor[depth]) else {
                on_path[u] = false;
                path.pop();
                cursor.pop();
                continue;
            };
            cursor[depth] += 1;

            if !in_system[w] || w < start {
                continue;
            }
            if w == start {
                if path.len() >= 3 && path[1] < u && !budget.admit(rings, Ring::from_cycle(&path)) {
                    return;
                }
                continue;
            }
            if on_path[w] || !budget.fits(path.len() + 1) {
                continue;
            }
            on_path[w] = true;
            path.push(w);
            cursor.push(0);
        }
    }
}
