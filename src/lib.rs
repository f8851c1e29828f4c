//! Ring perception for molecular graphs.
//!
//! [`CyclicVertexSearch`] splits an adjacency-list graph into ring systems
//! (isolated rings and fused/bridged systems) in one depth-first pass.
//! [`RingSearch`] answers the same questions for a [`Mol`] in terms of atoms
//! and bonds, and cuts ring fragments out of it. [`AllRingsFinder`]
//! enumerates every simple cycle under explicit limits, and
//! [`partition_rings`] regroups any ring list into atom-sharing clusters.

pub mod all_rings;
pub mod atom;
pub mod bits;
pub mod bond;
pub mod cyclic;
pub mod error;
pub mod graph_ops;
pub mod mol;
pub mod partition;
pub mod ring_search;
pub mod rings;

pub use all_rings::{AllRings, AllRingsFinder, CancelFlag, OnLimit, RingLimits, SearchOutcome};
pub use atom::Atom;
pub use bits::{BitSet, VertexSet};
pub use bond::{Bond, BondOrder};
pub use cyclic::{CyclicVertexSearch, SystemKind};
pub use error::{Limit, RingError};
pub use mol::Mol;
pub use partition::{convert_to_mol, partition_rings};
pub use ring_search::RingSearch;
pub use rings::Ring;
