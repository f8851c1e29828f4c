use std::fmt;

/// The limit that stopped an [`AllRingsFinder`](crate::AllRingsFinder) search early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// The configured maximum number of rings was reached.
    MaxRings(usize),
    /// The configured timeout elapsed.
    Deadline,
    /// The caller raised the [`CancelFlag`](crate::CancelFlag).
    Cancelled,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxRings(n) => write!(f, "ring limit of {} reached", n),
            Self::Deadline => write!(f, "search deadline elapsed"),
            Self::Cancelled => write!(f, "search cancelled"),
        }
    }
}

/// Errors produced by ring perception.
///
/// Structural properties of a valid graph (disconnected parts, self-loops,
/// very large fused systems) are never errors. Only misuse is: bad indices,
/// or a limited search under [`OnLimit::Fail`](crate::OnLimit::Fail).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    /// An adjacency list refers to a vertex outside `0..order`.
    VertexOutOfRange { vertex: usize, order: usize },
    /// The atom does not belong to the molecule being searched.
    AtomNotFound { index: usize, atom_count: usize },
    /// The bond does not belong to the molecule being searched.
    BondNotFound { index: usize, bond_count: usize },
    /// An exhaustive search hit a limit and the caller asked for all or nothing.
    LimitExceeded { limit: Limit, found: usize },
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VertexOutOfRange { vertex, order } => {
                write!(
                    f,
                    "vertex {} out of range for graph with {} vertices",
                    vertex, order
                )
            }
            Self::AtomNotFound { index, atom_count } => {
                write!(
                    f,
                    "atom {} not found in molecule with {} atoms",
                    index, atom_count
                )
            }
            Self::BondNotFound { index, bond_count } => {
                write!(
                    f,
                    "bond {} not found in molecule with {} bonds",
                    index, bond_count
                )
            }
            Self::LimitExceeded { limit, found } => {
                write!(f, "{} after finding {} rings", limit, found)
            }
        }
    }
}

impl std::error::Error for RingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = RingError::VertexOutOfRange {
            vertex: 7,
            order: 3,
        };
        assert_eq!(
            e.to_string(),
            "vertex 7 out of range for graph with 3 vertices"
        );
        let e = RingError::LimitExceeded {
            limit: Limit::MaxRings(10),
            found: 10,
        };
        assert_eq!(e.to_string(), "ring limit of 10 reached after finding 10 rings");
    }
}
