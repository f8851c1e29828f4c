use serde::Deserialize;

use ringcrab::graph_ops::adjacency_from_edges;
use ringcrab::{AllRingsFinder, CyclicVertexSearch, RingLimits};

#[derive(Deserialize)]
struct RingSystemEntry {
    name: String,
    atoms: usize,
    edges: Vec<(usize, usize)>,
    num_cyclic: usize,
    isolated_sizes: Vec<usize>,
    fused_sizes: Vec<usize>,
    num_rings: usize,
}

fn sizes(groups: &[Vec<usize>]) -> Vec<usize> {
    let mut sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
    sizes.sort();
    sizes
}

#[test]
fn approval_ring_systems() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
    let data: Vec<RingSystemEntry> =
        serde_json::from_str(include_str!("approval_data/ring_systems.json")).unwrap();

    let mut failures = Vec::new();
    for entry in &data {
        let graph = adjacency_from_edges(entry.atoms, &entry.edges);
        let cvs = CyclicVertexSearch::new(&graph).unwrap();

        if cvs.cyclic().len() != entry.num_cyclic {
            failures.push(format!(
                "[cyclic] {}: expected {}, got {}",
                entry.name,
                entry.num_cyclic,
                cvs.cyclic().len()
            ));
        }

        let got = sizes(cvs.isolated());
        if got != entry.isolated_sizes {
            failures.push(format!(
                "[isolated] {}: expected {:?}, got {:?}",
                entry.name, entry.isolated_sizes, got
            ));
        }

        let got = sizes(cvs.fused());
        if got != entry.fused_sizes {
            failures.push(format!(
                "[fused] {}: expected {:?}, got {:?}",
                entry.name, entry.fused_sizes, got
            ));
        }

        let rings = AllRingsFinder::new(RingLimits::unbounded())
            .find(&graph)
            .unwrap();
        if rings.len() != entry.num_rings {
            failures.push(format!(
                "[all_rings] {}: expected {}, got {}",
                entry.name,
                entry.num_rings,
                rings.len()
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "{} ring system failures:\n{}",
            failures.len(),
            failures.join("\n")
        );
    }
}
