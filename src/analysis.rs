use num_traits::ToPrimitive;
use rayon::prelude::*;
use tracing::info;

use crate::graph::CommGraph;
use crate::{Error, PartitionSource, FACES_PER_ELEMENT};

/// Bytes per double-precision degree of freedom.
const DOF_BYTES: f64 = 8.0;
/// Quantities carried per basis function in the projected storage model.
const QUANTITIES: f64 = 9.0;

/// Per-partition communication counters and the partition adjacency graph,
/// filled by scanning the face-neighbour ranks of every partition.
pub struct CommAnalysis {
    edge_cut: Vec<u64>,
    comm_volume: Vec<u64>,
    total_edge_cut: u64,
    total_comm_volume: u64,
    graph: CommGraph,
}

impl CommAnalysis {
    /// Create zeroed counters for `partitions` partitions.
    pub fn new(partitions: u32) -> Self {
        let n = partitions as usize;
        Self {
            edge_cut: vec![0; n],
            comm_volume: vec![0; n],
            total_edge_cut: 0,
            total_comm_volume: 0,
            graph: CommGraph::new(partitions),
        }
    }

    /// Scan one partition's flat face-neighbour rank array.
    ///
    /// Every face whose neighbour rank differs from `part` counts towards
    /// the partition's edge cut and adds one crossing to the adjacency
    /// graph. The communication volume adds, per element, the number of
    /// distinct neighbour partitions among that element's faces.
    pub fn scan_partition(&mut self, part: u32, neighbor_ranks: &[u32]) {
        debug_assert_eq!(neighbor_ranks.len() % FACES_PER_ELEMENT, 0);

        let mut cut = 0u64;
        for faces in neighbor_ranks.chunks_exact(FACES_PER_ELEMENT) {
            for &rank in faces {
                if rank != part {
                    cut += 1;
                    self.graph.add_edge(part, rank);
                }
            }
        }

        let volume: u64 = neighbor_ranks
            .par_chunks_exact(FACES_PER_ELEMENT)
            .map(|faces| distinct_neighbors(faces, part) as u64)
            .sum();

        self.edge_cut[part as usize] += cut;
        self.comm_volume[part as usize] += volume;
        self.total_edge_cut += cut;
        self.total_comm_volume += volume;
    }

    /// The per-partition edge-cut counters.
    pub fn edge_cut(&self) -> &[u64] {
        &self.edge_cut
    }

    /// The per-partition communication-volume counters.
    pub fn comm_volume(&self) -> &[u64] {
        &self.comm_volume
    }

    pub fn total_edge_cut(&self) -> u64 {
        self.total_edge_cut
    }

    pub fn total_comm_volume(&self) -> u64 {
        self.total_comm_volume
    }

    /// The partition adjacency graph populated by the scan.
    pub fn graph(&self) -> &CommGraph {
        &self.graph
    }

    /// Ratio of total edge cut to total communication volume. Not finite
    /// when no inter-partition communication occurred.
    pub fn ratio(&self) -> f64 {
        self.total_edge_cut.to_f64().unwrap_or(0.0)
            / self.total_comm_volume.to_f64().unwrap_or(0.0)
    }

    /// Projected degrees-of-freedom storage in MB for a mesh of the given
    /// polynomial order, as `(edge cut cost, comm volume cost)`.
    ///
    /// Edge cut scales with the face basis size `order * (order + 1) / 2`,
    /// communication volume with the volume basis size
    /// `order * (order + 1) * (order + 2) / 6`.
    pub fn projected_cost_mb(&self, order: u32) -> (f64, f64) {
        let order = f64::from(order);
        let face_basis = order * (order + 1.0) / 2.0;
        let volume_basis = order * (order + 1.0) * (order + 2.0) / 6.0;
        let mb = f64::from(1u32 << 20);
        (
            DOF_BYTES * QUANTITIES * face_basis * self.total_edge_cut.to_f64().unwrap_or(0.0)
                / mb,
            DOF_BYTES * QUANTITIES * volume_basis
                * self.total_comm_volume.to_f64().unwrap_or(0.0)
                / mb,
        )
    }
}

/// Number of distinct neighbour partitions among one element's face
/// ranks, not counting the owning partition itself. An element has at
/// most four distinct neighbours, so a fixed-capacity scan suffices.
fn distinct_neighbors(faces: &[u32], part: u32) -> usize {
    let mut seen = [0u32; FACES_PER_ELEMENT];
    let mut count = 0;
    for &rank in faces {
        if rank != part && !seen[..count].contains(&rank) {
            seen[count] = rank;
            count += 1;
        }
    }
    count
}

/// Run the full analysis: scan every partition of `source` in ascending
/// index order and accumulate counters, totals and the adjacency graph.
pub fn analyze<S: PartitionSource>(source: &mut S) -> Result<CommAnalysis, Error> {
    let partitions = source.partitions();
    let mut analysis = CommAnalysis::new(partitions);
    for p in 0..partitions {
        if p % 10 == 0 {
            info!("reading partition {p}");
        }
        let ranks = source.read_partition(p)?;
        analysis.scan_partition(p, ranks);
    }
    Ok(analysis)
}
