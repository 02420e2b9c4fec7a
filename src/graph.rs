use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use sprs::CsMat;

use crate::error::Error;

/// Undirected weighted adjacency graph over the partitions of a mesh.
///
/// A vertex is a partition index; an edge weight counts the element-face
/// boundaries observed between the two partitions. The CsMat (from sprs)
/// stores the weights as a sparse upper-triangular matrix, so `(a, b)`
/// and `(b, a)` share one entry keyed by the smaller index first and only
/// pairs that were actually crossed take up space.
pub struct CommGraph {
    weights: CsMat<u64>,
}

impl CommGraph {
    /// Create a graph over `partitions` vertices with no edges.
    pub fn new(partitions: u32) -> Self {
        let n = partitions as usize;
        Self {
            weights: CsMat::zero((n, n)),
        }
    }

    /// The number of vertices in the graph.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.weights.rows(), self.weights.cols());
        self.weights.rows()
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record one boundary crossing between partitions `a` and `b`.
    ///
    /// The pair is unordered; repeated calls accumulate into the same
    /// edge. Self edges and out-of-range indices are programming errors.
    pub fn add_edge(&mut self, a: u32, b: u32) {
        assert_ne!(a, b, "self edge on partition {a}");
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        assert!(
            (hi as usize) < self.len(),
            "partition {hi} out of range for {} vertices",
            self.len()
        );
        let weight = self.edge_weight(lo, hi);
        self.weights.insert(lo as usize, hi as usize, weight + 1);
    }

    /// Get the accumulated weight between a pair of vertices, zero if the
    /// pair was never crossed.
    pub fn edge_weight(&self, a: u32, b: u32) -> u64 {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        self.weights
            .get(lo as usize, hi as usize)
            .copied()
            .unwrap_or(0)
    }

    /// An iterator over the stored edges as `(a, b, weight)` with `a < b`,
    /// in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        self.weights.iter().map(|(&weight, (a, b))| (a, b, weight))
    }

    /// Write the graph as a DOT document for visualisation.
    pub fn write_dot<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "graph communication {{")?;
        for vertex in 0..self.len() {
            writeln!(out, "\t{vertex};")?;
        }
        for (a, b, weight) in self.edges() {
            writeln!(out, "\t{a} -- {b} [label=\"{weight}\"];")?;
        }
        writeln!(out, "}}")
    }

    /// Write the dense edge-cut matrix, one row per line. The matrix is
    /// symmetric with a zero diagonal.
    pub fn write_matrix<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for i in 0..self.len() {
            for j in 0..self.len() {
                if j > 0 {
                    write!(out, " ")?;
                }
                write!(out, "{}", self.edge_weight(i as u32, j as u32))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Write the DOT document to a file.
    pub fn export_dot(&self, path: &Path) -> Result<(), Error> {
        let file = File::create(path).map_err(|e| Error::write(path, e))?;
        let mut out = BufWriter::new(file);
        self.write_dot(&mut out).map_err(|e| Error::write(path, e))?;
        out.flush().map_err(|e| Error::write(path, e))
    }

    /// Write the dense edge-cut matrix to a file.
    pub fn export_matrix(&self, path: &Path) -> Result<(), Error> {
        let file = File::create(path).map_err(|e| Error::write(path, e))?;
        let mut out = BufWriter::new(file);
        self.write_matrix(&mut out)
            .map_err(|e| Error::write(path, e))?;
        out.flush().map_err(|e| Error::write(path, e))
    }
}
