//! Reading of mesh partition files.
//!
//! The input is a whitespace-separated text format: the first token is
//! the number of partitions, followed by one block per partition in
//! ascending index order. A block holds the partition's element count and
//! then four neighbour ranks per element, one per tetrahedron face. A
//! face on the domain boundary or inside the partition carries the
//! owning partition's own rank.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::{PartitionSource, FACES_PER_ELEMENT};

/// Streams whitespace-separated tokens off a buffered reader one line at
/// a time.
#[derive(Debug)]
struct Tokens<R> {
    reader: R,
    line: Vec<String>,
    pos: usize,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            pos: 0,
        }
    }

    fn next(&mut self) -> io::Result<Option<String>> {
        loop {
            if self.pos < self.line.len() {
                let token = std::mem::take(&mut self.line[self.pos]);
                self.pos += 1;
                return Ok(Some(token));
            }
            let mut buffer = String::new();
            if self.reader.read_line(&mut buffer)? == 0 {
                return Ok(None);
            }
            self.line = buffer.split_whitespace().map(str::to_owned).collect();
            self.pos = 0;
        }
    }
}

/// A mesh partition file opened as a stateful, ordered `PartitionSource`.
///
/// The partition count is read from the header at open time; partition
/// blocks are consumed front to back, so `read_partition` only accepts
/// ascending indices.
#[derive(Debug)]
pub struct MeshPartitions {
    path: PathBuf,
    tokens: Tokens<BufReader<File>>,
    partitions: u32,
    next_partition: u32,
    neighbor_ranks: Vec<u32>,
}

impl MeshPartitions {
    /// Open a mesh partition file and read its header.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| Error::read(path, e))?;
        let mut mesh = Self {
            path: path.to_path_buf(),
            tokens: Tokens::new(BufReader::new(file)),
            partitions: 0,
            next_partition: 0,
            neighbor_ranks: Vec::new(),
        };
        mesh.partitions = mesh.next_value("partition count")?;
        if mesh.partitions == 0 {
            return Err(Error::format(path, "partition count must be positive"));
        }
        Ok(mesh)
    }

    fn next_value(&mut self, what: &str) -> Result<u32, Error> {
        match self.tokens.next().map_err(|e| Error::read(&self.path, e))? {
            None => Err(Error::format(
                &self.path,
                format!("unexpected end of file, expected {what}"),
            )),
            Some(token) => token.parse().map_err(|_| {
                Error::format(&self.path, format!("invalid {what} '{token}'"))
            }),
        }
    }
}

impl PartitionSource for MeshPartitions {
    fn partitions(&self) -> u32 {
        self.partitions
    }

    fn read_partition(&mut self, p: u32) -> Result<&[u32], Error> {
        if p != self.next_partition {
            return Err(Error::format(
                &self.path,
                format!(
                    "partition {p} requested out of order, expected {}",
                    self.next_partition
                ),
            ));
        }

        let elements = self.next_value("element count")? as usize;
        self.neighbor_ranks.clear();
        self.neighbor_ranks.reserve(elements * FACES_PER_ELEMENT);
        for _ in 0..elements * FACES_PER_ELEMENT {
            let rank = self.next_value("neighbour rank")?;
            if rank >= self.partitions {
                return Err(Error::format(
                    &self.path,
                    format!(
                        "neighbour rank {rank} out of range for {} partitions",
                        self.partitions
                    ),
                ));
            }
            self.neighbor_ranks.push(rank);
        }

        self.next_partition += 1;
        Ok(&self.neighbor_ranks)
    }
}
