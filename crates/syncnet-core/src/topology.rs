//! Network topology provider.
//!
//! Maps a connection scheme onto per-oscillator neighbor sets. Adjacency is
//! computed once at construction and stays fixed for the lifetime of the
//! network; the hot integration loop only reads precomputed slices.

use serde::{Deserialize, Serialize};

use crate::error::{SyncNetError, SyncNetResult};

/// Connection scheme between oscillators.
///
/// Grid variants lay the ensemble out as a square lattice and therefore
/// require the oscillator count to be a perfect square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionType {
    /// No connections; every oscillator evolves at its natural frequency.
    None,
    /// Every oscillator is connected to every other.
    AllToAll,
    /// Square lattice, 4-neighborhood (von Neumann).
    GridFour,
    /// Square lattice, 8-neighborhood (Moore).
    GridEight,
    /// Chain where each oscillator is linked to its index neighbors.
    ListBidirectional,
}

/// Fixed neighbor relationship for an ensemble of a given size.
#[derive(Debug, Clone)]
pub struct Topology {
    connection: ConnectionType,
    size: usize,
    neighbors: Vec<Vec<usize>>,
}

impl Topology {
    /// Build the adjacency for `size` oscillators under `connection`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `size` is zero, or if a grid scheme is
    /// requested for a non-square `size`.
    pub fn new(connection: ConnectionType, size: usize) -> SyncNetResult<Self> {
        if size == 0 {
            return Err(SyncNetError::invalid_arg("size", size, "must be > 0"));
        }

        let neighbors = match connection {
            ConnectionType::None => vec![Vec::new(); size],
            ConnectionType::AllToAll => (0..size)
                .map(|i| (0..size).filter(|&j| j != i).collect())
                .collect(),
            ConnectionType::GridFour => grid_neighbors(size, false)?,
            ConnectionType::GridEight => grid_neighbors(size, true)?,
            ConnectionType::ListBidirectional => (0..size)
                .map(|i| {
                    let mut adj = Vec::with_capacity(2);
                    if i > 0 {
                        adj.push(i - 1);
                    }
                    if i + 1 < size {
                        adj.push(i + 1);
                    }
                    adj
                })
                .collect(),
        };

        Ok(Self {
            connection,
            size,
            neighbors,
        })
    }

    /// Connection scheme this topology was built from.
    #[inline]
    pub fn connection(&self) -> ConnectionType {
        self.connection
    }

    /// Number of oscillators.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Neighbor indices of oscillator `index`, in ascending order.
    #[inline]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.neighbors[index]
    }

    /// Whether oscillators `i` and `j` are connected.
    pub fn has_connection(&self, i: usize, j: usize) -> bool {
        i < self.size && j < self.size && self.neighbors[i].binary_search(&j).is_ok()
    }

    /// Total number of directed neighbor pairs.
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum()
    }
}

/// Neighbors on a square lattice; `diagonal` adds the Moore corners.
fn grid_neighbors(size: usize, diagonal: bool) -> SyncNetResult<Vec<Vec<usize>>> {
    let width = (size as f64).sqrt() as usize;
    if width * width != size {
        return Err(SyncNetError::invalid_arg(
            "size",
            size,
            "grid topologies require a square oscillator count",
        ));
    }

    let mut all = Vec::with_capacity(size);
    for i in 0..size {
        let row = i / width;
        let col = i % width;
        let mut adj = Vec::with_capacity(if diagonal { 8 } else { 4 });

        for dr in -1i64..=1 {
            for dc in -1i64..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if !diagonal && dr != 0 && dc != 0 {
                    continue;
                }
                let r = row as i64 + dr;
                let c = col as i64 + dc;
                if r >= 0 && c >= 0 && (r as usize) < width && (c as usize) < width {
                    adj.push(r as usize * width + c as usize);
                }
            }
        }

        adj.sort_unstable();
        all.push(adj);
    }
    Ok(all)
}
