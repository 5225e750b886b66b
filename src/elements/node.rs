//! Node - a grid point of the structured mesh

use serde::{Deserialize, Serialize};

/// Degrees of freedom carried by each node (x and y displacement)
pub const DOFS_PER_NODE: usize = 2;

/// A 2D node of the structured grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Row-major index over the grid (`ix * num_nodes_y + iy`)
    pub id: usize,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Global DOF index for a displacement component (0 = x, 1 = y)
    #[inline]
    pub fn dof(&self, component: usize) -> usize {
        debug_assert!(component < DOFS_PER_NODE);
        self.id * DOFS_PER_NODE + component
    }
}
