//! Quad element - bilinear 4-node plane element of the structured grid

use serde::{Deserialize, Serialize};

use super::node::DOFS_PER_NODE;

/// Nodes per element
pub const NODES_PER_ELEMENT: usize = 4;
/// DOFs per element (4 nodes x 2 displacement components)
pub const DOFS_PER_ELEMENT: usize = NODES_PER_ELEMENT * DOFS_PER_NODE;
/// Entries in one dense element stiffness matrix
pub const ENTRIES_PER_ELEMENT: usize = DOFS_PER_ELEMENT * DOFS_PER_ELEMENT;

/// A bilinear quadrilateral cell of the grid
///
/// Nodes are ordered counter-clockwise starting at the lower-left corner:
/// `(ix, iy), (ix+1, iy), (ix+1, iy+1), (ix, iy+1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quad {
    /// Element index (`ix * (num_nodes_y - 1) + iy`)
    pub id: usize,
    /// Corner node ids
    pub nodes: [usize; NODES_PER_ELEMENT],
}

impl Quad {
    /// Create a new quad element
    pub fn new(id: usize, nodes: [usize; NODES_PER_ELEMENT]) -> Self {
        Self { id, nodes }
    }

    /// Global DOF indices in local order (u1, v1, u2, v2, u3, v3, u4, v4)
    pub fn dofs(&self) -> [usize; DOFS_PER_ELEMENT] {
        let mut dofs = [0; DOFS_PER_ELEMENT];
        for (k, &node) in self.nodes.iter().enumerate() {
            dofs[DOFS_PER_NODE * k] = node * DOFS_PER_NODE;
            dofs[DOFS_PER_NODE * k + 1] = node * DOFS_PER_NODE + 1;
        }
        dofs
    }
}
