//! Structured rectangular grid of bilinear quads

use log::debug;
use serde::{Deserialize, Serialize};

use crate::elements::{Node, Quad, DOFS_PER_ELEMENT, DOFS_PER_NODE};
use crate::error::{FemError, FemResult};

/// Evenly spaced grid over `[0, length_x] x [0, length_y]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredMesh {
    num_nodes_x: usize,
    num_nodes_y: usize,
    length_x: f64,
    length_y: f64,
    nodes: Vec<Node>,
    elements: Vec<Quad>,
}

impl StructuredMesh {
    /// Build nodes and connectivity for a `num_nodes_x x num_nodes_y` grid
    ///
    /// Node `(ix, iy)` gets id `ix * num_nodes_y + iy`; element `(ix, iy)` gets
    /// id `ix * (num_nodes_y - 1) + iy`.
    pub fn new(
        num_nodes_x: usize,
        num_nodes_y: usize,
        length_x: f64,
        length_y: f64,
    ) -> FemResult<Self> {
        if num_nodes_x < 2 {
            return Err(FemError::DegenerateMesh { axis: 'x', count: num_nodes_x });
        }
        if num_nodes_y < 2 {
            return Err(FemError::DegenerateMesh { axis: 'y', count: num_nodes_y });
        }
        if !(length_x.is_finite() && length_x > 0.0) {
            return Err(FemError::InvalidLength { axis: 'x', value: length_x });
        }
        if !(length_y.is_finite() && length_y > 0.0) {
            return Err(FemError::InvalidLength { axis: 'y', value: length_y });
        }

        let dx = length_x / (num_nodes_x - 1) as f64;
        let dy = length_y / (num_nodes_y - 1) as f64;

        let mut nodes = Vec::with_capacity(num_nodes_x * num_nodes_y);
        for ix in 0..num_nodes_x {
            for iy in 0..num_nodes_y {
                let id = ix * num_nodes_y + iy;
                nodes.push(Node::new(id, ix as f64 * dx, iy as f64 * dy));
            }
        }

        let node_id = |ix: usize, iy: usize| ix * num_nodes_y + iy;
        let mut elements = Vec::with_capacity((num_nodes_x - 1) * (num_nodes_y - 1));
        for ix in 0..num_nodes_x - 1 {
            for iy in 0..num_nodes_y - 1 {
                let id = ix * (num_nodes_y - 1) + iy;
                elements.push(Quad::new(
                    id,
                    [
                        node_id(ix, iy),
                        node_id(ix + 1, iy),
                        node_id(ix + 1, iy + 1),
                        node_id(ix, iy + 1),
                    ],
                ));
            }
        }

        debug!(
            "built {}x{} grid: {} nodes, {} elements, cell {:e} x {:e}",
            num_nodes_x,
            num_nodes_y,
            nodes.len(),
            elements.len(),
            dx,
            dy
        );

        Ok(Self {
            num_nodes_x,
            num_nodes_y,
            length_x,
            length_y,
            nodes,
            elements,
        })
    }

    pub fn num_nodes_x(&self) -> usize {
        self.num_nodes_x
    }

    pub fn num_nodes_y(&self) -> usize {
        self.num_nodes_y
    }

    pub fn lengths(&self) -> (f64, f64) {
        (self.length_x, self.length_y)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn elements(&self) -> &[Quad] {
        &self.elements
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Size of the global stiffness matrix
    pub fn num_dofs(&self) -> usize {
        self.nodes.len() * DOFS_PER_NODE
    }

    /// Global DOFs of element `e` in local order
    ///
    /// # Panics
    ///
    /// Panics if `e >= num_elements()`.
    pub fn element_dofs(&self, e: usize) -> [usize; DOFS_PER_ELEMENT] {
        self.elements[e].dofs()
    }

    /// Physical cell size `(dx, dy)`
    pub fn element_size(&self) -> (f64, f64) {
        (
            self.length_x / (self.num_nodes_x - 1) as f64,
            self.length_y / (self.num_nodes_y - 1) as f64,
        )
    }

    /// Parametric-to-physical scale `dr/dx` (the reference element spans 2)
    pub fn dr_dx(&self) -> f64 {
        2.0 / self.element_size().0
    }

    /// Parametric-to-physical scale `ds/dy`
    pub fn ds_dy(&self) -> f64 {
        2.0 / self.element_size().1
    }
}
