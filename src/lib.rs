//! fem2d - stiffness assembly for structured 2D linear-elasticity meshes
//!
//! Builds the global stiffness matrix `K(multipliers)` of a uniform grid of
//! bilinear quads, and its derivatives with respect to the multipliers, in
//! coordinate (triplet) form for an external solver. It is meant to sit inside
//! an analysis or topology optimization loop:
//! - Structured rectangular meshes with 2 DOFs per node
//! - Plane stress and plane strain isotropic materials
//! - Four precomputed 2x2 Gauss point templates shared by all elements
//! - Parallel element loops (rayon, `parallel` feature)
//!
//! Loads, boundary conditions and the linear solve are left to the caller.
//!
//! ## Example
//! ```rust
//! use fem2d::prelude::*;
//!
//! // 11 x 6 nodes over a 2 x 1 domain, E = 1, nu = 0.3
//! let model = MeshModel::new(11, 6, 2.0, 1.0, 1.0, 0.3).unwrap();
//!
//! // One multiplier per (element, Gauss point)
//! let multipliers = vec![1.0; model.num_design_variables()];
//! let k = stiffness_matrix(&model, &multipliers).unwrap();
//! assert_eq!(k.len(), 64 * model.num_elements());
//!
//! // Sum duplicates for a solver
//! let csr = k.to_csr(model.num_dofs(), model.num_dofs()).unwrap();
//! assert_eq!(csr.nrows(), 132);
//!
//! // dK / d multiplier[5]
//! let derivs = stiffness_matrix_derivs(&model, &multipliers).unwrap();
//! let dk5 = derivs.variable(5).unwrap();
//! assert_eq!(dk5.len(), 64);
//! ```

pub mod assembly;
pub mod config;
pub mod elements;
pub mod error;
pub mod interpolation;
pub mod math;
pub mod mesh;
pub mod model;
pub mod sensitivity;

// Re-export common types
pub mod prelude {
    pub use crate::assembly::{stiffness_matrix, stiffness_matrix_into};
    pub use crate::config::{AssemblyOptions, ModelConfig};
    pub use crate::elements::{ElementTemplates, Material, Node, PlaneFormulation, Quad};
    pub use crate::error::{FemError, FemResult};
    pub use crate::math::{SensitivityTriplets, Triplets};
    pub use crate::mesh::StructuredMesh;
    pub use crate::model::MeshModel;
    pub use crate::sensitivity::{
        residual_derivs, residual_derivs_with_options, stiffness_matrix_derivs,
        stiffness_matrix_derivs_into,
    };
}
