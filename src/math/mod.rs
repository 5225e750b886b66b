//! Mathematical utilities for element calculations

pub mod quadrature;
pub mod sparse;

use nalgebra::{DMatrix, Matrix3, SMatrix};

// Re-export quadrature and sparse utilities
pub use quadrature::{
    gauss_points_2x2, shape_function_derivatives, shape_functions,
    strain_displacement_matrix, GaussPoint, GAUSS_POINTS_PER_ELEMENT,
};
pub use sparse::{SensitivityTriplets, Triplets};

pub type Mat = DMatrix<f64>;
pub type Mat3 = Matrix3<f64>;

/// 3x8 strain-displacement matrix of a bilinear quad
pub type Mat3x8 = SMatrix<f64, 3, 8>;
/// 8x8 element stiffness matrix
pub type Mat8 = SMatrix<f64, 8, 8>;
