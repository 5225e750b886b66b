//! Design-variable interpolation applied before assembly
//!
//! Maps design variables to the multiplier vector consumed by the assembler,
//! with the derivatives a gradient-based host needs for the chain rule.

use crate::error::{check_len, FemResult};
use crate::math::GAUSS_POINTS_PER_ELEMENT;
use crate::model::MeshModel;

/// Offset keeping the projected density away from zero
pub const HEAVISIDE_FLOOR: f64 = 0.01;

/// Broadcast one value per element to its four Gauss points
pub fn expand_element_multipliers(model: &MeshModel, per_element: &[f64]) -> FemResult<Vec<f64>> {
    check_len("element multipliers", model.num_elements(), per_element.len())?;
    Ok(per_element
        .iter()
        .flat_map(|&value| std::iter::repeat(value).take(GAUSS_POINTS_PER_ELEMENT))
        .collect())
}

/// Sum the Gauss-point entries of each element (adjoint of the broadcast)
pub fn collapse_element_multipliers(model: &MeshModel, per_point: &[f64]) -> FemResult<Vec<f64>> {
    check_len("point multipliers", model.num_design_variables(), per_point.len())?;
    Ok(per_point
        .chunks(GAUSS_POINTS_PER_ELEMENT)
        .map(|chunk| chunk.iter().sum())
        .collect())
}

/// SIMP penalization `x^p`
pub fn simp_penalize(x: &[f64], penalty: f64) -> Vec<f64> {
    x.iter().map(|&xi| xi.powf(penalty)).collect()
}

/// Derivative of [`simp_penalize`], `p x^(p-1)`
pub fn simp_penalize_derivs(x: &[f64], penalty: f64) -> Vec<f64> {
    x.iter()
        .map(|&xi| penalty * xi.powf(penalty - 1.0))
        .collect()
}

/// Smooth Heaviside projection `0.5 + 0.5 tanh(x) + 0.01`
pub fn heaviside(x: &[f64]) -> Vec<f64> {
    x.iter()
        .map(|&xi| 0.5 + 0.5 * xi.tanh() + HEAVISIDE_FLOOR)
        .collect()
}

/// Derivative of [`heaviside`], `0.5 / cosh(x)^2`
pub fn heaviside_derivs(x: &[f64]) -> Vec<f64> {
    x.iter().map(|&xi| 0.5 / xi.cosh().powi(2)).collect()
}
