//! Element stiffness templates for the uniform grid
//!
//! Every cell of a structured grid is a translated copy of the same rectangle,
//! so the contribution of each Gauss point to the element stiffness is the same
//! for all elements. The four contributions are computed once here and scaled
//! by the per-element multipliers during assembly.

use log::trace;

use super::material::Material;
use crate::math::{gauss_points_2x2, strain_displacement_matrix, Mat8, GAUSS_POINTS_PER_ELEMENT};

/// Unscaled per-Gauss-point stiffness contributions of the reference element
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTemplates {
    templates: [Mat8; GAUSS_POINTS_PER_ELEMENT],
}

impl ElementTemplates {
    /// Compute `Ke_g = w_g * det(J) * t * B_g^T * D * B_g` for g = 0..4
    ///
    /// # Arguments
    /// * `material` - Constitutive law shared by all elements
    /// * `dr_dx` - Parametric-to-physical scale along x (`2 / dx`)
    /// * `ds_dy` - Parametric-to-physical scale along y (`2 / dy`)
    /// * `thickness` - Out-of-plane thickness
    pub fn new(material: &Material, dr_dx: f64, ds_dy: f64, thickness: f64) -> Self {
        let d = material.constitutive_matrix();
        let det_j = 1.0 / (dr_dx * ds_dy);

        let mut templates = [Mat8::zeros(); GAUSS_POINTS_PER_ELEMENT];
        for (ke, gp) in templates.iter_mut().zip(gauss_points_2x2()) {
            let b = strain_displacement_matrix(gp.r, gp.s, dr_dx, ds_dy);
            *ke = b.transpose() * d * b * (gp.weight * det_j * thickness);
            // round-off in the triple product leaves tiny asymmetries
            *ke = (*ke + ke.transpose()) * 0.5;
            trace!("template at ({:.4}, {:.4}): k00 = {:e}", gp.r, gp.s, ke[(0, 0)]);
        }

        Self { templates }
    }

    /// Template of Gauss point `g`
    ///
    /// # Panics
    ///
    /// Panics if `g >= 4`.
    pub fn get(&self, g: usize) -> &Mat8 {
        &self.templates[g]
    }

    pub fn as_slice(&self) -> &[Mat8] {
        &self.templates
    }

    /// Fully integrated stiffness of an element with unit multipliers
    pub fn element_stiffness(&self) -> Mat8 {
        self.templates.iter().fold(Mat8::zeros(), |acc, ke| acc + ke)
    }

    /// Element stiffness for the given per-Gauss-point multipliers
    #[inline]
    pub fn scaled(&self, multipliers: &[f64]) -> Mat8 {
        debug_assert_eq!(multipliers.len(), GAUSS_POINTS_PER_ELEMENT);
        let mut ke = Mat8::zeros();
        for (template, &m) in self.templates.iter().zip(multipliers) {
            ke += template * m;
        }
        ke
    }
}
