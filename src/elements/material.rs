//! Material properties

use serde::{Deserialize, Serialize};

use crate::error::{FemError, FemResult};
use crate::math::Mat3;

/// In-plane constitutive assumption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneFormulation {
    /// Thin body, zero out-of-plane stress
    #[default]
    PlaneStress,
    /// Long body, zero out-of-plane strain
    PlaneStrain,
}

impl PlaneFormulation {
    /// Open interval of admissible Poisson ratios
    pub fn poisson_bounds(&self) -> (f64, f64) {
        match self {
            Self::PlaneStress => (-1.0, 1.0),
            Self::PlaneStrain => (-1.0, 0.5),
        }
    }
}

/// Isotropic linear-elastic material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus)
    pub e: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Plane stress or plane strain
    pub formulation: PlaneFormulation,
}

impl Material {
    /// Create a plane stress material
    pub fn new(e: f64, nu: f64) -> FemResult<Self> {
        Self::with_formulation(e, nu, PlaneFormulation::PlaneStress)
    }

    /// Create a material for the given formulation
    ///
    /// Rejects a modulus that is not positive and a Poisson ratio at or beyond
    /// the singularity of the constitutive matrix.
    pub fn with_formulation(e: f64, nu: f64, formulation: PlaneFormulation) -> FemResult<Self> {
        if !(e.is_finite() && e > 0.0) {
            return Err(FemError::InvalidModulus(e));
        }
        let (lower, upper) = formulation.poisson_bounds();
        if !(nu.is_finite() && nu > lower && nu < upper) {
            return Err(FemError::InvalidPoissonRatio { nu, formulation });
        }
        Ok(Self { e, nu, formulation })
    }

    /// Shear modulus G = E / (2 (1 + nu))
    pub fn shear_modulus(&self) -> f64 {
        self.e / (2.0 * (1.0 + self.nu))
    }

    /// Voigt constitutive matrix [D] relating (sx, sy, txy) to (ex, ey, gxy)
    pub fn constitutive_matrix(&self) -> Mat3 {
        let (e, nu) = (self.e, self.nu);
        match self.formulation {
            PlaneFormulation::PlaneStress => {
                let c = e / (1.0 - nu * nu);
                #[rustfmt::skip]
                let data = [
                    c,       c * nu,  0.0,
                    c * nu,  c,       0.0,
                    0.0,     0.0,     c * (1.0 - nu) / 2.0,
                ];
                Mat3::from_row_slice(&data)
            }
            PlaneFormulation::PlaneStrain => {
                let c = e / ((1.0 + nu) * (1.0 - 2.0 * nu));
                #[rustfmt::skip]
                let data = [
                    c * (1.0 - nu),  c * nu,          0.0,
                    c * nu,          c * (1.0 - nu),  0.0,
                    0.0,             0.0,             c * (1.0 - 2.0 * nu) / 2.0,
                ];
                Mat3::from_row_slice(&data)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_spd(d: &Mat3) {
        assert_relative_eq!(*d, d.transpose(), epsilon = 1e-14);
        assert!((*d).cholesky().is_some(), "D should be positive definite: {d}");
    }

    #[test]
    fn test_plane_stress_matrix() {
        let mat = Material::new(1.0, 0.3).unwrap();
        let d = mat.constitutive_matrix();
        let c = 1.0 / (1.0 - 0.09);
        assert_relative_eq!(d[(0, 0)], c, epsilon = 1e-14);
        assert_relative_eq!(d[(0, 1)], 0.3 * c, epsilon = 1e-14);
        assert_relative_eq!(d[(2, 2)], 0.35 * c, epsilon = 1e-14);
        // the shear term is G for plane stress
        assert_relative_eq!(d[(2, 2)], mat.shear_modulus(), epsilon = 1e-14);
    }

    #[test]
    fn test_plane_strain_matrix() {
        let mat = Material::with_formulation(2.0, 0.25, PlaneFormulation::PlaneStrain).unwrap();
        let d = mat.constitutive_matrix();
        let c = 2.0 / (1.25 * 0.5);
        assert_relative_eq!(d[(0, 0)], 0.75 * c, epsilon = 1e-14);
        assert_relative_eq!(d[(1, 0)], 0.25 * c, epsilon = 1e-14);
        assert_relative_eq!(d[(2, 2)], mat.shear_modulus(), epsilon = 1e-14);
    }

    #[test]
    fn test_constitutive_matrix_is_spd() {
        for &nu in &[-0.9, -0.3, 0.0, 0.2, 0.3, 0.45, 0.49] {
            for &e in &[1.0, 210e9, 1e-3] {
                assert_spd(&Material::new(e, nu).unwrap().constitutive_matrix());
                assert_spd(
                    &Material::with_formulation(e, nu, PlaneFormulation::PlaneStrain)
                        .unwrap()
                        .constitutive_matrix(),
                );
            }
        }
        assert_spd(&Material::new(1.0, 0.95).unwrap().constitutive_matrix());
    }

    #[test]
    fn test_invalid_material() {
        assert!(matches!(Material::new(0.0, 0.3), Err(FemError::InvalidModulus(_))));
        assert!(matches!(Material::new(-5.0, 0.3), Err(FemError::InvalidModulus(_))));
        assert!(matches!(Material::new(f64::NAN, 0.3), Err(FemError::InvalidModulus(_))));
        assert!(matches!(
            Material::new(1.0, 1.0),
            Err(FemError::InvalidPoissonRatio { .. })
        ));
        assert!(matches!(
            Material::new(1.0, -1.0),
            Err(FemError::InvalidPoissonRatio { .. })
        ));
        assert!(matches!(
            Material::with_formulation(1.0, 0.5, PlaneFormulation::PlaneStrain),
            Err(FemError::InvalidPoissonRatio { .. })
        ));
        // 0.5 is fine for plane stress
        assert!(Material::new(1.0, 0.5).is_ok());
    }
}
