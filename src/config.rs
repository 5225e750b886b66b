//! Model configuration and assembly options

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::elements::PlaneFormulation;
use crate::error::FemResult;

fn default_thickness() -> f64 {
    1.0
}

/// Construction parameters of a [`MeshModel`](crate::model::MeshModel)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Grid nodes along x (at least 2)
    pub num_nodes_x: usize,
    /// Grid nodes along y (at least 2)
    pub num_nodes_y: usize,
    /// Domain width
    pub length_x: f64,
    /// Domain height
    pub length_y: f64,
    /// Modulus of elasticity
    pub youngs_modulus: f64,
    /// Poisson's ratio
    pub poisson_ratio: f64,
    /// Plane stress (default) or plane strain
    #[serde(default)]
    pub formulation: PlaneFormulation,
    /// Out-of-plane thickness
    #[serde(default = "default_thickness")]
    pub thickness: f64,
}

impl ModelConfig {
    /// Create a plane stress configuration with unit thickness
    pub fn new(
        num_nodes_x: usize,
        num_nodes_y: usize,
        length_x: f64,
        length_y: f64,
        youngs_modulus: f64,
        poisson_ratio: f64,
    ) -> Self {
        Self {
            num_nodes_x,
            num_nodes_y,
            length_x,
            length_y,
            youngs_modulus,
            poisson_ratio,
            formulation: PlaneFormulation::default(),
            thickness: default_thickness(),
        }
    }

    /// Set the plane formulation
    pub fn with_formulation(mut self, formulation: PlaneFormulation) -> Self {
        self.formulation = formulation;
        self
    }

    /// Set the thickness
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Parse a JSON configuration
    pub fn from_json_str(json: &str) -> FemResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> FemResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Options for the assembly routines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyOptions {
    /// Process elements on the rayon thread pool (needs the `parallel` feature)
    pub parallel: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
        }
    }
}

impl AssemblyOptions {
    /// Single-threaded element loop
    pub fn sequential() -> Self {
        Self { parallel: false }
    }

    /// Enable the parallel element loop
    pub fn with_parallel(mut self) -> Self {
        self.parallel = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FemError;

    #[test]
    fn test_json_defaults() {
        let config = ModelConfig::from_json_str(
            r#"{
                "num_nodes_x": 11,
                "num_nodes_y": 6,
                "length_x": 2.0,
                "length_y": 1.0,
                "youngs_modulus": 1.0,
                "poisson_ratio": 0.3
            }"#,
        )
        .unwrap();
        assert_eq!(config, ModelConfig::new(11, 6, 2.0, 1.0, 1.0, 0.3));
        assert_eq!(config.formulation, PlaneFormulation::PlaneStress);
        assert_eq!(config.thickness, 1.0);
    }

    #[test]
    fn test_json_plane_strain() {
        let config = ModelConfig::from_json_str(
            r#"{
                "num_nodes_x": 3, "num_nodes_y": 3,
                "length_x": 1.0, "length_y": 1.0,
                "youngs_modulus": 70e9, "poisson_ratio": 0.33,
                "formulation": "plane_strain", "thickness": 0.5
            }"#,
        )
        .unwrap();
        assert_eq!(config.formulation, PlaneFormulation::PlaneStrain);
        assert_eq!(config.thickness, 0.5);
    }

    #[test]
    fn test_json_round_trip_and_errors() {
        let config = ModelConfig::new(2, 2, 1.0, 1.0, 1.0, 0.3).with_thickness(2.0);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ModelConfig::from_json_str(&json).unwrap(), config);

        assert!(matches!(
            ModelConfig::from_json_str("{\"num_nodes_x\": 2}"),
            Err(FemError::SerializationError(_))
        ));
        assert!(matches!(
            ModelConfig::from_json_file("/nonexistent/fem2d.json"),
            Err(FemError::IoError(_))
        ));
    }

    #[test]
    fn test_assembly_options() {
        assert!(!AssemblyOptions::sequential().parallel);
        assert!(AssemblyOptions::sequential().with_parallel().parallel);
    }
}
