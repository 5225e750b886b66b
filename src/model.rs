//! MeshModel - immutable mesh, material and element templates

use log::debug;

use crate::config::ModelConfig;
use crate::elements::{ElementTemplates, Material, ENTRIES_PER_ELEMENT};
use crate::error::{FemError, FemResult};
use crate::math::{gauss_points_2x2, shape_functions, GAUSS_POINTS_PER_ELEMENT};
use crate::mesh::StructuredMesh;

/// Precomputed state shared by every assembly call
///
/// Built once, then only read. Assembly and sensitivity routines take it by
/// reference together with the current multiplier vector.
#[derive(Debug, Clone)]
pub struct MeshModel {
    mesh: StructuredMesh,
    material: Material,
    thickness: f64,
    templates: ElementTemplates,
}

impl MeshModel {
    /// Build a plane stress model with unit thickness
    ///
    /// # Arguments
    /// * `num_nodes_x`, `num_nodes_y` - Grid nodes per direction (at least 2)
    /// * `length_x`, `length_y` - Domain size
    /// * `e` - Modulus of elasticity
    /// * `nu` - Poisson's ratio
    pub fn new(
        num_nodes_x: usize,
        num_nodes_y: usize,
        length_x: f64,
        length_y: f64,
        e: f64,
        nu: f64,
    ) -> FemResult<Self> {
        Self::from_config(&ModelConfig::new(num_nodes_x, num_nodes_y, length_x, length_y, e, nu))
    }

    /// Build a model from a configuration
    ///
    /// All parameters are validated before the mesh and templates are built.
    pub fn from_config(config: &ModelConfig) -> FemResult<Self> {
        let material = Material::with_formulation(
            config.youngs_modulus,
            config.poisson_ratio,
            config.formulation,
        )?;
        if !(config.thickness.is_finite() && config.thickness > 0.0) {
            return Err(FemError::InvalidThickness(config.thickness));
        }

        let mesh = StructuredMesh::new(
            config.num_nodes_x,
            config.num_nodes_y,
            config.length_x,
            config.length_y,
        )?;
        let templates =
            ElementTemplates::new(&material, mesh.dr_dx(), mesh.ds_dy(), config.thickness);

        debug!(
            "model ready: {} elements, {} dofs, dr_dx = {:e}, ds_dy = {:e}, {:?}",
            mesh.num_elements(),
            mesh.num_dofs(),
            mesh.dr_dx(),
            mesh.ds_dy(),
            material.formulation
        );

        Ok(Self {
            mesh,
            material,
            thickness: config.thickness,
            templates,
        })
    }

    pub fn mesh(&self) -> &StructuredMesh {
        &self.mesh
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn templates(&self) -> &ElementTemplates {
        &self.templates
    }

    pub fn num_elements(&self) -> usize {
        self.mesh.num_elements()
    }

    pub fn num_nodes(&self) -> usize {
        self.mesh.num_nodes()
    }

    /// Rows (and columns) of the global stiffness matrix
    pub fn num_dofs(&self) -> usize {
        self.mesh.num_dofs()
    }

    /// Length of the multiplier vector: one entry per (element, Gauss point)
    pub fn num_design_variables(&self) -> usize {
        self.mesh.num_elements() * GAUSS_POINTS_PER_ELEMENT
    }

    /// Triplets written by stiffness assembly (64 per element)
    pub fn stiffness_triplet_len(&self) -> usize {
        self.mesh.num_elements() * ENTRIES_PER_ELEMENT
    }

    /// Triplets written by sensitivity assembly (64 per design variable)
    pub fn derivative_triplet_len(&self) -> usize {
        self.num_design_variables() * ENTRIES_PER_ELEMENT
    }

    /// Physical coordinates of every Gauss point, in multiplier order
    pub fn quadrature_points(&self) -> Vec<[f64; 2]> {
        let nodes = self.mesh.nodes();
        let gauss_points = gauss_points_2x2();

        let mut points = Vec::with_capacity(self.num_design_variables());
        for quad in self.mesh.elements() {
            for gp in &gauss_points {
                let n = shape_functions(gp.r, gp.s);
                let mut point = [0.0; 2];
                for (weight, &node) in n.iter().zip(&quad.nodes) {
                    point[0] += weight * nodes[node].x;
                    point[1] += weight * nodes[node].y;
                }
                points.push(point);
            }
        }
        points
    }
}
