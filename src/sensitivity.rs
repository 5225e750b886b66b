//! Derivatives of the global stiffness matrix with respect to the multipliers
//!
//! `K` is linear in every multiplier, so `dK/d multiplier[e * 4 + g]` is the
//! unscaled template `Ke_g` scattered at the DOFs of element `e`. No finite
//! differencing is involved.

use log::debug;

use crate::assembly::{for_each_block, scatter_block};
use crate::config::AssemblyOptions;
use crate::elements::{DOFS_PER_ELEMENT, ENTRIES_PER_ELEMENT};
use crate::error::{check_len, FemResult};
use crate::math::{SensitivityTriplets, Triplets, GAUSS_POINTS_PER_ELEMENT};
use crate::model::MeshModel;

/// Triplets of `d(K u)/d multipliers` written per element
pub const RESIDUAL_ENTRIES_PER_ELEMENT: usize = GAUSS_POINTS_PER_ELEMENT * ENTRIES_PER_ELEMENT;

/// Per-design-variable derivative triplets with the default options
///
/// `states` must have one entry per design variable (`4 * num_elements`). Its
/// values do not enter the result: the derivative of a linear function does
/// not depend on the point it is taken at.
///
/// The result holds one 64-triplet block per design variable, so it is
/// `256 * num_elements` long, four times the length of
/// [`stiffness_matrix`](crate::assembly::stiffness_matrix). Size buffers for
/// [`stiffness_matrix_derivs_into`] with
/// [`MeshModel::derivative_triplet_len`].
pub fn stiffness_matrix_derivs(
    model: &MeshModel,
    states: &[f64],
) -> FemResult<SensitivityTriplets> {
    let mut out = SensitivityTriplets::new(
        Triplets::zeros(model.derivative_triplet_len()),
        ENTRIES_PER_ELEMENT,
    );
    stiffness_matrix_derivs_into(model, states, &mut out, AssemblyOptions::default())?;
    Ok(out)
}

/// Per-design-variable derivative triplets into a caller-sized buffer
///
/// Block `v = e * 4 + g` is what [`stiffness_matrix`](crate::assembly::stiffness_matrix)
/// would write for element `e` with a unit multiplier on `v` and zero on all
/// other variables.
pub fn stiffness_matrix_derivs_into(
    model: &MeshModel,
    states: &[f64],
    out: &mut SensitivityTriplets,
    options: AssemblyOptions,
) -> FemResult<()> {
    check_len("states", model.num_design_variables(), states.len())?;
    check_len(
        "derivative triplets",
        model.derivative_triplet_len(),
        out.triplets().len(),
    )?;
    check_len("derivative block", ENTRIES_PER_ELEMENT, out.block_len())?;

    debug!(
        "assembling stiffness derivatives: {} design variables, parallel = {}",
        model.num_design_variables(),
        options.parallel
    );

    let templates = model.templates();
    let mesh = model.mesh();
    let block = |v: usize, data: &mut [f64], rows: &mut [usize], cols: &mut [usize]| {
        let e = v / GAUSS_POINTS_PER_ELEMENT;
        let g = v % GAUSS_POINTS_PER_ELEMENT;
        scatter_block(templates.get(g), &mesh.element_dofs(e), data, rows, cols);
    };
    for_each_block(out.triplets_mut(), ENTRIES_PER_ELEMENT, options.parallel, block);

    Ok(())
}

/// Jacobian of the residual `K(m) u` with respect to the multipliers
///
/// `displacements` is a nodal state vector of length `num_dofs`. Entry
/// `(row, col)` of the summed result is `d (K u)[row] / d m[col]`: for each
/// element `e`, Gauss point `g` and local indices `i`, `j` one triplet
/// `(dofs[i], e * 4 + g, Ke_g[i][j] * u[dofs[j]])`. 256 triplets per element,
/// duplicates to be summed by the consumer.
pub fn residual_derivs(model: &MeshModel, displacements: &[f64]) -> FemResult<Triplets> {
    residual_derivs_with_options(model, displacements, AssemblyOptions::default())
}

/// [`residual_derivs`] with explicit assembly options
///
/// The sequential and parallel element loops write identical output.
pub fn residual_derivs_with_options(
    model: &MeshModel,
    displacements: &[f64],
    options: AssemblyOptions,
) -> FemResult<Triplets> {
    check_len("displacements", model.num_dofs(), displacements.len())?;

    let mut out = Triplets::zeros(model.num_elements() * RESIDUAL_ENTRIES_PER_ELEMENT);
    let templates = model.templates();
    let mesh = model.mesh();
    let block_len = RESIDUAL_ENTRIES_PER_ELEMENT;
    for_each_block(&mut out, block_len, options.parallel, |e, data, rows, cols| {
        let dofs = mesh.element_dofs(e);
        let mut k = 0;
        for g in 0..GAUSS_POINTS_PER_ELEMENT {
            let ke = templates.get(g);
            let variable = e * GAUSS_POINTS_PER_ELEMENT + g;
            for i in 0..DOFS_PER_ELEMENT {
                for j in 0..DOFS_PER_ELEMENT {
                    data[k] = ke[(i, j)] * displacements[dofs[j]];
                    rows[k] = dofs[i];
                    cols[k] = variable;
                    k += 1;
                }
            }
        }
    });

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FemError;

    #[test]
    fn test_block_layout() {
        let model = MeshModel::new(3, 2, 2.0, 1.0, 1.0, 0.3).unwrap();
        let derivs = stiffness_matrix_derivs(&model, &[0.0; 8]).unwrap();
        assert_eq!(derivs.num_variables(), 8);
        assert_eq!(derivs.triplets().len(), 512);

        // variable 6 is element 1, Gauss point 2
        let block = derivs.variable(6).unwrap();
        let dofs = model.mesh().element_dofs(1);
        let ke = model.templates().get(2);
        for (k, (row, col, value)) in block.iter().enumerate() {
            assert_eq!(row, dofs[k / 8]);
            assert_eq!(col, dofs[k % 8]);
            assert_eq!(value, ke[(k / 8, k % 8)]);
        }
    }

    #[test]
    fn test_state_values_are_ignored() {
        let model = MeshModel::new(3, 3, 1.0, 1.0, 1.0, 0.3).unwrap();
        let a = stiffness_matrix_derivs(&model, &[1.0; 16]).unwrap();
        let b = stiffness_matrix_derivs(&model, &[-3.5; 16]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_length_preconditions() {
        let model = MeshModel::new(3, 3, 1.0, 1.0, 1.0, 0.3).unwrap();
        assert!(matches!(
            stiffness_matrix_derivs(&model, &[1.0; 17]),
            Err(FemError::LengthMismatch { what: "states", .. })
        ));
        assert!(matches!(
            residual_derivs(&model, &[0.0; 17]),
            Err(FemError::LengthMismatch { what: "displacements", expected: 18, .. })
        ));

        // sized like the stiffness output rather than one block per design variable
        let mut wrong = SensitivityTriplets::new(
            Triplets::zeros(model.stiffness_triplet_len()),
            ENTRIES_PER_ELEMENT,
        );
        assert!(matches!(
            stiffness_matrix_derivs_into(
                &model,
                &[1.0; 16],
                &mut wrong,
                AssemblyOptions::sequential()
            ),
            Err(FemError::LengthMismatch { what: "derivative triplets", .. })
        ));
    }

    #[test]
    fn test_residual_derivs_sequential_matches_default() {
        let model = MeshModel::new(6, 5, 3.0, 2.0, 1.0, 0.3).unwrap();
        let u: Vec<f64> = (0..model.num_dofs()).map(|i| (i as f64 * 0.7).cos()).collect();

        let default = residual_derivs(&model, &u).unwrap();
        let sequential =
            residual_derivs_with_options(&model, &u, AssemblyOptions::sequential()).unwrap();
        let parallel =
            residual_derivs_with_options(&model, &u, AssemblyOptions::sequential().with_parallel())
                .unwrap();
        assert_eq!(default.len(), model.num_elements() * RESIDUAL_ENTRIES_PER_ELEMENT);
        assert_eq!(sequential, default);
        assert_eq!(parallel, default);
    }

    #[test]
    fn test_residual_derivs_layout() {
        let model = MeshModel::new(2, 2, 1.0, 1.0, 1.0, 0.3).unwrap();
        let u: Vec<f64> = (0..8).map(|i| i as f64 * 0.1).collect();
        let jac = residual_derivs(&model, &u).unwrap();
        assert_eq!(jac.len(), 256);
        assert!(jac.cols().iter().all(|&c| c < 4));

        // column g of the summed Jacobian is Ke_g * u_e, scattered to the element DOFs
        let dense = jac.to_dense(8, 4).unwrap();
        let dofs = model.mesh().element_dofs(0);
        let u_e = nalgebra::SVector::<f64, 8>::from_fn(|j, _| u[dofs[j]]);
        for g in 0..4 {
            let expected = model.templates().get(g) * u_e;
            for i in 0..8 {
                assert!((dense[(dofs[i], g)] - expected[i]).abs() < 1e-12);
            }
        }
    }
}
