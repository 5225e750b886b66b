//! Global stiffness assembly in triplet form
//!
//! Element `e` owns the 64 entries at offsets `e * 64 .. (e + 1) * 64`, entry
//! `i * 8 + j` holding local row `i` and local column `j`. Elements never
//! write outside their own range, so the element loop can run in parallel.

use log::debug;

use crate::config::AssemblyOptions;
use crate::elements::{DOFS_PER_ELEMENT, ENTRIES_PER_ELEMENT};
use crate::error::{check_len, FemResult};
use crate::math::{Mat8, Triplets, GAUSS_POINTS_PER_ELEMENT};
use crate::model::MeshModel;

/// Assemble `K(multipliers)` with the default options
///
/// `multipliers` holds one weight per (element, Gauss point), index `e * 4 + g`.
/// Returns `64 * num_elements` triplets; duplicates are left for the consumer
/// to sum.
pub fn stiffness_matrix(model: &MeshModel, multipliers: &[f64]) -> FemResult<Triplets> {
    let mut out = Triplets::zeros(model.stiffness_triplet_len());
    stiffness_matrix_into(model, multipliers, &mut out, AssemblyOptions::default())?;
    Ok(out)
}

/// Assemble `K(multipliers)` into a caller-sized buffer
///
/// `out` must hold exactly `64 * num_elements` entries. Nothing is written if
/// either length is wrong.
pub fn stiffness_matrix_into(
    model: &MeshModel,
    multipliers: &[f64],
    out: &mut Triplets,
    options: AssemblyOptions,
) -> FemResult<()> {
    check_len("multipliers", model.num_design_variables(), multipliers.len())?;
    check_len("stiffness triplets", model.stiffness_triplet_len(), out.len())?;

    debug!(
        "assembling stiffness: {} elements, parallel = {}",
        model.num_elements(),
        options.parallel
    );

    let templates = model.templates();
    let mesh = model.mesh();
    for_each_block(out, ENTRIES_PER_ELEMENT, options.parallel, |e, data, rows, cols| {
        let start = e * GAUSS_POINTS_PER_ELEMENT;
        let ke = templates.scaled(&multipliers[start..start + GAUSS_POINTS_PER_ELEMENT]);
        scatter_block(&ke, &mesh.element_dofs(e), data, rows, cols);
    });

    Ok(())
}

/// Write a dense element matrix as 64 row-major triplets
#[inline]
pub(crate) fn scatter_block(
    ke: &Mat8,
    dofs: &[usize; DOFS_PER_ELEMENT],
    data: &mut [f64],
    rows: &mut [usize],
    cols: &mut [usize],
) {
    for (i, &di) in dofs.iter().enumerate() {
        for (j, &dj) in dofs.iter().enumerate() {
            let k = i * DOFS_PER_ELEMENT + j;
            data[k] = ke[(i, j)];
            rows[k] = di;
            cols[k] = dj;
        }
    }
}

/// Run `f(block_index, data, rows, cols)` on consecutive `block_len` chunks
///
/// Chunks are disjoint, so with `parallel` set they are handed to rayon.
pub(crate) fn for_each_block<F>(out: &mut Triplets, block_len: usize, parallel: bool, f: F)
where
    F: Fn(usize, &mut [f64], &mut [usize], &mut [usize]) + Send + Sync,
{
    let (data, rows, cols) = out.parts_mut();

    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;

            data.par_chunks_mut(block_len)
                .zip(rows.par_chunks_mut(block_len))
                .zip(cols.par_chunks_mut(block_len))
                .enumerate()
                .for_each(|(b, ((d, r), c))| f(b, d, r, c));
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    data.chunks_mut(block_len)
        .zip(rows.chunks_mut(block_len))
        .zip(cols.chunks_mut(block_len))
        .enumerate()
        .for_each(|(b, ((d, r), c))| f(b, d, r, c));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FemError;

    #[test]
    fn test_offsets_are_per_element() {
        let model = MeshModel::new(3, 2, 2.0, 1.0, 1.0, 0.3).unwrap();
        let triplets = stiffness_matrix(&model, &vec![1.0; 8]).unwrap();
        assert_eq!(triplets.len(), 128);

        let dofs = model.mesh().element_dofs(1);
        for i in 0..8 {
            for j in 0..8 {
                let k = 64 + i * 8 + j;
                assert_eq!(triplets.rows()[k], dofs[i]);
                assert_eq!(triplets.cols()[k], dofs[j]);
            }
        }
        let ke = model.templates().element_stiffness();
        assert_eq!(triplets.data()[64 + 3 * 8 + 5], ke[(3, 5)]);
    }

    #[test]
    fn test_zero_multipliers_give_zero_values() {
        let model = MeshModel::new(3, 3, 1.0, 1.0, 1.0, 0.3).unwrap();
        let triplets = stiffness_matrix(&model, &vec![0.0; 16]).unwrap();
        assert!(triplets.data().iter().all(|&v| v == 0.0));
        // indices are still written
        assert_eq!(triplets.rows()[64 * 3 + 63], model.mesh().element_dofs(3)[7]);
    }

    #[test]
    fn test_length_preconditions() {
        let model = MeshModel::new(3, 3, 1.0, 1.0, 1.0, 0.3).unwrap();
        assert!(matches!(
            stiffness_matrix(&model, &[1.0; 15]),
            Err(FemError::LengthMismatch { what: "multipliers", expected: 16, actual: 15 })
        ));

        let mut short = Triplets::zeros(255);
        let result =
            stiffness_matrix_into(&model, &[1.0; 16], &mut short, AssemblyOptions::sequential());
        assert!(matches!(
            result,
            Err(FemError::LengthMismatch { expected: 256, actual: 255, .. })
        ));
        assert!(short.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_sequential_matches_default() {
        let model = MeshModel::new(5, 4, 2.0, 1.5, 3.0, 0.25).unwrap();
        let multipliers: Vec<f64> = (0..model.num_design_variables())
            .map(|i| 0.1 + (i % 7) as f64 * 0.13)
            .collect();

        let mut sequential = Triplets::zeros(model.stiffness_triplet_len());
        stiffness_matrix_into(
            &model,
            &multipliers,
            &mut sequential,
            AssemblyOptions::sequential(),
        )
        .unwrap();
        let mut parallel = Triplets::zeros(model.stiffness_triplet_len());
        stiffness_matrix_into(
            &model,
            &multipliers,
            &mut parallel,
            AssemblyOptions::sequential().with_parallel(),
        )
        .unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(sequential, stiffness_matrix(&model, &multipliers).unwrap());
    }
}
