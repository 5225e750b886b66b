//! Assemble the stiffness matrix of a JSON-configured grid and print it
//!
//! Usage: fem2d-assemble <config.json> [multiplier]
//!
//! Prints the duplicate-summed entries as a JSON array of `[row, col, value]`.
//! Set `RUST_LOG=debug` for assembly details.

use anyhow::{bail, Context, Result};
use log::{info, warn};

use fem2d::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        bail!("usage: fem2d-assemble <config.json> [multiplier]");
    }

    let config = ModelConfig::from_json_file(&args[1])
        .with_context(|| format!("failed to load model config from {}", args[1]))?;
    let multiplier: f64 = match args.get(2) {
        Some(value) => value
            .parse()
            .with_context(|| format!("invalid multiplier '{value}'"))?,
        None => 1.0,
    };

    let model = MeshModel::from_config(&config).context("failed to build model")?;
    let multipliers = vec![multiplier; model.num_design_variables()];

    let start = std::time::Instant::now();
    let triplets = stiffness_matrix(&model, &multipliers)?;
    let n = model.num_dofs();
    let csr = triplets.to_csr(n, n)?;
    info!(
        "assembled {} triplets ({} after summing) for {} dofs in {:.3} ms",
        triplets.len(),
        csr.nnz(),
        n,
        start.elapsed().as_secs_f64() * 1e3
    );

    let transpose = csr.transpose();
    let asymmetry = csr
        .triplet_iter()
        .zip(transpose.triplet_iter())
        .map(|((_, _, a), (_, _, b))| (a - b).abs())
        .fold(0.0_f64, f64::max);
    if asymmetry > 1e-9 * config.youngs_modulus.abs() {
        warn!("assembled matrix is not symmetric: max |K - K^T| = {asymmetry:e}");
    }

    let entries: Vec<(usize, usize, f64)> = csr
        .triplet_iter()
        .map(|(row, col, &value)| (row, col, value))
        .collect();
    println!("{}", serde_json::to_string(&entries)?);

    Ok(())
}
