//! 2x2 Gauss quadrature and bilinear shape functions on the reference square
//!
//! The reference element spans `r, s` in `[-1, 1]`. Corner nodes are ordered
//! counter-clockwise from `(-1, -1)`, and the Gauss points follow the same
//! order so that point `g` sits in the quadrant of node `g`.

use super::Mat3x8;

/// Quadrature points per element
pub const GAUSS_POINTS_PER_ELEMENT: usize = 4;

/// A sample point of the reference element with its integration weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussPoint {
    pub r: f64,
    pub s: f64,
    pub weight: f64,
}

/// The four points of the 2x2 Gauss-Legendre rule, unit weights
pub fn gauss_points_2x2() -> [GaussPoint; GAUSS_POINTS_PER_ELEMENT] {
    let gp = 1.0 / 3.0_f64.sqrt();
    [
        GaussPoint { r: -gp, s: -gp, weight: 1.0 },
        GaussPoint { r: gp, s: -gp, weight: 1.0 },
        GaussPoint { r: gp, s: gp, weight: 1.0 },
        GaussPoint { r: -gp, s: gp, weight: 1.0 },
    ]
}

/// Bilinear shape functions N1..N4 at natural coordinates (r, s)
pub fn shape_functions(r: f64, s: f64) -> [f64; 4] {
    [
        (1.0 - r) * (1.0 - s) / 4.0,
        (1.0 + r) * (1.0 - s) / 4.0,
        (1.0 + r) * (1.0 + s) / 4.0,
        (1.0 - r) * (1.0 + s) / 4.0,
    ]
}

/// Shape function derivatives `(dN/dr, dN/ds)` at natural coordinates (r, s)
pub fn shape_function_derivatives(r: f64, s: f64) -> ([f64; 4], [f64; 4]) {
    let dn_dr = [
        -(1.0 - s) / 4.0,
        (1.0 - s) / 4.0,
        (1.0 + s) / 4.0,
        -(1.0 + s) / 4.0,
    ];
    let dn_ds = [
        -(1.0 - r) / 4.0,
        -(1.0 + r) / 4.0,
        (1.0 + r) / 4.0,
        (1.0 - r) / 4.0,
    ];
    (dn_dr, dn_ds)
}

/// Strain-displacement matrix [B] at natural coordinates (r, s)
///
/// The grid is axis-aligned and uniform, so the inverse Jacobian is the
/// constant diagonal `diag(dr_dx, ds_dy)`.
///
/// Rows are (epsilon_x, epsilon_y, gamma_xy), columns (u1, v1, ..., u4, v4).
pub fn strain_displacement_matrix(r: f64, s: f64, dr_dx: f64, ds_dy: f64) -> Mat3x8 {
    let (dn_dr, dn_ds) = shape_function_derivatives(r, s);

    let mut b = Mat3x8::zeros();
    for k in 0..4 {
        let dn_dx = dr_dx * dn_dr[k];
        let dn_dy = ds_dy * dn_ds[k];

        b[(0, 2 * k)] = dn_dx;
        b[(1, 2 * k + 1)] = dn_dy;
        b[(2, 2 * k)] = dn_dy;
        b[(2, 2 * k + 1)] = dn_dx;
    }
    b
}
