// src/utils/linalg.rs

use crate::error::GeometryError;
use nalgebra::{Matrix3, Vector3};

/// Relative tolerance below which a basis is treated as singular.
const SINGULAR_TOL: f64 = 1e-12;

/// Build the basis matrix with one lattice vector per row.
///
/// # Arguments
/// * `rows` - Lattice vectors `[a, b, c]`
pub fn basis_from_rows(rows: [[f64; 3]; 3]) -> Matrix3<f64> {
  Matrix3::from_row_slice(&[
    rows[0][0], rows[0][1], rows[0][2],
    rows[1][0], rows[1][1], rows[1][2],
    rows[2][0], rows[2][1], rows[2][2],
  ])
}

/// Invert a row basis, refusing (nearly) linearly dependent vectors.
///
/// The threshold is relative to the product of the row lengths, so tiny and
/// huge cells are judged the same way.
pub fn invert_basis(h: &Matrix3<f64>) -> Result<Matrix3<f64>, GeometryError> {
  let det = h.determinant();
  let scale = h.row(0).norm() * h.row(1).norm() * h.row(2).norm();

  if scale == 0.0 || det.abs() <= SINGULAR_TOL * scale {
    return Err(GeometryError::SingularCell { volume: det });
  }

  h.try_inverse()
    .ok_or(GeometryError::SingularCell { volume: det })
}

/// Convert fractional coordinates to Cartesian.
///
/// # Formula
/// ```text
/// Cartesian = H^T × Fractional   (row vector form: p = s · H)
/// ```
pub fn frac_to_cart(frac: &Vector3<f64>, h: &Matrix3<f64>) -> Vector3<f64> {
  h.transpose() * frac
}

/// Convert Cartesian coordinates to fractional given a precomputed inverse.
///
/// # Formula
/// ```text
/// Fractional = (H^-1)^T × Cartesian   (row vector form: s = p · H^-1)
/// ```
pub fn cart_to_frac(cart: &Vector3<f64>, h_inv: &Matrix3<f64>) -> Vector3<f64> {
  h_inv.transpose() * cart
}

/// Wrap a fractional coordinate into [0, 1).
///
/// Values that land within rounding distance of 1 snap to 0, otherwise a point
/// sitting on a cell face would flip between the two faces when folded twice.
pub fn wrap_unit(s: f64) -> f64 {
  let w = s.rem_euclid(1.0);
  if w >= 1.0 - SINGULAR_TOL || w < 0.0 {
    0.0
  } else {
    w
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cubic_lattice() {
    let h = basis_from_rows([[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]]);

    let cart = frac_to_cart(&Vector3::new(0.5, 0.5, 0.5), &h);

    assert!((cart.x - 2.5).abs() < 1e-10);
    assert!((cart.y - 2.5).abs() < 1e-10);
    assert!((cart.z - 2.5).abs() < 1e-10);
  }

  #[test]
  fn test_roundtrip() {
    // Non-orthogonal lattice
    let h = basis_from_rows([[4.0, 0.0, 0.0], [2.0, 3.46, 0.0], [0.0, 1.0, 5.0]]);
    let inv = invert_basis(&h).unwrap();

    let frac_orig = Vector3::new(0.333, 0.667, 0.25);
    let cart = frac_to_cart(&frac_orig, &h);
    let frac_back = cart_to_frac(&cart, &inv);

    assert!((frac_back - frac_orig).norm() < 1e-10);
  }

  #[test]
  fn test_row_convention() {
    // p = 1 * a should give fractional (1, 0, 0) even for a sheared cell
    let h = basis_from_rows([[1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 2.0]]);
    let inv = invert_basis(&h).unwrap();

    let s = cart_to_frac(&Vector3::new(1.0, 1.0, 0.0), &inv);
    assert!((s - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
  }

  #[test]
  fn test_singular() {
    let h = basis_from_rows([[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
    assert!(matches!(invert_basis(&h), Err(GeometryError::SingularCell { .. })));

    let zero = basis_from_rows([[0.0; 3]; 3]);
    assert!(invert_basis(&zero).is_err());
  }

  #[test]
  fn test_wrap_unit() {
    assert_eq!(wrap_unit(0.25), 0.25);
    assert!((wrap_unit(1.75) - 0.75).abs() < 1e-12);
    assert!((wrap_unit(-0.25) - 0.75).abs() < 1e-12);
    assert_eq!(wrap_unit(-1e-17), 0.0);
    assert_eq!(wrap_unit(1.0), 0.0);
    assert_eq!(wrap_unit(3.0), 0.0);
  }
}
