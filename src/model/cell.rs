// src/model/cell.rs

use super::particle::Particle;
use crate::error::GeometryError;
use crate::utils::linalg::{basis_from_rows, cart_to_frac, frac_to_cart, invert_basis, wrap_unit};
use nalgebra::{Matrix3, Vector3};

/// Parallelepiped unit cell spanned by three lattice vectors.
///
/// The basis matrix `h` stores one vector per row, so a point with fractional
/// coordinates `s` sits at `p = s · h`.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
  h: Matrix3<f64>,
}

impl Cell {
  pub fn new(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> Self {
    Self {
      h: Matrix3::from_rows(&[a.transpose(), b.transpose(), c.transpose()]),
    }
  }

  pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
    Self { h: basis_from_rows(rows) }
  }

  /// The lattice vectors `[a, b, c]`.
  pub fn vectors(&self) -> [Vector3<f64>; 3] {
    [
      self.h.row(0).transpose(),
      self.h.row(1).transpose(),
      self.h.row(2).transpose(),
    ]
  }

  /// Signed volume, `a · (b × c)`.
  pub fn volume(&self) -> f64 {
    let [a, b, c] = self.vectors();
    a.dot(&b.cross(&c))
  }

  pub fn inverse(&self) -> Result<Matrix3<f64>, GeometryError> {
    invert_basis(&self.h)
  }

  pub fn to_fractional(&self, p: &Vector3<f64>) -> Result<Vector3<f64>, GeometryError> {
    Ok(cart_to_frac(p, &self.inverse()?))
  }

  pub fn to_cartesian(&self, s: &Vector3<f64>) -> Vector3<f64> {
    frac_to_cart(s, &self.h)
  }

  /// Fractional coordinates of `p` wrapped into [0, 1) along each lattice vector.
  pub fn fold_fractional(&self, p: &Vector3<f64>) -> Result<Vector3<f64>, GeometryError> {
    Ok(self.to_fractional(p)?.map(wrap_unit))
  }

  /// Canonical periodic image of `p` inside the primary cell (the ghost fold).
  pub fn periodic_image(&self, p: &Vector3<f64>) -> Result<Vector3<f64>, GeometryError> {
    Ok(self.to_cartesian(&self.fold_fractional(p)?))
  }

  /// Whether `p` lies inside the closed primary cell.
  pub fn contains(&self, p: &Vector3<f64>) -> Result<bool, GeometryError> {
    const TOL: f64 = 1e-9;
    let s = self.to_fractional(p)?;
    Ok(s.iter().all(|&v| (-TOL..=1.0 + TOL).contains(&v)))
  }

  /// The 8 corners, index `4i + 2j + k` being `origin + i·a + j·b + k·c`.
  pub fn corners(&self, origin: &Vector3<f64>) -> [Vector3<f64>; 8] {
    let [a, b, c] = self.vectors();
    let mut out = [Vector3::zeros(); 8];
    for x in 0..=1 {
      for y in 0..=1 {
        for z in 0..=1 {
          out[x * 4 + y * 2 + z] = origin + a * x as f64 + b * y as f64 + c * z as f64;
        }
      }
    }
    out
  }

  /// `i·a + j·b + k·c`
  pub fn lattice_translation(&self, n: [i32; 3]) -> Vector3<f64> {
    self.to_cartesian(&Vector3::new(n[0] as f64, n[1] as f64, n[2] as f64))
  }

  /// The 26 translations to the neighbouring cells.
  pub fn neighbor_translations(&self) -> Vec<Vector3<f64>> {
    let mut out = Vec::with_capacity(26);
    for i in -1..=1 {
      for j in -1..=1 {
        for k in -1..=1 {
          if (i, j, k) != (0, 0, 0) {
            out.push(self.lattice_translation([i, j, k]));
          }
        }
      }
    }
    out
  }

  /// Shift a particle so its center of mass lands in the primary cell.
  pub fn wrap_particle(&self, particle: &mut Particle) -> Result<(), GeometryError> {
    let com = particle.center_of_mass();
    let image = self.periodic_image(&com)?;
    particle.translate(&(image - com));
    Ok(())
  }

  /// True when some vertex of `particle` sticks out of the primary cell.
  pub fn crosses_boundary(&self, particle: &Particle) -> Result<bool, GeometryError> {
    for p in particle.points() {
      if !self.contains(p)? {
        return Ok(true);
      }
    }
    Ok(false)
  }
}
