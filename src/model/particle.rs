// src/model/particle.rs

use crate::error::GeometryError;
use crate::utils::hull::{convex_hull, Hull};
use nalgebra::Vector3;
use std::fmt;

/// Whether a particle belongs to the primary cell or is a periodic copy of one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
  Primary,
  Ghost,
}

impl ParticleKind {
  /// Tag written in front of the coordinates in a solution file.
  pub fn tag(&self) -> &'static str {
    match self {
      ParticleKind::Primary => "particle:",
      ParticleKind::Ghost => "ghost:",
    }
  }
}

/// A tetrahedral particle (4 vertices) or a sphere (1 center point).
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
  points: Vec<Vector3<f64>>,
  kind: ParticleKind,
}

impl Particle {
  pub fn tetrahedron(vertices: [Vector3<f64>; 4]) -> Self {
    Self {
      points: vertices.to_vec(),
      kind: ParticleKind::Primary,
    }
  }

  pub fn sphere(center: Vector3<f64>) -> Self {
    Self {
      points: vec![center],
      kind: ParticleKind::Primary,
    }
  }

  /// Build from packed coordinates `x1 y1 z1 x2 ...`. Returns `None` unless
  /// there are exactly 3 or 12 values.
  pub fn from_coordinates(coords: &[f64], kind: ParticleKind) -> Option<Self> {
    if coords.len() != 3 && coords.len() != 12 {
      return None;
    }
    let points = coords
      .chunks_exact(3)
      .map(|c| Vector3::new(c[0], c[1], c[2]))
      .collect();
    Some(Self { points, kind })
  }

  pub fn with_kind(mut self, kind: ParticleKind) -> Self {
    self.kind = kind;
    self
  }

  pub fn points(&self) -> &[Vector3<f64>] {
    &self.points
  }

  pub fn is_ghost(&self) -> bool {
    self.kind == ParticleKind::Ghost
  }

  pub fn is_sphere(&self) -> bool {
    self.points.len() == 1
  }

  pub fn center_of_mass(&self) -> Vector3<f64> {
    let sum = self.points.iter().fold(Vector3::zeros(), |acc, p| acc + p);
    sum / self.points.len() as f64
  }

  /// Shift every point by `dr` in place.
  pub fn translate(&mut self, dr: &Vector3<f64>) {
    for p in &mut self.points {
      *p += dr;
    }
  }

  pub fn hull(&self) -> Result<Hull, GeometryError> {
    convex_hull(&self.points)
  }
}

impl fmt::Display for Particle {
  /// `tag x1 y1 z1 x2 y2 z2 ...`
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.kind.tag())?;
    for p in &self.points {
      write!(f, " {} {} {}", p.x, p.y, p.z)?;
    }
    Ok(())
  }
}
