// src/model/solution.rs

use super::cell::Cell;
use super::particle::{Particle, ParticleKind};
use crate::error::GeometryError;
use std::fmt;

/// A candidate packing: the unit cell plus every particle listed in the file,
/// ghosts included, in file order.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
  pub cell: Cell,
  pub particles: Vec<Particle>,
}

impl Solution {
  pub fn new(cell: Cell, particles: Vec<Particle>) -> Self {
    Self { cell, particles }
  }

  pub fn primaries(&self) -> impl Iterator<Item = &Particle> {
    self.particles.iter().filter(|p| !p.is_ghost())
  }

  pub fn ghosts(&self) -> impl Iterator<Item = &Particle> {
    self.particles.iter().filter(|p| p.is_ghost())
  }

  /// Move every primary's center of mass into the primary cell.
  ///
  /// Ghosts are lattice translates of a primary, so folding them would stack
  /// them onto it. When the solution carries ghosts they are rebuilt as the 26
  /// neighbour images of the wrapped primaries instead.
  pub fn wrap_particles(&mut self) -> Result<(), GeometryError> {
    let had_ghosts = self.ghosts().next().is_some();
    self.particles.retain(|p| !p.is_ghost());
    for p in &mut self.particles {
      self.cell.wrap_particle(p)?;
    }
    if had_ghosts {
      self.rebuild_ghosts();
    }
    Ok(())
  }

  /// Copy with every primary wrapped, see `wrap_particles`.
  pub fn wrapped(&self) -> Result<Solution, GeometryError> {
    let mut out = self.clone();
    out.wrap_particles()?;
    Ok(out)
  }

  /// Replace the ghosts by the neighbour images of the current primaries,
  /// appended after them in primary order.
  pub fn rebuild_ghosts(&mut self) {
    self.particles.retain(|p| !p.is_ghost());
    let shifts = self.cell.neighbor_translations();
    let mut ghosts = Vec::with_capacity(self.particles.len() * shifts.len());
    for p in &self.particles {
      for dr in &shifts {
        let mut g = p.clone().with_kind(ParticleKind::Ghost);
        g.translate(dr);
        ghosts.push(g);
      }
    }
    self.particles.extend(ghosts);
  }

  /// Number of primary particles with a vertex outside the primary cell.
  pub fn boundary_crossings(&self) -> Result<usize, GeometryError> {
    let mut count = 0;
    for p in self.primaries() {
      if self.cell.crosses_boundary(p)? {
        count += 1;
      }
    }
    Ok(count)
  }

  /// One-paragraph summary for the console.
  pub fn report(&self) -> String {
    let [a, b, c] = self.cell.vectors();
    let mut s = String::new();
    s.push_str(&format!("a = [{:10.5} {:10.5} {:10.5}]\n", a.x, a.y, a.z));
    s.push_str(&format!("b = [{:10.5} {:10.5} {:10.5}]\n", b.x, b.y, b.z));
    s.push_str(&format!("c = [{:10.5} {:10.5} {:10.5}]\n", c.x, c.y, c.z));
    s.push_str(&format!("Volume:     {:.6}\n", self.cell.volume()));
    s.push_str(&format!(
      "Particles:  {} ({} ghost)\n",
      self.primaries().count(),
      self.ghosts().count()
    ));
    match self.boundary_crossings() {
      Ok(n) => s.push_str(&format!("Crossing cell boundary: {}", n)),
      Err(e) => s.push_str(&format!("Crossing cell boundary: n/a ({})", e)),
    }
    s
  }
}

impl fmt::Display for Solution {
  /// Same layout the parser reads: three basis rows, then one tagged line per
  /// particle.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for v in self.cell.vectors() {
      writeln!(f, "{} {} {}", v.x, v.y, v.z)?;
    }
    for p in &self.particles {
      writeln!(f, "{}", p)?;
    }
    Ok(())
  }
}
