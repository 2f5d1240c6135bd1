// src/rendering/scene.rs

use super::colormap::{ColorMap, Rgb};
use super::primitives::{Marker, Mesh, Primitive, ScreenPrimitive, Segment};
use crate::config::RenderStyle;
use crate::error::GeometryError;
use crate::model::{Cell, Particle, Solution};
use crate::utils::hull::Hull;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Orbit camera. Angles in degrees; elevation 90 looks straight down the z axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct View {
  pub azimuth: f64,
  pub elevation: f64,
  pub zoom: f64,
}

impl Default for View {
  fn default() -> Self {
    Self {
      azimuth: -35.0,
      elevation: 25.0,
      zoom: 1.0,
    }
  }
}

impl View {
  /// World -> camera space: x right, y up, z towards the viewer.
  pub fn rotate(&self, p: &Vector3<f64>) -> Vector3<f64> {
    let (sin_a, cos_a) = self.azimuth.to_radians().sin_cos();
    let (sin_t, cos_t) = (self.elevation - 90.0).to_radians().sin_cos();

    // Spin around world z
    let x1 = p.x * cos_a - p.y * sin_a;
    let y1 = p.x * sin_a + p.y * cos_a;
    let z1 = p.z;

    // Tilt around screen x
    let y2 = y1 * cos_t - z1 * sin_t;
    let z2 = y1 * sin_t + z1 * cos_t;

    Vector3::new(x1, y2, z2)
  }
}

/// Opacity and color scheme for one hull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStyle {
  pub opacity: f64,
  pub colormap: ColorMap,
}

/// Persistent canvas. Draw calls accumulate world-space primitives until
/// `clear` is called; painting is a separate pass.
#[derive(Debug, Clone, Default)]
pub struct Scene {
  primitives: Vec<Primitive>,
}

impl Scene {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn clear(&mut self) {
    self.primitives.clear();
  }

  pub fn primitives(&self) -> &[Primitive] {
    &self.primitives
  }

  pub fn is_empty(&self) -> bool {
    self.primitives.is_empty()
  }

  /// Parallelepiped at `origin`: corner markers, translucent hull, basis edges.
  pub fn draw_cell(
    &mut self,
    cell: &Cell,
    origin: &Vector3<f64>,
    style: &RenderStyle,
  ) -> Result<(), GeometryError> {
    let corners = cell.corners(origin);
    let hull = crate::utils::hull::convex_hull(&corners)?;

    for c in &corners {
      self.primitives.push(Primitive::Marker(Marker {
        center: *c,
        radius: style.corner_radius,
        color: style.cell_edge_color,
        opacity: 1.0,
      }));
    }

    self.push_hull(
      hull,
      MeshStyle {
        opacity: style.cell_opacity,
        colormap: style.cell_colormap,
      },
    );

    for e in cell.vectors() {
      self.primitives.push(Primitive::Segment(Segment {
        start: *origin,
        end: origin + e,
        color: style.cell_edge_color,
        width: style.cell_line_width,
      }));
    }
    Ok(())
  }

  /// A single-point particle becomes a sphere marker, anything else its hull.
  pub fn draw_particle(
    &mut self,
    particle: &Particle,
    origin: &Vector3<f64>,
    style: MeshStyle,
    marker_radius: f64,
  ) -> Result<(), GeometryError> {
    if particle.is_sphere() {
      self.primitives.push(Primitive::Marker(Marker {
        center: particle.points()[0] + origin,
        radius: marker_radius,
        color: style.colormap.sample(0.5),
        opacity: style.opacity,
      }));
      return Ok(());
    }

    let mut hull = particle.hull()?;
    for p in &mut hull.points {
      *p += origin;
    }
    self.push_hull(hull, style);
    Ok(())
  }

  /// Cell plus every particle, following the style switches.
  pub fn draw_solution(
    &mut self,
    solution: &Solution,
    style: &RenderStyle,
  ) -> Result<(), GeometryError> {
    let origin = Vector3::zeros();
    self.draw_cell(&solution.cell, &origin, style)?;

    let wrapped;
    let solution = if style.wrap_particles {
      wrapped = solution.wrapped()?;
      &wrapped
    } else {
      solution
    };

    for particle in &solution.particles {
      self.draw_styled_particle(&solution.cell, particle, style)?;
    }
    Ok(())
  }

  /// One particle of a solution in its primary or ghost style, followed by its
  /// 26 periodic images when those are switched on.
  ///
  /// Wrapping is a property of the whole solution (ghosts are rebuilt around
  /// the wrapped primaries), so callers wrap before drawing. Returns false for a
  /// hidden ghost, which draws nothing.
  pub fn draw_styled_particle(
    &mut self,
    cell: &Cell,
    particle: &Particle,
    style: &RenderStyle,
  ) -> Result<bool, GeometryError> {
    if particle.is_ghost() && !style.show_ghosts {
      return Ok(false);
    }

    let origin = Vector3::zeros();
    let ghost = MeshStyle {
      opacity: style.ghost_opacity,
      colormap: style.ghost_colormap,
    };

    if particle.is_ghost() {
      self.draw_particle(particle, &origin, ghost, style.marker_radius)?;
      return Ok(true);
    }

    let primary = MeshStyle {
      opacity: style.particle_opacity,
      colormap: style.particle_colormap,
    };
    self.draw_particle(particle, &origin, primary, style.marker_radius)?;

    if style.periodic_images {
      let mut p = particle.clone();
      for dr in cell.neighbor_translations() {
        p.translate(&dr);
        self.draw_particle(&p, &origin, ghost, style.marker_radius)?;
        p.translate(&-dr);
      }
    }
    Ok(true)
  }

  /// Color each face by its mean height within the mesh.
  fn push_hull(&mut self, hull: Hull, style: MeshStyle) {
    let (z_min, z_max) = hull
      .points
      .iter()
      .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.z), hi.max(p.z)));
    let span = z_max - z_min;

    let colors: Vec<Rgb> = (0..hull.triangles.len())
      .map(|t| {
        let z = hull.centroid(t).z;
        let level = if span > 0.0 { (z - z_min) / span } else { 0.5 };
        style.colormap.sample(level)
      })
      .collect();

    self.primitives.push(Primitive::Mesh(Mesh {
      vertices: hull.points,
      triangles: hull.triangles,
      colors,
      opacity: style.opacity,
    }));
  }

  /// Project to a `width` x `height` viewport and sort back to front.
  ///
  /// The model is scaled to fill `fill` of the smaller viewport dimension
  /// (times the view zoom) and centered.
  pub fn project(&self, view: &View, width: f64, height: f64, fill: f64) -> Vec<ScreenPrimitive> {
    // 1. Bounds of the rotated model
    let mut min = [f64::MAX; 2];
    let mut max = [f64::MIN; 2];
    for prim in &self.primitives {
      for p in prim.points() {
        let r = view.rotate(&p);
        min[0] = min[0].min(r.x);
        min[1] = min[1].min(r.y);
        max[0] = max[0].max(r.x);
        max[1] = max[1].max(r.y);
      }
    }
    if min[0] > max[0] {
      return Vec::new();
    }

    // 2. Fit to viewport
    let model_w = (max[0] - min[0]).max(1e-6);
    let model_h = (max[1] - min[1]).max(1e-6);
    let scale = (width * fill / model_w).min(height * fill / model_h) * view.zoom;
    let box_cx = (min[0] + max[0]) / 2.0;
    let box_cy = (min[1] + max[1]) / 2.0;

    let to_screen = |r: &Vector3<f64>| -> [f64; 2] {
      [
        (r.x - box_cx) * scale + width / 2.0,
        height / 2.0 - (r.y - box_cy) * scale,
      ]
    };

    // 3. Emit screen primitives
    let mut out = Vec::new();
    for prim in &self.primitives {
      match prim {
        Primitive::Mesh(mesh) => {
          let rotated: Vec<Vector3<f64>> = mesh.vertices.iter().map(|v| view.rotate(v)).collect();
          for (t, tri) in mesh.triangles.iter().enumerate() {
            let (a, b, c) = (rotated[tri[0]], rotated[tri[1]], rotated[tri[2]]);
            let n = (b - a).cross(&(c - a));
            let facing = if n.norm() > 0.0 { n.z.abs() / n.norm() } else { 0.0 };
            let shade = 0.45 + 0.55 * facing;
            let (r, g, bl) = mesh.colors[t];

            out.push(ScreenPrimitive::Triangle {
              pts: [to_screen(&a), to_screen(&b), to_screen(&c)],
              depth: (a.z + b.z + c.z) / 3.0,
              color: (r * shade, g * shade, bl * shade),
              alpha: mesh.opacity,
            });
          }
        }
        Primitive::Segment(seg) => {
          let (a, b) = (view.rotate(&seg.start), view.rotate(&seg.end));
          out.push(ScreenPrimitive::Segment {
            start: to_screen(&a),
            end: to_screen(&b),
            depth: (a.z + b.z) / 2.0,
            color: seg.color,
            width: seg.width,
          });
        }
        Primitive::Marker(m) => {
          let c = view.rotate(&m.center);
          out.push(ScreenPrimitive::Marker {
            center: to_screen(&c),
            radius: m.radius * scale,
            depth: c.z,
            color: m.color,
            alpha: m.opacity,
          });
        }
      }
    }

    // Painter's algorithm: far first
    out.sort_by(|a, b| a.z_depth().partial_cmp(&b.z_depth()).unwrap_or(Ordering::Equal));
    out
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::ParticleKind;

  fn unit_solution() -> Solution {
    let cell = Cell::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    let tet = Particle::tetrahedron([
      Vector3::new(0.2, 0.2, 0.2),
      Vector3::new(0.8, 0.2, 0.2),
      Vector3::new(0.5, 0.8, 0.2),
      Vector3::new(0.5, 0.4, 0.8),
    ]);
    let mut ghost = tet.clone().with_kind(ParticleKind::Ghost);
    ghost.translate(&Vector3::new(1.0, 0.0, 0.0));
    Solution::new(cell, vec![tet, ghost])
  }

  fn count(scene: &Scene) -> (usize, usize, usize) {
    let mut n = (0, 0, 0);
    for p in scene.primitives() {
      match p {
        Primitive::Mesh(_) => n.0 += 1,
        Primitive::Segment(_) => n.1 += 1,
        Primitive::Marker(_) => n.2 += 1,
      }
    }
    n
  }

  #[test]
  fn test_draw_cell() {
    let mut scene = Scene::new();
    let s = unit_solution();
    scene
      .draw_cell(&s.cell, &Vector3::new(0.0, 0.0, 2.0), &RenderStyle::default())
      .unwrap();

    assert_eq!(count(&scene), (1, 3, 8));
    match &scene.primitives()[8] {
      Primitive::Mesh(m) => {
        assert_eq!(m.triangles.len(), 12);
        assert!(m.vertices.iter().all(|v| v.z >= 2.0));
      }
      other => panic!("expected hull mesh, got {:?}", other),
    }
  }

  #[test]
  fn test_scene_accumulates_until_cleared() {
    let mut scene = Scene::new();
    let s = unit_solution();
    let style = MeshStyle {
      opacity: 0.5,
      colormap: ColorMap::Reds,
    };
    scene.draw_particle(&s.particles[0], &Vector3::zeros(), style, 0.5).unwrap();
    scene.draw_particle(&s.particles[0], &Vector3::zeros(), style, 0.5).unwrap();
    assert_eq!(scene.primitives().len(), 2);

    scene.clear();
    assert!(scene.is_empty());
  }

  #[test]
  fn test_sphere_particle_is_marker() {
    let mut scene = Scene::new();
    let p = Particle::sphere(Vector3::new(1.0, 2.0, 3.0));
    let style = MeshStyle {
      opacity: 0.3,
      colormap: ColorMap::Gray,
    };
    scene.draw_particle(&p, &Vector3::new(1.0, 0.0, 0.0), style, 0.5).unwrap();

    match &scene.primitives()[0] {
      Primitive::Marker(m) => {
        assert_eq!(m.center, Vector3::new(2.0, 2.0, 3.0));
        assert_eq!(m.radius, 0.5);
        assert_eq!(m.opacity, 0.3);
      }
      other => panic!("expected marker, got {:?}", other),
    }
  }

  #[test]
  fn test_ghost_visibility_and_images() {
    let s = unit_solution();
    let mut style = RenderStyle::default();

    let mut scene = Scene::new();
    scene.draw_solution(&s, &style).unwrap();
    // cell hull + two particles
    assert_eq!(count(&scene).0, 3);

    style.show_ghosts = false;
    scene.clear();
    scene.draw_solution(&s, &style).unwrap();
    assert_eq!(count(&scene).0, 2);

    style.periodic_images = true;
    scene.clear();
    scene.draw_solution(&s, &style).unwrap();
    assert_eq!(count(&scene).0, 2 + 26);

    // Drawing images must not move the particle itself
    match &scene.primitives()[12] {
      Primitive::Mesh(m) => assert!(m.vertices.iter().all(|v| v.x < 1.0)),
      other => panic!("expected particle mesh, got {:?}", other),
    }
  }

  #[test]
  fn test_styled_particle_images() {
    let s = unit_solution();
    let mut style = RenderStyle::default();
    style.periodic_images = true;

    let mut scene = Scene::new();
    assert!(scene.draw_styled_particle(&s.cell, &s.particles[0], &style).unwrap());
    assert_eq!(count(&scene).0, 1 + 26);

    // Ghosts never get images of their own
    scene.clear();
    assert!(scene.draw_styled_particle(&s.cell, &s.particles[1], &style).unwrap());
    assert_eq!(count(&scene).0, 1);

    style.show_ghosts = false;
    scene.clear();
    assert!(!scene.draw_styled_particle(&s.cell, &s.particles[1], &style).unwrap());
    assert!(scene.is_empty());
  }

  #[test]
  fn test_wrapped_ghosts_stay_apart() {
    let s = unit_solution();
    let mut style = RenderStyle::default();
    style.wrap_particles = true;

    let mut scene = Scene::new();
    scene.draw_solution(&s, &style).unwrap();
    // cell hull + primary + its 26 rebuilt ghosts
    assert_eq!(count(&scene).0, 1 + 1 + 26);

    let meshes: Vec<&Mesh> = scene
      .primitives()
      .iter()
      .filter_map(|p| match p {
        Primitive::Mesh(m) => Some(m),
        _ => None,
      })
      .collect();
    let primary = &meshes[1].vertices;
    for ghost in &meshes[2..] {
      let shift = (ghost.vertices[0] - primary[0]).norm();
      assert!(shift > 0.5);
    }
  }

  #[test]
  fn test_degenerate_particle_fails() {
    let mut scene = Scene::new();
    let flat = Particle::tetrahedron([
      Vector3::new(0.0, 0.0, 0.0),
      Vector3::new(1.0, 0.0, 0.0),
      Vector3::new(0.0, 1.0, 0.0),
      Vector3::new(1.0, 1.0, 0.0),
    ]);
    let style = MeshStyle {
      opacity: 1.0,
      colormap: ColorMap::Gray,
    };
    assert!(scene.draw_particle(&flat, &Vector3::zeros(), style, 0.5).is_err());
    assert!(scene.is_empty());
  }

  #[test]
  fn test_projection_fits_and_sorts() {
    let mut scene = Scene::new();
    scene.draw_solution(&unit_solution(), &RenderStyle::default()).unwrap();

    let prims = scene.project(&View::default(), 400.0, 300.0, 0.8);
    assert!(!prims.is_empty());

    for w in prims.windows(2) {
      assert!(w[0].z_depth() <= w[1].z_depth());
    }

    for p in &prims {
      if let ScreenPrimitive::Triangle { pts, .. } = p {
        for q in pts {
          assert!(q[0] >= 0.0 && q[0] <= 400.0);
          assert!(q[1] >= 0.0 && q[1] <= 300.0);
        }
      }
    }

    assert!(Scene::new().project(&View::default(), 400.0, 300.0, 0.8).is_empty());
  }

  #[test]
  fn test_view_rotation() {
    // Side view: world z is screen up, world y points away from the viewer
    let side = View {
      azimuth: 0.0,
      elevation: 0.0,
      zoom: 1.0,
    };
    let up = side.rotate(&Vector3::new(0.0, 0.0, 1.0));
    assert!((up - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    let away = side.rotate(&Vector3::new(0.0, 1.0, 0.0));
    assert!((away - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-12);

    // Top view leaves the point where it is
    let top = View {
      azimuth: 0.0,
      elevation: 90.0,
      zoom: 1.0,
    };
    let p = Vector3::new(0.3, -0.2, 0.9);
    assert!((top.rotate(&p) - p).norm() < 1e-12);
  }
}
