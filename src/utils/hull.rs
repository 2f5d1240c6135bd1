// src/utils/hull.rs
// Convex hull for the handful of points a cell or particle has (4 to 8).
// Every supporting plane is found by testing point triples, then the points on
// that plane are ordered around the face and fan-triangulated, so coplanar
// corners (a box face) give 2 triangles instead of 4 overlapping ones.

use crate::error::GeometryError;
use nalgebra::Vector3;
use std::cmp::Ordering;

/// Triangulated convex hull. Triangles index into `points` and wind
/// counter-clockwise when seen from outside.
#[derive(Debug, Clone)]
pub struct Hull {
  pub points: Vec<Vector3<f64>>,
  pub triangles: Vec<[usize; 3]>,
}

struct Plane {
  normal: Vector3<f64>,
  offset: f64,
}

impl Hull {
  /// Outward unit normal of triangle `t`.
  pub fn normal(&self, t: usize) -> Vector3<f64> {
    let [a, b, c] = self.triangles[t];
    let n = (self.points[b] - self.points[a]).cross(&(self.points[c] - self.points[a]));
    let len = n.norm();
    if len == 0.0 { n } else { n / len }
  }

  /// Centroid of triangle `t`.
  pub fn centroid(&self, t: usize) -> Vector3<f64> {
    let [a, b, c] = self.triangles[t];
    (self.points[a] + self.points[b] + self.points[c]) / 3.0
  }
}

pub fn convex_hull(points: &[Vector3<f64>]) -> Result<Hull, GeometryError> {
  let n = points.len();
  if n < 4 {
    return Err(GeometryError::DegenerateHull { points: n });
  }

  // Tolerance scaled to the size of the point cloud
  let extent = points
    .iter()
    .flat_map(|p| points.iter().map(move |q| (p - q).norm()))
    .fold(0.0_f64, f64::max);
  if extent == 0.0 {
    return Err(GeometryError::DegenerateHull { points: n });
  }
  let eps = 1e-9 * extent;

  let mut planes: Vec<Plane> = Vec::new();
  let mut triangles = Vec::new();

  for i in 0..n {
    for j in (i + 1)..n {
      for k in (j + 1)..n {
        let (v0, v1, v2) = (points[i], points[j], points[k]);
        let raw = (v1 - v0).cross(&(v2 - v0));
        let len = raw.norm();
        if len <= eps * extent {
          continue; // Collinear triple
        }
        let mut normal = raw / len;

        // Which side are the remaining points on?
        let mut above = false;
        let mut below = false;
        for (m, pm) in points.iter().enumerate() {
          if m == i || m == j || m == k {
            continue;
          }
          let side = normal.dot(&(pm - v0));
          if side > eps {
            above = true;
          } else if side < -eps {
            below = true;
          }
        }

        if above && below {
          continue; // Not a supporting plane
        }
        if !above && !below {
          continue; // Everything coplanar so far, no outside direction
        }
        if above {
          normal = -normal;
        }
        let offset = normal.dot(&v0);

        if planes
          .iter()
          .any(|p| p.normal.dot(&normal) > 1.0 - 1e-9 && (p.offset - offset).abs() <= eps)
        {
          continue;
        }

        triangles.extend(triangulate_face(points, &normal, offset, eps));
        planes.push(Plane { normal, offset });
      }
    }
  }

  if triangles.is_empty() {
    return Err(GeometryError::DegenerateHull { points: n });
  }

  Ok(Hull {
    points: points.to_vec(),
    triangles,
  })
}

/// Collect the points lying on a face plane, order them counter-clockwise
/// around `normal` and fan-triangulate.
fn triangulate_face(
  points: &[Vector3<f64>],
  normal: &Vector3<f64>,
  offset: f64,
  eps: f64,
) -> Vec<[usize; 3]> {
  let on_face: Vec<usize> = (0..points.len())
    .filter(|&m| (normal.dot(&points[m]) - offset).abs() <= eps)
    .collect();

  let centroid = on_face
    .iter()
    .fold(Vector3::zeros(), |acc, &m| acc + points[m])
    / on_face.len() as f64;

  // In-plane basis with u x v = normal
  let seed = if normal.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
  let u = normal.cross(&seed).normalize();
  let v = normal.cross(&u);

  let mut ordered: Vec<(f64, usize)> = on_face
    .iter()
    .map(|&m| {
      let d = points[m] - centroid;
      (v.dot(&d).atan2(u.dot(&d)), m)
    })
    .collect();
  ordered.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

  // Coincident points would only produce zero-area slivers
  ordered.dedup_by(|a, b| (points[a.1] - points[b.1]).norm() <= eps);

  let mut tris = Vec::with_capacity(ordered.len().saturating_sub(2));
  for w in 1..ordered.len().saturating_sub(1) {
    tris.push([ordered[0].1, ordered[w].1, ordered[w + 1].1]);
  }
  tris
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tetra() -> Vec<Vector3<f64>> {
    vec![
      Vector3::new(1.0, 0.0, 0.0),
      Vector3::new(0.0, 1.0, 0.0),
      Vector3::new(0.0, 0.0, 1.0),
      Vector3::new(-1.0, -1.0, -1.0),
    ]
  }

  #[test]
  fn test_tetrahedron_has_four_faces() {
    let hull = convex_hull(&tetra()).unwrap();
    assert_eq!(hull.triangles.len(), 4);
  }

  #[test]
  fn test_normals_point_outward() {
    let pts = tetra();
    let hull = convex_hull(&pts).unwrap();
    let center = pts.iter().fold(Vector3::zeros(), |a, p| a + p) / 4.0;

    for t in 0..hull.triangles.len() {
      let outward = hull.centroid(t) - center;
      assert!(hull.normal(t).dot(&outward) > 0.0);
    }
  }

  #[test]
  fn test_box_has_twelve_triangles() {
    let mut pts = Vec::new();
    for x in 0..=1 {
      for y in 0..=1 {
        for z in 0..=1 {
          pts.push(Vector3::new(x as f64 * 2.0, y as f64, z as f64 * 3.0));
        }
      }
    }
    let hull = convex_hull(&pts).unwrap();
    assert_eq!(hull.triangles.len(), 12);

    // Every corner is used
    for i in 0..8 {
      assert!(hull.triangles.iter().any(|t| t.contains(&i)));
    }
  }

  #[test]
  fn test_interior_point_ignored() {
    let mut pts = tetra();
    pts.push(Vector3::new(0.0, 0.0, 0.0));
    let hull = convex_hull(&pts).unwrap();
    assert_eq!(hull.triangles.len(), 4);
    assert!(hull.triangles.iter().all(|t| !t.contains(&4)));
  }

  #[test]
  fn test_degenerate_inputs() {
    let flat = vec![
      Vector3::new(0.0, 0.0, 0.0),
      Vector3::new(1.0, 0.0, 0.0),
      Vector3::new(0.0, 1.0, 0.0),
      Vector3::new(1.0, 1.0, 0.0),
    ];
    assert_eq!(
      convex_hull(&flat).unwrap_err(),
      GeometryError::DegenerateHull { points: 4 }
    );

    let same = vec![Vector3::zeros(); 4];
    assert!(convex_hull(&same).is_err());
    assert!(convex_hull(&tetra()[..3]).is_err());
  }
}
