// src/rendering/colormap.rs

use serde::{Deserialize, Serialize};

pub type Rgb = (f64, f64, f64);

/// Named color maps for shading hull faces by height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMap {
  Gray,
  Blues,
  Reds,
  Greens,
  Viridis,
  Jet,
}

impl Default for ColorMap {
  fn default() -> Self {
    ColorMap::Gray
  }
}

impl ColorMap {
  fn stops(&self) -> &'static [(f64, Rgb)] {
    match self {
      ColorMap::Gray => &[(0.0, (0.25, 0.25, 0.25)), (1.0, (0.92, 0.92, 0.92))],
      ColorMap::Blues => &[
        (0.0, (0.03, 0.19, 0.42)),
        (0.5, (0.26, 0.57, 0.78)),
        (1.0, (0.87, 0.92, 0.97)),
      ],
      ColorMap::Reds => &[
        (0.0, (0.40, 0.00, 0.05)),
        (0.5, (0.94, 0.23, 0.17)),
        (1.0, (0.99, 0.88, 0.82)),
      ],
      ColorMap::Greens => &[
        (0.0, (0.00, 0.27, 0.11)),
        (0.5, (0.25, 0.67, 0.36)),
        (1.0, (0.90, 0.96, 0.88)),
      ],
      ColorMap::Viridis => &[
        (0.0, (0.267, 0.005, 0.329)),
        (0.25, (0.229, 0.322, 0.546)),
        (0.5, (0.128, 0.567, 0.551)),
        (0.75, (0.369, 0.789, 0.383)),
        (1.0, (0.993, 0.906, 0.144)),
      ],
      ColorMap::Jet => &[
        (0.0, (0.0, 0.0, 0.5)),
        (0.125, (0.0, 0.0, 1.0)),
        (0.375, (0.0, 1.0, 1.0)),
        (0.625, (1.0, 1.0, 0.0)),
        (0.875, (1.0, 0.0, 0.0)),
        (1.0, (0.5, 0.0, 0.0)),
      ],
    }
  }

  /// Color at `t` in [0, 1]; values outside are clamped, NaN maps to the low end.
  pub fn sample(&self, t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let stops = self.stops();

    for pair in stops.windows(2) {
      let (t0, c0) = pair[0];
      let (t1, c1) = pair[1];
      if t <= t1 {
        let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
        return (
          c0.0 + (c1.0 - c0.0) * f,
          c0.1 + (c1.1 - c0.1) * f,
          c0.2 + (c1.2 - c0.2) * f,
        );
      }
    }
    stops[stops.len() - 1].1
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn close(a: Rgb, b: Rgb) -> bool {
    (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9 && (a.2 - b.2).abs() < 1e-9
  }

  #[test]
  fn test_endpoints() {
    assert!(close(ColorMap::Gray.sample(0.0), (0.25, 0.25, 0.25)));
    assert!(close(ColorMap::Gray.sample(1.0), (0.92, 0.92, 0.92)));
    assert!(close(ColorMap::Jet.sample(1.0), (0.5, 0.0, 0.0)));
  }

  #[test]
  fn test_interpolation_and_clamping() {
    let mid = ColorMap::Gray.sample(0.5);
    assert!(close(mid, (0.585, 0.585, 0.585)));
    assert!(close(ColorMap::Reds.sample(-3.0), ColorMap::Reds.sample(0.0)));
    assert!(close(ColorMap::Reds.sample(7.0), ColorMap::Reds.sample(1.0)));
    assert!(close(ColorMap::Blues.sample(f64::NAN), ColorMap::Blues.sample(0.0)));
  }

  #[test]
  fn test_serde_names() {
    let json = serde_json::to_string(&ColorMap::Viridis).unwrap();
    assert_eq!(json, "\"viridis\"");
    let back: ColorMap = serde_json::from_str("\"blues\"").unwrap();
    assert_eq!(back, ColorMap::Blues);
  }
}
