// src/rendering/primitives.rs

use super::colormap::Rgb;
use gtk4::cairo::{self, RadialGradient};
use nalgebra::Vector3;
use std::f64::consts::PI;

// ============================================================================
// WORLD SPACE (what the scene accumulates)
// ============================================================================

/// Triangulated surface with one color per triangle.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub vertices: Vec<Vector3<f64>>,
    pub triangles: Vec<[usize; 3]>,
    pub colors: Vec<Rgb>,
    pub opacity: f64,
}

#[derive(Clone, Debug)]
pub struct Segment {
    pub start: Vector3<f64>,
    pub end: Vector3<f64>,
    pub color: Rgb,
    pub width: f64,
}

/// Sphere drawn as a shaded disc, radius in world units.
#[derive(Clone, Debug)]
pub struct Marker {
    pub center: Vector3<f64>,
    pub radius: f64,
    pub color: Rgb,
    pub opacity: f64,
}

#[derive(Clone, Debug)]
pub enum Primitive {
    Mesh(Mesh),
    Segment(Segment),
    Marker(Marker),
}

impl Primitive {
    /// Every world point the primitive touches, for bounds.
    pub fn points(&self) -> Vec<Vector3<f64>> {
        match self {
            Primitive::Mesh(m) => m.vertices.clone(),
            Primitive::Segment(s) => vec![s.start, s.end],
            Primitive::Marker(m) => {
                let r = Vector3::repeat(m.radius);
                vec![m.center - r, m.center + r]
            }
        }
    }
}

// ============================================================================
// SCREEN SPACE (after projection, ready for cairo)
// ============================================================================

#[derive(Clone, Debug)]
pub enum ScreenPrimitive {
    Triangle {
        pts: [[f64; 2]; 3],
        depth: f64,
        color: Rgb,
        alpha: f64,
    },
    Segment {
        start: [f64; 2],
        end: [f64; 2],
        depth: f64,
        color: Rgb,
        width: f64,
    },
    Marker {
        center: [f64; 2],
        radius: f64,
        depth: f64,
        color: Rgb,
        alpha: f64,
    },
}

impl ScreenPrimitive {
    pub fn z_depth(&self) -> f64 {
        match self {
            ScreenPrimitive::Triangle { depth, .. }
            | ScreenPrimitive::Segment { depth, .. }
            | ScreenPrimitive::Marker { depth, .. } => *depth,
        }
    }
}

pub fn draw_triangle(
    cr: &cairo::Context,
    pts: &[[f64; 2]; 3],
    color: Rgb,
    alpha: f64,
    outline: bool,
) -> Result<(), cairo::Error> {
    let (r, g, b) = color;

    cr.move_to(pts[0][0], pts[0][1]);
    cr.line_to(pts[1][0], pts[1][1]);
    cr.line_to(pts[2][0], pts[2][1]);
    cr.close_path();

    cr.set_source_rgba(r, g, b, alpha);
    if outline {
        cr.fill_preserve()?;
        cr.set_source_rgba(r * 0.4, g * 0.4, b * 0.4, alpha * 0.6);
        cr.set_line_width(0.6);
        cr.stroke()
    } else {
        cr.fill()
    }
}

pub fn draw_segment(
    cr: &cairo::Context,
    start: [f64; 2],
    end: [f64; 2],
    color: Rgb,
    width: f64,
) -> Result<(), cairo::Error> {
    let (r, g, b) = color;
    cr.set_source_rgb(r, g, b);
    cr.set_line_width(width);
    cr.move_to(start[0], start[1]);
    cr.line_to(end[0], end[1]);
    cr.stroke()
}

/// Sphere impostor: radial gradient with the highlight up and to the left.
pub fn draw_sphere(
    cr: &cairo::Context,
    center: [f64; 2],
    radius: f64,
    color: Rgb,
    alpha: f64,
) -> Result<(), cairo::Error> {
    if radius <= 0.0 {
        return Ok(());
    }
    let (x, y) = (center[0], center[1]);
    let (r, g, b) = color;

    let gradient = RadialGradient::new(
        x - radius * 0.3,
        y - radius * 0.3,
        radius * 0.1,
        x,
        y,
        radius,
    );

    // Highlight -> Base Color -> Shadow
    gradient.add_color_stop_rgba(0.0, 1.0, 1.0, 1.0, alpha);
    gradient.add_color_stop_rgba(
        0.2,
        (r + 0.2).min(1.0),
        (g + 0.2).min(1.0),
        (b + 0.2).min(1.0),
        alpha,
    );
    gradient.add_color_stop_rgba(1.0, r * 0.6, g * 0.6, b * 0.6, alpha);

    cr.set_source(&gradient)?;
    cr.arc(x, y, radius, 0.0, 2.0 * PI);
    cr.fill()?;

    // Thin outline for crispness in vector output
    cr.set_source_rgba(0.0, 0.0, 0.0, 0.3 * alpha);
    cr.set_line_width((radius * 0.05).max(0.5));
    cr.arc(x, y, radius, 0.0, 2.0 * PI);
    cr.stroke()
}
