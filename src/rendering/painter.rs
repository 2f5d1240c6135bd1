// src/rendering/painter.rs

use super::colormap::Rgb;
use super::primitives::{draw_segment, draw_sphere, draw_triangle, ScreenPrimitive};
use super::scene::{Scene, View};
use gtk4::cairo;

pub fn paint_background(cr: &cairo::Context, color: Rgb) -> Result<(), cairo::Error> {
    let (r, g, b) = color;
    cr.set_source_rgb(r, g, b);
    cr.paint()
}

/// Draw already sorted screen primitives, far to near.
pub fn paint_primitives(
    cr: &cairo::Context,
    prims: &[ScreenPrimitive],
    is_export: bool,
) -> Result<(), cairo::Error> {
    cr.set_line_join(cairo::LineJoin::Round);
    cr.set_line_cap(cairo::LineCap::Round);

    for prim in prims {
        match prim {
            ScreenPrimitive::Triangle { pts, color, alpha, .. } => {
                // Hull edges only help in exports; on screen they flicker while rotating
                draw_triangle(cr, pts, *color, *alpha, is_export)?;
            }
            ScreenPrimitive::Segment {
                start,
                end,
                color,
                width,
                ..
            } => {
                // Publication quality: thicker lines for exports
                let w = if is_export { width * 1.25 } else { *width };
                draw_segment(cr, *start, *end, *color, w)?;
            }
            ScreenPrimitive::Marker {
                center,
                radius,
                color,
                alpha,
                ..
            } => {
                draw_sphere(cr, *center, *radius, *color, *alpha)?;
            }
        }
    }
    Ok(())
}

/// Background plus the whole scene for a `width` x `height` target.
pub fn paint_scene(
    cr: &cairo::Context,
    scene: &Scene,
    view: &View,
    background: Option<Rgb>,
    width: f64,
    height: f64,
    fill: f64,
    is_export: bool,
) -> Result<(), cairo::Error> {
    if let Some(bg) = background {
        paint_background(cr, bg)?;
    }
    let prims = scene.project(view, width, height, fill);
    paint_primitives(cr, &prims, is_export)
}
