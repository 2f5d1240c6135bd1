// src/rendering/export.rs

use super::painter::paint_scene;
use super::scene::{Scene, View};
use crate::config::{Config, OutputMode};
use crate::error::RenderError;
use std::fs::File;
use std::path::Path;

/// Write the scene to `path` in the given file format.
///
/// `OutputMode::Interactive` falls back to PNG, which is what the viewer's
/// "save frame" key wants.
pub fn export_scene(
    scene: &Scene,
    view: &View,
    config: &Config,
    mode: OutputMode,
    path: &Path,
) -> Result<(), RenderError> {
    let out = &config.output;
    let (w, h) = (out.width.max(1), out.height.max(1));
    let bg = Some(config.style.background_color);

    match mode {
        OutputMode::Png | OutputMode::Interactive => {
            let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, w as i32, h as i32)?;
            {
                let cr = cairo::Context::new(&surface)?;
                paint_scene(&cr, scene, view, bg, w as f64, h as f64, out.fill, true)?;
            }
            let mut file = File::create(path)?;
            surface.write_to_png(&mut file)?;
        }
        OutputMode::Pdf => {
            let surface = cairo::PdfSurface::new(w as f64, h as f64, path)?;
            {
                let cr = cairo::Context::new(&surface)?;
                paint_scene(&cr, scene, view, bg, w as f64, h as f64, out.fill, true)?;
            }
            surface.finish();
        }
        OutputMode::Svg => {
            let surface = cairo::SvgSurface::new(w as f64, h as f64, Some(path))?;
            {
                let cr = cairo::Context::new(&surface)?;
                paint_scene(&cr, scene, view, bg, w as f64, h as f64, out.fill, true)?;
            }
            surface.finish();
        }
    }

    log::info!("Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::solution::parse_str;

    #[test]
    fn test_png_export() {
        let solution = parse_str(
            "1 0 0\n0 1 0\n0 0 1\n\
             particle: 0.2 0.2 0.2 0.8 0.2 0.2 0.5 0.8 0.2 0.5 0.4 0.8\n\
             ghost: 1.2 0.2 0.2 1.8 0.2 0.2 1.5 0.8 0.2 1.5 0.4 0.8\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.output.width = 64;
        config.output.height = 48;

        let mut scene = Scene::new();
        scene.draw_solution(&solution, &config.style).unwrap();

        let path = std::env::temp_dir().join(format!("tetview_export_{}.png", std::process::id()));
        export_scene(&scene, &config.view, &config, OutputMode::Png, &path).unwrap();

        let mut file = File::open(&path).unwrap();
        let img = cairo::ImageSurface::create_from_png(&mut file).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 48);
    }
}
