// src/rendering/animation.rs
// Batch frame output: either one frame per solution file (the scene is cleared
// between files), or a build-up of a single file where every frame adds one
// more particle to what is already on the canvas.

use super::export::export_scene;
use super::scene::Scene;
use crate::config::{Config, OutputMode, RenderStyle};
use crate::error::RenderError;
use crate::io::frames::frame_name;
use crate::io::load_solution;
use crate::model::Solution;
use nalgebra::Vector3;
use std::fs;
use std::path::{Path, PathBuf};

fn frame_path(out_dir: &Path, config: &Config, mode: OutputMode, index: usize) -> PathBuf {
    out_dir.join(frame_name(
        &config.output.frame_prefix,
        index,
        config.output.frame_digits,
        mode.extension(),
    ))
}

/// Render every input file to its own frame, in order.
pub fn render_sequence(
    inputs: &[PathBuf],
    out_dir: &Path,
    config: &Config,
    mode: OutputMode,
) -> Result<Vec<PathBuf>, RenderError> {
    if inputs.is_empty() {
        return Err(RenderError::EmptySequence);
    }
    fs::create_dir_all(out_dir)?;

    let mut scene = Scene::new();
    let mut written = Vec::with_capacity(inputs.len());

    for (i, input) in inputs.iter().enumerate() {
        let solution = load_solution(input)?;

        scene.clear();
        scene.draw_solution(&solution, &config.style)?;

        let path = frame_path(out_dir, config, mode, i);
        export_scene(&scene, &config.view, config, mode, &path)?;
        written.push(path);
    }

    log::info!("Rendered {} frames into {}", written.len(), out_dir.display());
    Ok(written)
}

/// Frame 0 is the bare cell, frame k shows the first k particles.
pub fn render_build_up(
    input: &Path,
    out_dir: &Path,
    config: &Config,
    mode: OutputMode,
) -> Result<Vec<PathBuf>, RenderError> {
    let solution = load_solution(input)?;
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    build_up(&solution, &config.style, |scene| {
        let path = frame_path(out_dir, config, mode, written.len());
        export_scene(scene, &config.view, config, mode, &path)?;
        written.push(path);
        Ok(())
    })?;

    log::info!("Rendered {} build-up frames into {}", written.len(), out_dir.display());
    Ok(written)
}

/// Grow one scene particle by particle, handing every state to `emit`.
/// Hidden ghosts add no frame.
pub fn build_up<F>(solution: &Solution, style: &RenderStyle, mut emit: F) -> Result<usize, RenderError>
where
    F: FnMut(&Scene) -> Result<(), RenderError>,
{
    let wrapped;
    let solution = if style.wrap_particles {
        wrapped = solution.wrapped()?;
        &wrapped
    } else {
        solution
    };

    let mut scene = Scene::new();
    scene.draw_cell(&solution.cell, &Vector3::zeros(), style)?;
    emit(&scene)?;
    let mut frames = 1;

    for particle in &solution.particles {
        if !scene.draw_styled_particle(&solution.cell, particle, style)? {
            continue;
        }
        emit(&scene)?;
        frames += 1;
    }
    Ok(frames)
}
