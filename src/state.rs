// src/state.rs

use crate::config::{Config, OutputMode};
use crate::error::RenderError;
use crate::io::frames::frame_name;
use crate::model::Solution;
use crate::rendering::{export_scene, Scene, View};
use std::path::{Path, PathBuf};

/// Everything the interactive viewer needs between redraws.
pub struct AppState {
  pub config: Config,
  pub frames: Vec<PathBuf>,
  pub current: usize,
  pub solution: Option<Solution>,
  pub scene: Scene,
  pub view: View,
}

impl AppState {
  pub fn new(config: Config, frames: Vec<PathBuf>) -> Self {
    let view = config.view;
    Self {
      config,
      frames,
      current: 0,
      solution: None,
      scene: Scene::new(),
      view,
    }
  }

  pub fn current_path(&self) -> Option<&Path> {
    self.frames.get(self.current).map(|p| p.as_path())
  }

  /// Parse the current frame's file and redraw the scene from it.
  /// On failure the canvas is left empty.
  pub fn load_current(&mut self) -> Result<(), RenderError> {
    self.solution = None;
    self.scene.clear();

    let path = match self.current_path() {
      Some(p) => p.to_path_buf(),
      None => return Err(RenderError::EmptySequence),
    };
    let solution = crate::io::load_solution(&path)?;
    log::info!("{}\n{}", path.display(), solution.report());

    self.solution = Some(solution);
    self.rebuild_scene()
  }

  /// Redraw from the loaded solution, e.g. after a style switch changed.
  pub fn rebuild_scene(&mut self) -> Result<(), RenderError> {
    self.scene.clear();
    if let Some(solution) = &self.solution {
      if let Err(e) = self.scene.draw_solution(solution, &self.config.style) {
        self.scene.clear();
        return Err(e.into());
      }
    }
    Ok(())
  }

  /// Move `delta` frames, clamped to the sequence. Returns false when the
  /// frame did not change.
  pub fn step(&mut self, delta: isize) -> bool {
    if self.frames.is_empty() {
      return false;
    }
    let last = self.frames.len() as isize - 1;
    let next = (self.current as isize + delta).clamp(0, last) as usize;
    if next == self.current {
      return false;
    }
    self.current = next;
    true
  }

  pub fn toggle_ghosts(&mut self) -> String {
    self.config.style.show_ghosts = !self.config.style.show_ghosts;
    format!("Ghosts: {}", on_off(self.config.style.show_ghosts))
  }

  pub fn toggle_periodic_images(&mut self) -> String {
    self.config.style.periodic_images = !self.config.style.periodic_images;
    format!("Periodic images: {}", on_off(self.config.style.periodic_images))
  }

  pub fn toggle_wrap(&mut self) -> String {
    self.config.style.wrap_particles = !self.config.style.wrap_particles;
    format!("Wrap into cell: {}", on_off(self.config.style.wrap_particles))
  }

  pub fn reset_view(&mut self) {
    self.view = self.config.view;
  }

  pub fn title(&self) -> String {
    match self.current_path() {
      Some(p) => format!(
        "tetview - {} ({}/{})",
        p.file_name().unwrap_or_default().to_string_lossy(),
        self.current + 1,
        self.frames.len()
      ),
      None => "tetview".to_string(),
    }
  }

  /// Save what is on screen as `{prefix}{current}.png` in `dir`.
  pub fn save_frame(&self, dir: &Path) -> Result<PathBuf, RenderError> {
    let out = &self.config.output;
    let path = dir.join(frame_name(&out.frame_prefix, self.current, out.frame_digits, "png"));
    export_scene(&self.scene, &self.view, &self.config, OutputMode::Png, &path)?;
    Ok(path)
  }
}

fn on_off(b: bool) -> &'static str {
  if b { "on" } else { "off" }
}
