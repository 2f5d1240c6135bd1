// src/config.rs

use crate::error::ConfigError;
use crate::rendering::colormap::{ColorMap, Rgb};
use crate::rendering::scene::View;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
  Interactive,
  Png,
  Pdf,
  Svg,
}

impl OutputMode {
  pub fn extension(&self) -> &'static str {
    match self {
      OutputMode::Interactive | OutputMode::Png => "png",
      OutputMode::Pdf => "pdf",
      OutputMode::Svg => "svg",
    }
  }

  /// Format for writing `path`: its extension decides, a path without one gets
  /// `fallback`, and an extension we cannot write gives `None`.
  pub fn for_output(path: &Path, fallback: OutputMode) -> Option<Self> {
    match path.extension() {
      None => Some(fallback),
      Some(_) => Self::from_path(path),
    }
  }

  /// Guess the file format from an output path, if it has a known extension.
  pub fn from_path(path: &Path) -> Option<Self> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
      "png" => Some(OutputMode::Png),
      "pdf" => Some(OutputMode::Pdf),
      "svg" => Some(OutputMode::Svg),
      _ => None,
    }
  }
}

// --- RenderStyle ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
  // Cell
  pub cell_opacity: f64,
  pub cell_colormap: ColorMap,
  pub cell_edge_color: Rgb,
  pub cell_line_width: f64,
  pub corner_radius: f64,

  // Particles
  pub particle_opacity: f64,
  pub particle_colormap: ColorMap,
  pub ghost_opacity: f64,
  pub ghost_colormap: ColorMap,
  pub marker_radius: f64,

  // Switches
  pub show_ghosts: bool,
  pub periodic_images: bool,
  pub wrap_particles: bool,

  pub background_color: Rgb,
}

impl Default for RenderStyle {
  fn default() -> Self {
    Self {
      cell_opacity: 0.25,
      cell_colormap: ColorMap::Gray,
      cell_edge_color: (0.2, 0.2, 0.2),
      cell_line_width: 2.0,
      corner_radius: 0.025,
      particle_opacity: 0.75,
      particle_colormap: ColorMap::Gray,
      ghost_opacity: 0.25,
      ghost_colormap: ColorMap::Blues,
      marker_radius: 0.5,
      show_ghosts: true,
      periodic_images: false,
      wrap_particles: false,
      background_color: (0.9, 0.9, 0.9),
    }
  }
}

// --- Output ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
  pub mode: OutputMode,
  pub width: u32,
  pub height: u32,
  /// Fraction of the image the model spans
  pub fill: f64,
  pub frame_prefix: String,
  pub frame_digits: usize,
}

impl Default for OutputConfig {
  fn default() -> Self {
    Self {
      mode: OutputMode::Interactive,
      width: 800,
      height: 800,
      fill: 0.8,
      frame_prefix: "frame_".to_string(),
      frame_digits: 4,
    }
  }
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Config {
  #[serde(default)]
  pub style: RenderStyle,

  #[serde(default)]
  pub view: View,

  #[serde(default)]
  pub output: OutputConfig,
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/tetview/settings.json)
  pub fn load() -> (Self, String) {
    let path = Self::get_path();
    if path.exists() {
      match Self::load_from(&path) {
        Ok(cfg) => (cfg, format!("Config loaded from {:?}", path)),
        Err(e) => (Self::default(), e.to_string()),
      }
    } else {
      (
        Self::default(),
        "No config found. Using defaults.".to_string(),
      )
    }
  }

  /// Loads an explicit config file; unlike `load`, failures are errors.
  pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Json {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Saves config to standard OS location, returning where it went.
  pub fn save(&self) -> Result<PathBuf, ConfigError> {
    let path = Self::get_path();
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
        path: parent.to_path_buf(),
        source,
      })?;
    }
    self.save_to(&path)?;
    Ok(path)
  }

  pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
    let file = File::create(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), self).map_err(|source| ConfigError::Json {
      path: path.to_path_buf(),
      source,
    })
  }

  fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "mavensgroup", "tetview") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}
