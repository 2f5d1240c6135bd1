// src/error.rs

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a solution file.
#[derive(Debug, Error)]
pub enum ParseError {
  #[error("could not read {path:?}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("line {line}: missing lattice vector")]
  MissingHeader { line: usize },

  #[error("line {line}: lattice vector needs 3 numbers, found {found}")]
  HeaderCount { line: usize, found: usize },

  #[error("line {line}: invalid number {token:?}")]
  InvalidNumber { line: usize, token: String },

  #[error("line {line}: particle needs 12 (tetrahedron) or 3 (sphere) numbers, found {found}")]
  TokenCount { line: usize, found: usize },

  #[error("line {line}: unknown tag {tag:?}")]
  UnknownTag { line: usize, tag: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
  #[error("cell basis is singular (volume {volume:e})")]
  SingularCell { volume: f64 },

  #[error("convex hull of {points} points is degenerate")]
  DegenerateHull { points: usize },
}

#[derive(Debug, Error)]
pub enum RenderError {
  #[error("cairo: {0}")]
  Cairo(#[from] cairo::Error),

  #[error("writing png: {0}")]
  Png(#[from] cairo::IoError),

  #[error(transparent)]
  Io(#[from] io::Error),

  #[error(transparent)]
  Geometry(#[from] GeometryError),

  #[error(transparent)]
  Parse(#[from] ParseError),

  #[error("no input files to render")]
  EmptySequence,
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("could not open config {path:?}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("error parsing config {path:?}: {source}")]
  Json {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}
