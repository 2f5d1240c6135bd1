//! tetview: visualize periodic packings of tetrahedra.
//!
//! Reads solution files (a cell header plus one particle per line), builds a
//! world-space scene of translucent convex hulls and renders it with cairo,
//! either into a GTK window or into PNG/PDF/SVG frames.

pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod rendering;
pub mod state;
pub mod ui;
pub mod utils;
