// src/io/mod.rs
pub mod frames;
pub mod solution;

use crate::error::ParseError;
use crate::model::Solution;
use std::io;
use std::path::Path;

pub fn load_solution(path: &Path) -> Result<Solution, ParseError> {
    log::info!("Loading {}", path.display());
    solution::parse(path)
}

pub fn save_solution(path: &Path, solution: &Solution) -> io::Result<()> {
    solution::write(path, solution)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
