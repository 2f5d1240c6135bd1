// src/io/solution.rs
// Plain-text solution files:
//
//   e0x e0y e0z
//   e1x e1y e1z
//   e2x e2y e2z
//   [particle:|ghost:] x1 y1 z1 x2 y2 z2 x3 y3 z3 x4 y4 z4
//   ...

use crate::error::ParseError;
use crate::model::{Cell, Particle, ParticleKind, Solution};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

pub fn parse(path: &Path) -> Result<Solution, ParseError> {
    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_reader(BufReader::new(file)).map_err(|e| match e {
        ParseError::Io { source, .. } => ParseError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

pub fn parse_str(text: &str) -> Result<Solution, ParseError> {
    from_reader(text.as_bytes())
}

pub fn from_reader<R: BufRead>(reader: R) -> Result<Solution, ParseError> {
    let mut lines = reader.lines().enumerate();

    // 1. Cell tensor, one lattice vector per line
    let mut rows = [[0.0; 3]; 3];
    for (i, row) in rows.iter_mut().enumerate() {
        let (idx, line) = lines
            .next()
            .ok_or(ParseError::MissingHeader { line: i + 1 })?;
        let line = line.map_err(io_error)?;
        let values = parse_numbers(&line, idx + 1)?;
        if values.len() != 3 {
            return Err(ParseError::HeaderCount {
                line: idx + 1,
                found: values.len(),
            });
        }
        row.copy_from_slice(&values);
    }
    let cell = Cell::from_rows(rows);

    // 2. Particles, each line tagged on its own
    let mut particles = Vec::new();
    for (idx, line) in lines {
        let line = line.map_err(io_error)?;
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        particles.push(parse_particle(&line, line_no)?);
    }

    log::debug!(
        "Parsed cell (V = {:.4}) with {} particles",
        cell.volume(),
        particles.len()
    );

    Ok(Solution::new(cell, particles))
}

fn parse_particle(line: &str, line_no: usize) -> Result<Particle, ParseError> {
    let mut body = line.trim_start();
    let mut kind = ParticleKind::Primary;

    if let Some(first) = body.split_whitespace().next() {
        if first.parse::<f64>().is_err() {
            kind = match first {
                "ghost:" => ParticleKind::Ghost,
                "particle:" => ParticleKind::Primary,
                _ => {
                    return Err(ParseError::UnknownTag {
                        line: line_no,
                        tag: first.to_string(),
                    })
                }
            };
            body = &body[first.len()..];
        }
    }

    let coords = parse_numbers(body, line_no)?;
    Particle::from_coordinates(&coords, kind).ok_or(ParseError::TokenCount {
        line: line_no,
        found: coords.len(),
    })
}

fn parse_numbers(text: &str, line_no: usize) -> Result<Vec<f64>, ParseError> {
    text.split_whitespace()
        .map(|tok| {
            tok.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                line: line_no,
                token: tok.to_string(),
            })
        })
        .collect()
}

fn io_error(source: io::Error) -> ParseError {
    ParseError::Io {
        path: Default::default(),
        source,
    }
}

pub fn write(path: &Path, solution: &Solution) -> io::Result<()> {
    let mut file = File::create(path)?;
    write!(file, "{}", solution)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    const UNIT: &str = "1 0 0\n0 1 0\n0 0 1\n";

    #[test]
    fn test_unit_cell_single_particle() {
        let text = format!("{}0 0 0 0 0 0 0 0 0 0 0 0\n", UNIT);
        let s = parse_str(&text).unwrap();

        assert!((s.cell.volume() - 1.0).abs() < 1e-12);
        assert_eq!(s.particles.len(), 1);
        assert_eq!(s.particles[0].points().len(), 4);
        assert!(s.particles[0].points().iter().all(|p| *p == Vector3::zeros()));
        assert!(!s.particles[0].is_ghost());
    }

    #[test]
    fn test_tags_are_per_line() {
        let text = format!(
            "{}particle: 0 0 0 1 0 0 0 1 0 0 0 1\n\
             ghost: 1 0 0 2 0 0 1 1 0 1 0 1\n\
             0.5 0.5 0.5 1 0.5 0.5 0.5 1 0.5 0.5 0.5 1\n\
             ghost: 0 0 -1 1 0 -1 0 1 -1 0 0 0\n",
            UNIT
        );
        let s = parse_str(&text).unwrap();

        let kinds: Vec<bool> = s.particles.iter().map(|p| p.is_ghost()).collect();
        assert_eq!(kinds, vec![false, true, false, true]);
        assert_eq!(s.particles[1].points()[1], Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_sphere_and_blank_lines() {
        let text = format!("{}\n1.5 2.5 3.5\n\n   \n", UNIT);
        let s = parse_str(&text).unwrap();
        assert_eq!(s.particles.len(), 1);
        assert!(s.particles[0].is_sphere());
    }

    #[test]
    fn test_header_errors() {
        assert!(matches!(
            parse_str("1 0 0\n0 1 0\n"),
            Err(ParseError::MissingHeader { line: 3 })
        ));
        assert!(matches!(
            parse_str("1 0 0\n0 1\n0 0 1\n"),
            Err(ParseError::HeaderCount { line: 2, found: 2 })
        ));
        assert!(matches!(
            parse_str("ghost: 1 0 0\n0 1 0\n0 0 1\n"),
            Err(ParseError::InvalidNumber { line: 1, .. })
        ));
        assert!(matches!(parse_str(""), Err(ParseError::MissingHeader { line: 1 })));
    }

    #[test]
    fn test_particle_errors() {
        let short = format!("{}0 0 0 0 0 0 0 0 0 0 0\n", UNIT);
        assert!(matches!(
            parse_str(&short),
            Err(ParseError::TokenCount { line: 4, found: 11 })
        ));

        let bad = format!("{}0 0 0 0 0 0 0 x 0 0 0 0\n", UNIT);
        match parse_str(&bad) {
            Err(ParseError::InvalidNumber { line, token }) => {
                assert_eq!(line, 4);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected {:?}", other),
        }

        let tag = format!("{}0 0 0 0 0 0 0 0 0 0 0 0\nimage: 0 0 0\n", UNIT);
        assert!(matches!(
            parse_str(&tag),
            Err(ParseError::UnknownTag { line: 5, .. })
        ));

        let tag_only = format!("{}ghost:\n", UNIT);
        assert!(matches!(
            parse_str(&tag_only),
            Err(ParseError::TokenCount { line: 4, found: 0 })
        ));
    }

    #[test]
    fn test_written_file_parses_back() {
        let text = "2 0 0\n0.5 2 0\n0 0.25 3\n\
             particle: 0.1 0.2 0.3 1.1 0.2 0.3 0.6 1.0 0.3 0.6 0.5 1.1\n\
             ghost: 2.1 0.2 0.3 3.1 0.2 0.3 2.6 1.0 0.3 2.6 0.5 1.1\n\
             particle: 1 1 1\n";
        let original = parse_str(text).unwrap();

        let path = std::env::temp_dir().join(format!("tetview_roundtrip_{}.txt", std::process::id()));
        write(&path, &original).unwrap();
        let reread = parse(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(reread, original);
    }

    #[test]
    fn test_missing_file() {
        let err = parse(Path::new("/nonexistent/tetview/solution.txt")).unwrap_err();
        match err {
            ParseError::Io { path, .. } => assert!(path.ends_with("solution.txt")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
