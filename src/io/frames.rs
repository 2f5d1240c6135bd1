// src/io/frames.rs
// Locating the solution files an optimizer run leaves behind
// (out_0000, out_0001, ... and best_*), and naming the rendered frames.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Regular files in `dir` whose name starts with `prefix`, sorted by name.
///
/// The producer zero-pads its counters, so name order is step order.
pub fn list_sequence(dir: &Path, prefix: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if name.to_string_lossy().starts_with(prefix) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// The last file of a sequence, e.g. the most recent `best*` snapshot.
pub fn latest(dir: &Path, prefix: &str) -> io::Result<Option<PathBuf>> {
    Ok(list_sequence(dir, prefix)?.pop())
}

/// Expand command line inputs: files pass through, directories contribute
/// all their files in name order.
pub fn expand_inputs(inputs: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for input in inputs {
        if input.is_dir() {
            out.extend(list_sequence(input, "")?);
        } else {
            out.push(input.clone());
        }
    }
    Ok(out)
}

/// `{prefix}{index zero-padded to digits}.{ext}`
pub fn frame_name(prefix: &str, index: usize, digits: usize, ext: &str) -> String {
    format!("{}{:0width$}.{}", prefix, index, ext, width = digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tetview_{}_{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_frame_name() {
        assert_eq!(frame_name("frame_", 7, 4, "png"), "frame_0007.png");
        assert_eq!(frame_name("out_", 12, 2, "svg"), "out_12.svg");
        assert_eq!(frame_name("f", 12345, 4, "pdf"), "f12345.pdf");
    }

    #[test]
    fn test_list_and_latest() {
        let dir = scratch_dir("frames");
        for name in ["out_0002", "out_0000", "out_0001", "best_0003", "best_0010", "notes.txt"] {
            fs::write(dir.join(name), "").unwrap();
        }
        fs::create_dir_all(dir.join("out_subdir")).unwrap();

        let seq = list_sequence(&dir, "out_").unwrap();
        let names: Vec<String> = seq
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["out_0000", "out_0001", "out_0002"]);

        let best = latest(&dir, "best").unwrap().unwrap();
        assert!(best.ends_with("best_0010"));
        assert!(latest(&dir, "missing").unwrap().is_none());

        let all = expand_inputs(&[dir.clone(), PathBuf::from("extra.txt")]).unwrap();
        assert_eq!(all.len(), 7);
        assert_eq!(all.last().unwrap(), &PathBuf::from("extra.txt"));

        fs::remove_dir_all(&dir).ok();
    }
}
