use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use tablift::Artifact;

/// Print artifacts to stdout. Multiple artifacts are separated by a
/// `--- name ---` header.
pub fn print_artifacts(artifacts: &[Artifact]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for artifact in artifacts {
        if artifacts.len() > 1 {
            writeln!(out, "--- {} ---", artifact.name)?;
        }
        out.write_all(&artifact.bytes)?;
        if !artifact.bytes.ends_with(b"\n") {
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Write artifacts into `dir`, creating it if needed.
///
/// All-or-nothing: if any write fails, files already written by this call
/// are removed before the error is returned.
pub fn write_artifacts(artifacts: &[Artifact], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dir.join(&artifact.name);
        if let Err(e) = write_file(&path, &artifact.bytes) {
            cleanup(&written);
            return Err(e);
        }
        written.push(path);
    }

    for path in &written {
        eprintln!("💾 Saved {}", path.display());
    }
    Ok(written)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn cleanup(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!("failed to remove {}: {e}", path.display());
        }
    }
}

/// Directories for each input's artifacts, in input order.
///
/// A single input writes into `dir` itself. Several inputs each get
/// `dir/<file stem>`; repeated stems get a `-2`, `-3`, ... suffix so no two
/// inputs share a directory.
pub fn artifact_dirs(dir: &Path, inputs: &[String]) -> Vec<PathBuf> {
    if inputs.len() <= 1 {
        return vec![dir.to_path_buf()];
    }

    let mut taken = HashSet::new();
    inputs
        .iter()
        .map(|input| {
            let stem = if input == "-" {
                "stdin"
            } else {
                Path::new(input)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .filter(|s| !s.is_empty())
                    .unwrap_or("input")
            };
            let mut name = stem.to_string();
            let mut n = 1;
            while !taken.insert(name.clone()) {
                n += 1;
                name = format!("{stem}-{n}");
            }
            dir.join(name)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn single_input_writes_into_output_dir() {
        assert_eq!(
            artifact_dirs(Path::new("out"), &inputs(&["docs/report.pdf"])),
            vec![PathBuf::from("out")]
        );
    }

    #[test]
    fn multiple_inputs_use_file_stems() {
        assert_eq!(
            artifact_dirs(Path::new("out"), &inputs(&["docs/report.pdf", "-"])),
            vec![PathBuf::from("out/report"), PathBuf::from("out/stdin")]
        );
    }

    #[test]
    fn repeated_stems_get_distinct_dirs() {
        assert_eq!(
            artifact_dirs(
                Path::new("out"),
                &inputs(&["a/report.json", "b/report.json", "report-2.json", "c/report.pdf"])
            ),
            vec![
                PathBuf::from("out/report"),
                PathBuf::from("out/report-2"),
                PathBuf::from("out/report-2-2"),
                PathBuf::from("out/report-3"),
            ]
        );
    }

    #[test]
    fn write_artifacts_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");
        let written = write_artifacts(
            &[Artifact::new("a.csv", "x,y\n"), Artifact::new("b.csv", "1,2\n")],
            &target,
        )
        .unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(fs::read_to_string(target.join("b.csv")).unwrap(), "1,2\n");
    }

    #[test]
    fn failed_write_removes_earlier_files() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the second file should go makes File::create fail.
        fs::create_dir(dir.path().join("b.csv")).unwrap();
        let result = write_artifacts(
            &[Artifact::new("a.csv", "x\n"), Artifact::new("b.csv", "y\n")],
            dir.path(),
        );
        assert!(result.is_err());
        assert!(!dir.path().join("a.csv").exists());
    }
}
