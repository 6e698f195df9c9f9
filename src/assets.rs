//! Locating files relative to an ordered list of candidate roots.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

/// Default probe order for a process started from `cwd`:
/// the directory itself, two levels up, then one level up.
pub fn candidate_roots(cwd: &Path) -> Vec<PathBuf> {
    let mut roots = vec![cwd.to_path_buf()];
    if let Some(grandparent) = cwd.parent().and_then(Path::parent) {
        roots.push(grandparent.to_path_buf());
    }
    if let Some(parent) = cwd.parent() {
        roots.push(parent.to_path_buf());
    }
    roots
}

/// Content of the first regular file named `relative` under any root.
///
/// `None` means no root holds such a file. An existing empty file yields
/// `Some` with an empty buffer.
pub fn resolve_file(roots: &[PathBuf], relative: &str) -> Option<Vec<u8>> {
    let relative = relative.trim_start_matches('/');
    roots.iter().find_map(|root| {
        let candidate = root.join(relative);
        if !candidate.is_file() {
            return None;
        }
        trace!("resolved {} to {}", relative, candidate.display());
        fs::read(&candidate).ok()
    })
}

/// First existing directory among `candidates`.
pub fn resolve_dir(candidates: &[PathBuf]) -> Option<&Path> {
    candidates
        .iter()
        .map(PathBuf::as_path)
        .find(|path| path.is_dir())
}

/// Regular files with a `.txt` extension directly inside `dir`, sorted by path.
pub fn text_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();
    files
}
