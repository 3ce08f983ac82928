use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Result, VerifyError};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Locate the newest verification CSV under `dirs` (walked recursively).
/// Every pattern and every directory is considered; the latest modification
/// time wins and ties keep the first file found.
pub fn find_input(dirs: &[PathBuf], patterns: &[String]) -> Result<PathBuf> {
    let compiled: Vec<Pattern> = patterns
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("Ignoring invalid pattern {}: {}", p, e);
                None
            }
        })
        .collect();

    let mut best: Option<(SystemTime, PathBuf)> = None;
    let mut searched = Vec::new();

    for dir in dedup_dirs(dirs) {
        if !dir.is_dir() {
            debug!("Skipping missing directory {}", dir.display());
            continue;
        }
        debug!("Searching {}", dir.display());
        searched.push(dir.clone());

        for (modified, path) in matching_files(&dir, &compiled) {
            let newer = best.as_ref().map_or(true, |(t, _)| modified > *t);
            if newer {
                best = Some((modified, path));
            }
        }
    }

    match best {
        Some((_, path)) => {
            info!("Using {}", path.display());
            Ok(path)
        }
        None => Err(VerifyError::DiscoveryFailed { searched }),
    }
}

fn matching_files(dir: &Path, patterns: &[Pattern]) -> Vec<(SystemTime, PathBuf)> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_string_lossy();
            patterns.iter().any(|p| p.matches_with(&name, MATCH_OPTIONS))
        })
        .filter_map(|e| {
            let modified = e.metadata().ok()?.modified().ok()?;
            Some((modified, e.into_path()))
        })
        .collect()
}

/// Drop directories that resolve to one already listed, keeping priority order.
fn dedup_dirs(dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen: Vec<PathBuf> = Vec::new();
    let mut out = Vec::new();
    for dir in dirs {
        let key = dir.canonicalize().unwrap_or_else(|_| dir.clone());
        if !seen.contains(&key) {
            seen.push(key);
            out.push(dir.clone());
        }
    }
    out
}
