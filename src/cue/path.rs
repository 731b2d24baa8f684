use crate::cue::error::{CueError, CueResult};
use log::debug;
use std::path::{Path, PathBuf};

const CANDIDATE_EXTENSIONS: [&str; 2] = ["wav", "flac"];

/// Maps a FILE path as declared in the cue sheet at `cue_path` to a file that
/// exists on disk.
///
/// Rippers write Windows separators and often reference the pre-encoding
/// `.wav` name, so besides the declared path this tries the path relative to
/// the cue sheet directory and the bare file name next to the cue sheet, each
/// with a `.wav` and then a `.flac` extension.
pub(crate) fn resolve_real_path(cue_path: &Path, declared: &str) -> CueResult<PathBuf> {
    let given = Path::new(declared);
    if given.exists() {
        return Ok(given.to_path_buf());
    }

    let normalized: PathBuf = declared.split('\\').filter(|p| !p.is_empty()).collect();

    let candidates = if normalized.is_absolute() {
        vec![normalized]
    } else {
        let cue_dir = cue_path.parent().unwrap_or(Path::new(""));
        let mut candidates = vec![cue_dir.join(&normalized)];
        if let Some(name) = normalized.file_name() {
            candidates.push(cue_dir.join(name));
        }
        candidates
    };

    for candidate in &candidates {
        for extension in CANDIDATE_EXTENSIONS {
            let path = candidate.with_extension(extension);
            if path.exists() {
                debug!("Resolved {declared:?} to {path:?}");
                return Ok(path);
            }
        }
    }

    debug!("Could not resolve {declared:?}, tried {candidates:?}");
    Err(CueError::FileNotResolved(declared.to_string()))
}
