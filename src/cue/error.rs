use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CueError {
    #[error("Could not read cue sheet {path}: {source}")]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid timecode: {0}")]
    InvalidTimecode(String),

    #[error("Track number must be from 1 to 99, got {0}")]
    TrackRangeError(u8),

    #[error("Index number must be from 0 to 99, got {0}")]
    IndexRangeError(u8),

    #[error("Index {index} already in track {track}")]
    DuplicateIndex { track: u8, index: u8 },

    #[error("Index {index} not found in track {track}")]
    IndexNotFound { track: u8, index: u8 },

    #[error("Cannot find file for {0}")]
    FileNotResolved(String),
}

pub type CueResult<T> = Result<T, CueError>;
