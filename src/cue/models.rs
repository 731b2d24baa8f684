// src/cue/models
use crate::cd::Msf;
use crate::cue::error::{CueError, CueResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::sync::Arc;

/// One FILE declaration of a cue sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CueFile {
    pub path: String,
    pub format: String,
}

/// Shared handle to a [`CueFile`].
///
/// Equality is identity: two handles are equal only when they come from the
/// same FILE line, even if another FILE line declares the same path.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct FileRef(Arc<CueFile>);

impl FileRef {
    pub fn new(path: impl Into<String>, format: impl Into<String>) -> Self {
        Self(Arc::new(CueFile {
            path: path.into(),
            format: format.into(),
        }))
    }
}

impl PartialEq for FileRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for FileRef {}

impl Deref for FileRef {
    type Target = CueFile;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Index {
    /// Offset in frames from the start of `file`.
    pub offset: u64,
    pub file: FileRef,
}

impl Index {
    pub fn timecode(&self) -> Msf {
        Msf::from_frames(self.offset)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Track {
    number: u8,
    mode: Option<String>,
    title: Option<String>,
    performer: Option<String>,
    indexes: BTreeMap<u8, Index>,
}

impl Track {
    pub const MIN_NUMBER: u8 = 1;
    pub const MAX_NUMBER: u8 = 99;
    pub const MAX_INDEX: u8 = 99;

    pub fn new(number: u8) -> CueResult<Self> {
        if !(Self::MIN_NUMBER..=Self::MAX_NUMBER).contains(&number) {
            return Err(CueError::TrackRangeError(number));
        }

        Ok(Self {
            number,
            mode: None,
            title: None,
            performer: None,
            indexes: BTreeMap::new(),
        })
    }

    pub fn with_mode(number: u8, mode: impl Into<String>) -> CueResult<Self> {
        let mut track = Self::new(number)?;
        track.mode = Some(mode.into());
        Ok(track)
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    /// Mode text from the TRACK line (`AUDIO`, `MODE1/2352`, ...), kept as is.
    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn performer(&self) -> Option<&str> {
        self.performer.as_deref()
    }

    pub fn set_performer(&mut self, performer: impl Into<String>) {
        self.performer = Some(performer.into());
    }

    /// Adds index point `number` at `offset` frames into `file`.
    pub fn index(&mut self, number: u8, offset: u64, file: FileRef) -> CueResult<()> {
        if self.indexes.contains_key(&number) {
            return Err(CueError::DuplicateIndex {
                track: self.number,
                index: number,
            });
        }
        if number > Self::MAX_INDEX {
            return Err(CueError::IndexRangeError(number));
        }

        self.indexes.insert(number, Index { offset, file });
        Ok(())
    }

    pub fn get_index(&self, number: u8) -> CueResult<&Index> {
        self.indexes.get(&number).ok_or(CueError::IndexNotFound {
            track: self.number,
            index: number,
        })
    }

    /// Index points in ascending index number order.
    pub fn indexes(&self) -> impl Iterator<Item = (u8, &Index)> {
        self.indexes.iter().map(|(number, index)| (*number, index))
    }

    pub fn first_index(&self) -> Option<(u8, &Index)> {
        self.indexes().next()
    }

    pub fn index_count(&self) -> usize {
        self.indexes.len()
    }
}

impl Display for Track {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Track {:02} with {} indexes",
            self.number,
            self.indexes.len()
        )
    }
}

/// A recoverable problem found while parsing, tied to a 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_number_must_be_in_range() {
        assert!(matches!(Track::new(0), Err(CueError::TrackRangeError(0))));
        assert!(matches!(
            Track::new(100),
            Err(CueError::TrackRangeError(100))
        ));
        assert_eq!(Track::new(1).unwrap().number(), 1);
        assert_eq!(Track::new(99).unwrap().number(), 99);
    }

    #[test]
    fn index_number_must_be_in_range() {
        let file = FileRef::new("f", "WAVE");
        let mut track = Track::new(1).unwrap();

        assert!(matches!(
            track.index(100, 0, file.clone()),
            Err(CueError::IndexRangeError(100))
        ));
        assert!(track.index(0, 0, file.clone()).is_ok());
        assert!(track.index(99, 10, file).is_ok());
    }

    #[test]
    fn duplicate_index_is_rejected() {
        let file = FileRef::new("f", "WAVE");
        let mut track = Track::new(3).unwrap();
        track.index(1, 0, file.clone()).unwrap();

        assert!(matches!(
            track.index(1, 150, file),
            Err(CueError::DuplicateIndex { track: 3, index: 1 })
        ));
        assert_eq!(track.get_index(1).unwrap().offset, 0);
    }

    #[test]
    fn get_index_reports_missing_index() {
        let track = Track::new(2).unwrap();
        assert!(matches!(
            track.get_index(1),
            Err(CueError::IndexNotFound { track: 2, index: 1 })
        ));
    }

    #[test]
    fn indexes_iterate_in_ascending_order_regardless_of_insertion() {
        let file = FileRef::new("f", "WAVE");
        let mut track = Track::new(1).unwrap();
        track.index(2, 300, file.clone()).unwrap();
        track.index(1, 150, file.clone()).unwrap();
        track.index(0, 0, file).unwrap();

        let numbers: Vec<u8> = track.indexes().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
        assert_eq!(track.first_index().map(|(n, _)| n), Some(0));
    }

    #[test]
    fn file_refs_compare_by_identity() {
        let a = FileRef::new("disc.wav", "WAVE");
        let b = FileRef::new("disc.wav", "WAVE");

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(*a, *b);
    }

    #[test]
    fn title_and_performer_start_empty() {
        let mut track = Track::with_mode(5, "MODE1/2352").unwrap();
        assert_eq!(track.mode(), Some("MODE1/2352"));
        assert_eq!(track.title(), None);
        assert_eq!(track.performer(), None);

        track.set_title("Intro");
        track.set_performer("Someone");
        assert_eq!(track.title(), Some("Intro"));
        assert_eq!(track.performer(), Some("Someone"));
    }

    #[test]
    fn track_display_shows_number_and_index_count() {
        let mut track = Track::new(7).unwrap();
        track.index(1, 0, FileRef::new("f", "WAVE")).unwrap();
        assert_eq!(track.to_string(), "Track 07 with 1 indexes");
    }
}
