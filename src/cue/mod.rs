use crate::cue::error::{CueError, CueResult};
use crate::cue::line::Line;
use crate::cue::models::{Diagnostic, FileRef, Track};
use encoding_rs::{UTF_8, WINDOWS_1252};
use log::{debug, trace, warn};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub mod error;
pub mod line;
pub mod models;
mod path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ParserMode {
    #[default]
    Header,
    InTrack,
}

/// Session state threaded through the per-line parse step.
#[derive(Debug, Default)]
struct ParserState {
    mode: ParserMode,
    current_file: Option<FileRef>,
    /// Position of the current track in [`Cue::tracks`].
    current_track: Option<usize>,
}

/// A parsed cue sheet.
///
/// Built empty with [`Cue::new`] and filled by a single call to
/// [`Cue::parse`] or [`Cue::parse_str`]. Grammar problems real-world sheets
/// commonly have are recorded as [`Diagnostic`]s instead of failing the parse.
#[derive(Debug, Clone, Serialize)]
pub struct Cue {
    path: PathBuf,
    remarks: BTreeMap<String, String>,
    files: Vec<FileRef>,
    tracks: Vec<Track>,
    diagnostics: Vec<Diagnostic>,
}

impl Cue {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            remarks: BTreeMap::new(),
            files: Vec::new(),
            tracks: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Reads and parses the cue sheet at [`Cue::path`].
    ///
    /// Text that is not valid UTF-8 is read as Windows-1252, the usual
    /// encoding of cue sheets written by Windows rippers.
    pub fn parse(&mut self) -> CueResult<()> {
        let data = std::fs::read(&self.path).map_err(|source| CueError::UnreadableSource {
            path: self.path.clone(),
            source,
        })?;

        debug!("Parsing cue sheet {:?} ({} bytes)", self.path, data.len());
        self.parse_str(&decode_text(&data))
    }

    /// Parses cue sheet text held in memory.
    ///
    /// Stops at the first contract violation (a duplicate index or an out of
    /// range track number), leaving everything parsed up to that line in place.
    pub fn parse_str(&mut self, text: &str) -> CueResult<()> {
        let mut state = ParserState::default();

        for (number, line) in text.lines().enumerate() {
            let line_number = number + 1;
            self.process_line(&mut state, line_number, line.trim_end())
                .inspect_err(|e| warn!("{:?} line {line_number}: {e}", self.path))?;
        }

        debug!(
            "Parsed {} files, {} tracks with {} diagnostics from {:?}",
            self.files.len(),
            self.tracks.len(),
            self.diagnostics.len(),
            self.path
        );

        Ok(())
    }

    fn process_line(
        &mut self,
        state: &mut ParserState,
        line_number: usize,
        line: &str,
    ) -> CueResult<()> {
        let classified = Line::classify(line);
        trace!("{line_number}: {classified:?}");

        match classified {
            Line::Remark { tag, value } => match state.mode {
                ParserMode::Header => {
                    self.remarks.insert(tag.to_string(), value.to_string());
                }
                ParserMode::InTrack => {
                    self.message(line_number, format!("REM {tag} outside of header"));
                }
            },
            Line::FileDecl { path, format } => {
                let file = FileRef::new(path, format);
                self.files.push(file.clone());
                state.current_file = Some(file);
            }
            Line::TrackDecl { number, mode } => {
                if state.current_file.is_none() {
                    self.message(line_number, "TRACK without preceding FILE");
                    return Ok(());
                }

                self.tracks.push(Track::with_mode(number, mode)?);
                state.current_track = Some(self.tracks.len() - 1);
                state.mode = ParserMode::InTrack;
            }
            Line::IndexDecl { number, timecode } => {
                // a current track implies a current file
                let (Some(position), Some(file)) = (state.current_track, &state.current_file)
                else {
                    self.message(line_number, "INDEX without preceding TRACK");
                    return Ok(());
                };

                self.tracks[position].index(number, timecode.to_frames(), file.clone())?;
            }
            Line::Unrecognized => {}
        }

        Ok(())
    }

    fn message(&mut self, line: usize, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            line,
            message: message.into(),
        };
        warn!("{:?} {diagnostic}", self.path);
        self.diagnostics.push(diagnostic);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn remarks(&self) -> &BTreeMap<String, String> {
        &self.remarks
    }

    pub fn remark(&self, tag: &str) -> Option<&str> {
        self.remarks.get(tag).map(String::as_str)
    }

    /// Every FILE declaration, in the order they appear.
    pub fn files(&self) -> &[FileRef] {
        &self.files
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Serializes the tracks back to cue sheet text.
    ///
    /// Only FILE, TRACK and INDEX lines are written, every file as `WAVE` and
    /// every track as `AUDIO`. A FILE line is emitted whenever an index point
    /// lives in a different file than the previous one.
    pub fn dump(&self) -> String {
        let mut lines = Vec::new();
        let mut current_file: Option<&FileRef> = None;

        for track in &self.tracks {
            if let Some((_, first)) = track.first_index()
                && current_file != Some(&first.file)
            {
                lines.push(file_line(&first.file));
                current_file = Some(&first.file);
            }

            lines.push(format!("  TRACK {:02} AUDIO", track.number()));

            for (number, index) in track.indexes() {
                if current_file != Some(&index.file) {
                    lines.push(file_line(&index.file));
                    current_file = Some(&index.file);
                }
                lines.push(format!("    INDEX {number:02} {}", index.timecode()));
            }
        }

        lines.push(String::new());
        lines.join("\n")
    }

    /// Length of `track` in frames, measured from its index 1 to the index 1 of
    /// the next track.
    ///
    /// Returns `None` when that cannot be determined: for the last track, when
    /// either track lacks an index 1, when both index points are in different
    /// files, or when `track` does not belong to this sheet.
    pub fn track_length(&self, track: &Track) -> Option<u64> {
        let position = self.tracks.iter().position(|t| std::ptr::eq(t, track))?;
        let next = self.tracks.get(position + 1)?;

        let this_index = track.get_index(1).ok()?;
        let next_index = next.get_index(1).ok()?;

        if this_index.file != next_index.file {
            return None;
        }

        next_index.offset.checked_sub(this_index.offset)
    }

    /// Translates a FILE path of this sheet to a path that exists on disk.
    pub fn get_real_path(&self, declared: &str) -> CueResult<PathBuf> {
        path::resolve_real_path(&self.path, declared)
    }
}

fn decode_text(data: &[u8]) -> Cow<'_, str> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);

    match UTF_8.decode_without_bom_handling_and_without_replacement(data) {
        Some(text) => text,
        None => {
            debug!("Cue sheet is not UTF-8, decoding as {}", WINDOWS_1252.name());
            WINDOWS_1252.decode_without_bom_handling(data).0
        }
    }
}

fn file_line(file: &FileRef) -> String {
    format!("FILE \"{}\" WAVE", file.path)
}
