// src/cd/mod.rs
use crate::cue::error::{CueError, CueResult};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const FRAMES_PER_SECOND: u64 = 75;
pub const SECONDS_PER_MINUTE: u64 = 60;
pub const FRAMES_PER_MINUTE: u64 = FRAMES_PER_SECOND * SECONDS_PER_MINUTE;

/// A minutes:seconds:frames position, as written in cue sheets.
///
/// [`Msf::from_frames`] keeps seconds below 60 and frames below 75, minutes
/// are unbounded and grow past 99 for very long offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Msf {
    pub minutes: u64,
    pub seconds: u64,
    pub frames: u64,
}

impl Msf {
    pub fn from_frames(offset: u64) -> Self {
        Self {
            minutes: offset / FRAMES_PER_MINUTE,
            seconds: (offset / FRAMES_PER_SECOND) % SECONDS_PER_MINUTE,
            frames: offset % FRAMES_PER_SECOND,
        }
    }

    pub fn to_frames(&self) -> u64 {
        self.frames + self.seconds * FRAMES_PER_SECOND + self.minutes * FRAMES_PER_MINUTE
    }
}

impl Display for Msf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.minutes, self.seconds, self.frames
        )
    }
}

impl FromStr for Msf {
    type Err = CueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3
            || parts
                .iter()
                .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(CueError::InvalidTimecode(s.to_string()));
        }

        let field = |p: &str| {
            p.parse::<u64>()
                .map_err(|_| CueError::InvalidTimecode(s.to_string()))
        };

        Ok(Self {
            minutes: field(parts[0])?,
            seconds: field(parts[1])?,
            frames: field(parts[2])?,
        })
    }
}

/// Formats a frame offset as `MM:SS:FF`.
pub fn frames_to_timecode(frames: u64) -> String {
    Msf::from_frames(frames).to_string()
}

/// Parses `MM:SS:FF` without range checks on the individual fields.
pub fn parse_timecode(timecode: &str) -> CueResult<Msf> {
    timecode.parse()
}

/// Converts timecode components to a frame offset.
///
/// Components are not range checked, `00:75:00` is as valid as `01:15:00`.
/// Negative components and offsets that overflow fail with
/// [`CueError::InvalidTimecode`].
pub fn timecode_to_frames(minutes: i64, seconds: i64, frames: i64) -> CueResult<u64> {
    let invalid = || CueError::InvalidTimecode(format!("{minutes}:{seconds}:{frames}"));

    let minutes = u64::try_from(minutes).map_err(|_| invalid())?;
    let seconds = u64::try_from(seconds).map_err(|_| invalid())?;
    let frames = u64::try_from(frames).map_err(|_| invalid())?;

    minutes
        .checked_mul(FRAMES_PER_MINUTE)
        .and_then(|m| seconds.checked_mul(FRAMES_PER_SECOND)?.checked_add(m))
        .and_then(|ms| ms.checked_add(frames))
        .ok_or_else(invalid)
}
