use crate::cd::Msf;

/// A single cue sheet line, classified against the grammar the parser acts on.
///
/// Each keyword maps to at most one rule, checked in the order REM, FILE,
/// TRACK, INDEX. REM only counts at the start of a line, indented REM lines
/// inside tracks are left alone. Anything that does not fully match a rule,
/// including PERFORMER, TITLE, CATALOG and friends, is [`Line::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Remark { tag: &'a str, value: &'a str },
    FileDecl { path: &'a str, format: &'a str },
    TrackDecl { number: u8, mode: &'a str },
    IndexDecl { number: u8, timecode: Msf },
    Unrecognized,
}

impl<'a> Line<'a> {
    pub fn classify(line: &'a str) -> Self {
        let indented = line.starts_with(char::is_whitespace);
        let Some((keyword, rest)) = split_keyword(line.trim()) else {
            return Line::Unrecognized;
        };

        let parsed = match keyword {
            "REM" if !indented => parse_remark(rest),
            "FILE" => parse_file(rest),
            "TRACK" => parse_track(rest),
            "INDEX" => parse_index(rest),
            _ => None,
        };

        parsed.unwrap_or(Line::Unrecognized)
    }
}

fn split_keyword(line: &str) -> Option<(&str, &str)> {
    let (keyword, rest) = line.split_once(char::is_whitespace)?;
    Some((keyword, rest.trim_start()))
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn two_digits(s: &str) -> Option<u8> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

// REM <TAG> <value>
fn parse_remark(rest: &str) -> Option<Line<'_>> {
    let (tag, value) = rest.split_once(char::is_whitespace)?;
    if !is_word(tag) {
        return None;
    }

    Some(Line::Remark {
        tag,
        value: value.trim_start(),
    })
}

// FILE "<name>" <FORMAT>, or FILE <name> <FORMAT> for unquoted names
fn parse_file(rest: &str) -> Option<Line<'_>> {
    let (path, format) = if let Some(quoted) = rest.strip_prefix('"') {
        let end = quoted.rfind('"')?;
        let format = &quoted[end + 1..];
        if !format.starts_with(char::is_whitespace) {
            return None;
        }
        (&quoted[..end], format.trim())
    } else {
        let (path, format) = rest.rsplit_once(char::is_whitespace)?;
        (path.trim_end(), format)
    };

    if path.is_empty() || !is_word(format) {
        return None;
    }

    Some(Line::FileDecl { path, format })
}

// TRACK <NN> <MODE>
fn parse_track(rest: &str) -> Option<Line<'_>> {
    let (number, mode) = rest.split_once(char::is_whitespace)?;
    let mode = mode.trim_start();
    if mode.is_empty() {
        return None;
    }

    Some(Line::TrackDecl {
        number: two_digits(number)?,
        mode,
    })
}

// INDEX <NN> <MM>:<SS>:<FF>
fn parse_index(rest: &str) -> Option<Line<'_>> {
    let (number, timecode) = rest.split_once(char::is_whitespace)?;

    let mut fields = timecode.trim_start().split(':');
    let minutes = two_digits(fields.next()?)?;
    let seconds = two_digits(fields.next()?)?;
    let frames = two_digits(fields.next()?)?;
    if fields.next().is_some() {
        return None;
    }

    Some(Line::IndexDecl {
        number: two_digits(number)?,
        timecode: Msf {
            minutes: minutes.into(),
            seconds: seconds.into(),
            frames: frames.into(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_remarks() {
        assert_eq!(
            Line::classify("REM GENRE Rock"),
            Line::Remark {
                tag: "GENRE",
                value: "Rock"
            }
        );
        assert_eq!(
            Line::classify("REM COMMENT \"ExactAudioCopy v0.99pb5\""),
            Line::Remark {
                tag: "COMMENT",
                value: "\"ExactAudioCopy v0.99pb5\""
            }
        );
        assert_eq!(
            Line::classify("REM REPLAYGAIN_ALBUM_GAIN -7.89 dB"),
            Line::Remark {
                tag: "REPLAYGAIN_ALBUM_GAIN",
                value: "-7.89 dB"
            }
        );
        // track-level remarks are indented and not part of the header grammar
        assert_eq!(
            Line::classify("    REM REPLAYGAIN_TRACK_GAIN -7.89 dB"),
            Line::Unrecognized
        );
        assert_eq!(Line::classify("\tREM GENRE Rock"), Line::Unrecognized);
        // a tag without a value does not match the rule
        assert_eq!(Line::classify("REM DISCID"), Line::Unrecognized);
    }

    #[test]
    fn classifies_quoted_file_declarations() {
        assert_eq!(
            Line::classify("FILE \"Artist - Album.wav\" WAVE"),
            Line::FileDecl {
                path: "Artist - Album.wav",
                format: "WAVE"
            }
        );
        assert_eq!(
            Line::classify("FILE \"say \"hi\".flac\" WAVE"),
            Line::FileDecl {
                path: "say \"hi\".flac",
                format: "WAVE"
            }
        );
        assert_eq!(
            Line::classify("FILE \"data.bin\"BINARY"),
            Line::Unrecognized
        );
        assert_eq!(Line::classify("FILE \"data.bin\""), Line::Unrecognized);
    }

    #[test]
    fn classifies_unquoted_file_declarations() {
        assert_eq!(
            Line::classify("FILE range.wav WAVE"),
            Line::FileDecl {
                path: "range.wav",
                format: "WAVE"
            }
        );
        assert_eq!(Line::classify("FILE WAVE"), Line::Unrecognized);
    }

    #[test]
    fn classifies_tracks_with_opaque_modes() {
        assert_eq!(
            Line::classify("  TRACK 01 AUDIO"),
            Line::TrackDecl {
                number: 1,
                mode: "AUDIO"
            }
        );
        assert_eq!(
            Line::classify("  TRACK 02 MODE1/2352"),
            Line::TrackDecl {
                number: 2,
                mode: "MODE1/2352"
            }
        );
        assert_eq!(Line::classify("  TRACK 1 AUDIO"), Line::Unrecognized);
        assert_eq!(Line::classify("  TRACK 001 AUDIO"), Line::Unrecognized);
        assert_eq!(Line::classify("  TRACK 01"), Line::Unrecognized);
    }

    #[test]
    fn classifies_indexes() {
        assert_eq!(
            Line::classify("    INDEX 01 03:20:00"),
            Line::IndexDecl {
                number: 1,
                timecode: Msf {
                    minutes: 3,
                    seconds: 20,
                    frames: 0
                }
            }
        );
        assert_eq!(Line::classify("    INDEX 01 3:20:00"), Line::Unrecognized);
        assert_eq!(
            Line::classify("    INDEX 01 03:20:00:00"),
            Line::Unrecognized
        );
        assert_eq!(Line::classify("    INDEX 01"), Line::Unrecognized);
    }

    #[test]
    fn leaves_other_keywords_unrecognized() {
        for line in [
            "",
            "   ",
            "PERFORMER \"Someone\"",
            "    TITLE \"Intro\"",
            "CATALOG 0000000000000",
            "    FLAGS DCP",
            "    PREGAP 00:02:00",
            "rem GENRE Rock",
            "TRACK",
        ] {
            assert_eq!(Line::classify(line), Line::Unrecognized, "{line:?}");
        }
    }
}
