pub mod cd;
pub mod cue;

pub use cue::Cue;
pub use cue::error::{CueError, CueResult};
