use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unexpected line format: {0}")]
    UnexpectedLine(String),

    #[error("bad number: {0}")]
    BadNumber(#[from] ParseIntError),

    /// A tunnel or start position names a valve that was never described.
    #[error("unknown valve {name} (referenced from {from})")]
    UnknownValve { name: String, from: String },

    #[error("too many rooms: {0} (at most {max})", max = u16::MAX as usize + 1)]
    TooManyRooms(usize),

    #[error("too many valves to compact: {0} (at most {max})", max = crate::compact::MAX_NODES)]
    TooManyValves(usize),

    #[error("failed to open {}: {source}", .path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write answers: {0}")]
    Output(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
