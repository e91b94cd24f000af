//! Central error type.
//!
//! Every fallible editor operation returns [`Result<T>`]. The first three
//! variants are fatal: the caller clears the screen, lets the raw-mode guard
//! restore the terminal, prints the error, and exits 1. `FileWrite` is not:
//! a failed save surfaces on the status bar and the buffer stays dirty.

use std::fmt;
use std::io;

/// Every error the editor can produce.
#[derive(Debug)]
pub enum Error {
    /// Raw-mode setup, frame write, or window-size query failed.
    Terminal(io::Error),
    /// Stdin produced an error other than a retryable interruption.
    Read(io::Error),
    /// The file named on the command line could not be read.
    FileOpen(io::Error),
    /// Writing the buffer back to disk failed.
    FileWrite(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(e) => write!(f, "terminal error: {e}"),
            Self::Read(e) => write!(f, "input error: {e}"),
            Self::FileOpen(e) => write!(f, "could not open file: {e}"),
            Self::FileWrite(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Terminal(e) | Self::Read(e) | Self::FileOpen(e) | Self::FileWrite(e) => Some(e),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
