//! Raw-mode terminal attributes with scoped restore.

use std::io;
use std::os::unix::io::RawFd;

use termios::{
    tcsetattr, Termios, BRKINT, CS8, ECHO, ICANON, ICRNL, IEXTEN, INPCK, ISIG, ISTRIP, IXON,
    OPOST, TCSAFLUSH, VMIN, VTIME,
};

/// Guard that holds stdin in raw mode.
///
/// Construction snapshots the current attributes and switches off echo,
/// canonical buffering, signal generation, output post-processing, and
/// flow control; reads return after at most 100 ms (`VMIN=0, VTIME=1`).
/// Dropping the guard restores the snapshot, so the terminal comes back
/// sane on every exit path, including panics and fatal errors.
pub struct RawMode {
    fd: RawFd,
    original: Termios,
}

impl RawMode {
    /// Puts the terminal behind `fd` (stdin) into raw mode.
    pub fn enable(fd: RawFd) -> io::Result<Self> {
        let original = Termios::from_fd(fd)?;

        let mut raw = original;
        raw.c_iflag &= !(BRKINT | ICRNL | INPCK | ISTRIP | IXON);
        raw.c_oflag &= !OPOST;
        raw.c_cflag |= CS8;
        raw.c_lflag &= !(ECHO | ICANON | IEXTEN | ISIG);
        raw.c_cc[VMIN] = 0;
        raw.c_cc[VTIME] = 1;
        tcsetattr(fd, TCSAFLUSH, &raw)?;

        Ok(Self { fd, original })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        // Nothing sensible to do if restore fails at teardown.
        let _ = tcsetattr(self.fd, TCSAFLUSH, &self.original);
    }
}
