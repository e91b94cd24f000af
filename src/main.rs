//! kilo-edit: a minimalist modal-less terminal text editor.
//!
//! This binary is a thin shell around the engine crates: it parses the
//! command line, puts the terminal into raw mode, measures the window, and
//! runs the read-dispatch-render loop. Everything interesting lives in
//! `kilo-edit-editor` and friends.

use std::io::{self, Read, Write};
use std::os::unix::io::AsRawFd;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use kilo_edit_editor::{Editor, Error, KeyOutcome, Result};
use kilo_edit_input::{ctrl, KeyReader};
use kilo_edit_terminal::{escape, window_size, RawMode};

/// A minimalist terminal text editor.
#[derive(Parser)]
#[command(name = "kilo-edit", version, about)]
struct Cli {
    /// File to open.
    file: Option<PathBuf>,

    /// Print decoded byte values instead of editing; Ctrl-Q exits.
    #[arg(long)]
    echo_keys: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = if cli.echo_keys { echo_keys() } else { run(&cli) };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The raw-mode guard restored the terminal when it dropped;
            // leave a clean screen behind the diagnostic.
            let mut stdout = io::stdout();
            let _ = stdout.write_all(escape::CLEAR_SCREEN.as_bytes());
            let _ = stdout.write_all(escape::CURSOR_HOME.as_bytes());
            let _ = stdout.flush();
            eprintln!("kilo-edit: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let _raw = RawMode::enable(stdin.as_raw_fd()).map_err(Error::Terminal)?;
    let (rows, cols) = window_size(stdout.as_raw_fd(), &mut stdin.lock(), &mut stdout.lock())
        .map_err(Error::Terminal)?;

    let mut editor = Editor::new(rows, cols);
    if let Some(path) = &cli.file {
        editor.open(&path.to_string_lossy())?;
    }
    editor.set_status("HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-/ = find");

    let mut input = KeyReader::new(stdin.lock());
    let mut out = stdout.lock();
    loop {
        editor.refresh_screen(&mut out)?;
        let key = input.read_key().map_err(Error::Read)?;
        if editor.process_key(key, &mut input, &mut out)? == KeyOutcome::Quit {
            return Ok(());
        }
    }
}

/// Raw-mode byte echo, for checking what sequences a terminal sends.
fn echo_keys() -> Result<()> {
    let stdin = io::stdin();
    let _raw = RawMode::enable(stdin.as_raw_fd()).map_err(Error::Terminal)?;

    let mut input = stdin.lock();
    let mut buf = [0u8; 1];
    loop {
        let n = match input.read(&mut buf) {
            Ok(n) => n,
            Err(e)
                if e.kind() == io::ErrorKind::Interrupted
                    || e.kind() == io::ErrorKind::WouldBlock =>
            {
                continue
            }
            Err(e) => return Err(Error::Read(e)),
        };
        if n == 0 {
            continue;
        }

        let c = buf[0];
        if c.is_ascii_control() {
            print!("{c}\r\n");
        } else {
            print!("{c} ('{}')\r\n", c as char);
        }
        io::stdout().flush().map_err(Error::Terminal)?;

        if c == ctrl(b'q') {
            return Ok(());
        }
    }
}
