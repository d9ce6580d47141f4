//! Console input: the start gate and the background line listener.
//!
//! A dedicated `std::thread` owns the reader and hands each completed line
//! to the async quiz loop through a tokio `mpsc` channel of capacity 1, so
//! at most one line is pending at a time. The thread is detached; it is
//! never joined and simply dies with the process.
//!
//! The reader must not live on tokio's blocking pool: a stdin read parked
//! there holds up runtime shutdown after the session ends.

use std::io::{self, BufRead, BufReader};
use std::thread;

use tokio::sync::mpsc;

use crate::error::ReadError;

/// Name of the listener thread, visible in debuggers and panics.
pub const LISTENER_THREAD_NAME: &str = "quizclock-input";

/// Strip one trailing `\n`, then one trailing `\r`.
pub fn normalize_line(raw: &str) -> &str {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Block until the user presses enter.
///
/// Everything up to and including the first newline is consumed.
pub fn wait_for_start<R: BufRead>(reader: &mut R) -> Result<(), ReadError> {
    let mut skipped = Vec::new();
    let read = reader.read_until(b'\n', &mut skipped)?;
    if read == 0 || skipped.last() != Some(&b'\n') {
        return Err(ReadError::Closed);
    }
    Ok(())
}

/// Start the listener over standard input.
pub fn spawn_stdin_listener() -> io::Result<mpsc::Receiver<String>> {
    spawn_listener(BufReader::new(io::stdin()))
}

/// Start a detached listener thread over `reader`.
///
/// The returned receiver yields one normalized line per read. It closes when
/// the reader hits end-of-file.
pub fn spawn_listener<R>(reader: R) -> io::Result<mpsc::Receiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);

    // Detached: the JoinHandle is dropped and the thread is never joined.
    thread::Builder::new()
        .name(LISTENER_THREAD_NAME.into())
        .spawn(move || listen(reader, tx))?;

    Ok(rx)
}

fn listen<R: BufRead>(mut reader: R, tx: mpsc::Sender<String>) {
    let mut buf = String::new();
    loop {
        buf.clear();
        match read_line(&mut reader, &mut buf) {
            Ok(line) => {
                if tx.blocking_send(line).is_err() {
                    tracing::debug!("quiz loop finished, listener exiting");
                    return;
                }
            }
            Err(ReadError::Closed) => {
                tracing::debug!("console input closed, listener exiting");
                return;
            }
            Err(e) => {
                tracing::warn!("{e}");
            }
        }
    }
}

fn read_line<R: BufRead>(reader: &mut R, buf: &mut String) -> Result<String, ReadError> {
    if reader.read_line(buf)? == 0 {
        return Err(ReadError::Closed);
    }
    Ok(normalize_line(buf).to_string())
}
