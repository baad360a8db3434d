//! Shared progress and logging helpers to keep spinners pinned.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

static MULTI_PROGRESS: OnceLock<MultiProgress> = OnceLock::new();

fn multi_progress() -> &'static MultiProgress {
    MULTI_PROGRESS.get_or_init(|| {
        let mp = MultiProgress::new();
        mp.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        mp
    })
}

/// Spinner for a single blocking step such as the page fetch
pub fn add_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = multi_progress().add(ProgressBar::new_spinner());
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[derive(Default, Clone)]
pub struct LogWriterFactory;

pub struct LogWriter {
    buffer: String,
}

impl LogWriter {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn emit(line: &str) {
        emit_line(multi_progress(), &mut io::stderr(), line);
    }
}

/// Print above the bars, or straight to `fallback` when nothing is drawn.
/// A hidden `MultiProgress` (stderr not a terminal) swallows `println`.
fn emit_line(mp: &MultiProgress, fallback: &mut impl Write, line: &str) {
    if mp.is_hidden() {
        let _ = writeln!(fallback, "{}", line);
    } else {
        let _ = mp.println(line);
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.push_str(&String::from_utf8_lossy(buf));

        while let Some(idx) = self.buffer.find('\n') {
            Self::emit(self.buffer[..idx].trim_end_matches('\r'));
            self.buffer.drain(..idx + 1);
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            Self::emit(self.buffer.trim_end_matches(['\n', '\r']));
            self.buffer.clear();
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_target_falls_back_to_writer() {
        let mp = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let mut out = Vec::new();

        emit_line(&mp, &mut out, "ERROR appatlas: IO error: Not a directory");
        emit_line(&mp, &mut out, "second");

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ERROR appatlas: IO error: Not a directory\nsecond\n"
        );
    }
}
