use std::io::{self, IsTerminal, Write};

use tracing_subscriber::EnvFilter;

use crate::stderr_buffer;

/// Per-event writer that hands each formatted log line to the stderr buffer,
/// so log output never lands on top of the TUI.
#[derive(Default)]
pub struct BufferedStderr {
    line: Vec<u8>,
}

impl Write for BufferedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.line.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for BufferedStderr {
    fn drop(&mut self) {
        if !self.line.is_empty() {
            let msg = String::from_utf8_lossy(&self.line).trim_end().to_string();
            stderr_buffer::warn(msg);
        }
    }
}

/// Filter used when `RUST_LOG` is not set
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "selectai=debug"
    } else {
        "selectai=warn"
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Calling this twice is harmless.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(BufferedStderr::default)
        .try_init();
}
