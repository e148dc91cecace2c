//! Print handler for configurable output.
//!
//! The built-in `print` writes through a handler so output can go to
//! different destinations:
//! - stdout (default)
//! - a buffer, for embedding and tests
//!
//! Uses enum dispatch instead of trait objects on this frequently-used path.

use std::io::Write;

use parking_lot::Mutex;

/// Default print handler that writes to stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        write_line(&mut std::io::stdout().lock(), msg);
    }
}

/// Write `msg` and a newline. A failed write is logged and does not stop
/// the program.
fn write_line(out: &mut impl Write, msg: &str) {
    if let Err(err) = writeln!(out, "{msg}") {
        tracing::warn!(error = %err, "print output lost");
    }
}

/// Print handler that captures output to a buffer.
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    /// Create a new buffer print handler.
    pub fn new() -> Self {
        BufferPrintHandler {
            buffer: Mutex::new(String::new()),
        }
    }

    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    /// Get all captured output.
    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Clear captured output.
    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferPrintHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Print handler implementation using enum dispatch.
pub enum PrintHandlerImpl {
    /// Writes to stdout (default).
    Stdout(StdoutPrintHandler),
    /// Captures to a buffer.
    Buffer(BufferPrintHandler),
}

impl PrintHandlerImpl {
    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
        }
    }

    /// Get all captured output.
    ///
    /// Returns an empty string for stdout, which doesn't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Stdout(_) => String::new(),
            Self::Buffer(h) => h.get_output(),
        }
    }

    /// Clear captured output. No-op for stdout.
    pub fn clear(&self) {
        match self {
            Self::Stdout(_) => {}
            Self::Buffer(h) => h.clear(),
        }
    }
}

/// Shared print handler that can be passed around.
pub type SharedPrintHandler = std::sync::Arc<PrintHandlerImpl>;

/// Create a default stdout print handler.
pub fn stdout_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

/// Create a buffer print handler for capturing output.
pub fn buffer_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_handler_println_captures_with_newline() {
        let handler = BufferPrintHandler::new();
        handler.println("hello");
        assert_eq!(handler.get_output(), "hello\n");
    }

    #[test]
    fn buffer_handler_multiple_lines_in_order() {
        let handler = buffer_handler();
        handler.println("0");
        handler.println("1");
        assert_eq!(handler.get_output(), "0\n1\n");
    }

    #[test]
    fn buffer_handler_clear() {
        let handler = buffer_handler();
        handler.println("gone");
        handler.clear();
        assert_eq!(handler.get_output(), "");
    }

    #[test]
    fn stdout_handler_captures_nothing() {
        let handler = stdout_handler();
        handler.println("visible on stdout");
        assert_eq!(handler.get_output(), "");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_line_appends_newline() {
        let mut out = Vec::new();
        write_line(&mut out, "hello");
        assert_eq!(out, b"hello\n");
    }

    #[test]
    fn write_line_survives_a_closed_stream() {
        write_line(&mut ClosedPipe, "dropped");
    }
}
