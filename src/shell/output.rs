//! Output sink boundary and text styling.
//!
//! The presentation layer receives formatted text only. It never hands screen
//! state back to the core.

use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Line terminator written after every line of command output.
pub const LINE_END: &str = "\r\n";

/// Capability the shell writes to.
pub trait OutputSink: Send {
    fn write(&mut self, text: &str);
    fn clear(&mut self);
}

/// Terminal sink over the process stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    fn clear(&mut self) {
        self.write("\x1b[2J\x1b[H");
    }
}

#[derive(Debug, Default)]
struct BufferState {
    text: String,
    clears: usize,
}

/// In-memory sink. Clones share the same buffer, so a caller can keep one
/// handle and give the other to the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    state: Arc<Mutex<BufferState>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written since the last `take`.
    pub fn take(&self) -> String {
        std::mem::take(&mut self.state.lock().text)
    }

    pub fn contents(&self) -> String {
        self.state.lock().text.clone()
    }

    /// How many times `clear` was requested.
    pub fn clear_count(&self) -> usize {
        self.state.lock().clears
    }
}

impl OutputSink for BufferSink {
    fn write(&mut self, text: &str) {
        self.state.lock().text.push_str(text);
    }

    fn clear(&mut self) {
        let mut state = self.state.lock();
        state.text.clear();
        state.clears += 1;
    }
}

/// Colour scheme for command output. With colour disabled every method
/// returns the text unchanged.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, |t| t.red().to_string())
    }

    pub fn directory(&self, text: &str) -> String {
        self.paint(text, |t| t.blue().to_string())
    }

    pub fn file(&self, text: &str) -> String {
        self.paint(text, |t| t.green().to_string())
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow().to_string())
    }

    pub fn accent(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan().to_string())
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.color {
            style(text)
        } else {
            text.to_string()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(true)
    }
}
