use crate::domain::model::StatusView;
use crate::domain::ports::StatusDisplay;
use colored::Colorize;
use std::io::Write;

/// Renders the status line in place on the terminal. The Live state gets
/// the emphasized treatment the page applies with its pulse highlight.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl StatusDisplay for TerminalDisplay {
    fn render(&mut self, view: &StatusView) {
        // \x1b[2K clears the current line before rewriting it.
        if view.text.is_empty() {
            print!("\r\x1b[2K");
        } else if view.emphasis {
            print!("\r\x1b[2K🔴 {}", view.text.red().bold());
        } else {
            print!("\r\x1b[2K⏰ {}", view.text);
        }
        let _ = std::io::stdout().flush();
    }
}
