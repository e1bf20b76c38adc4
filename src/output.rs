//! Terminal output formatting for the blazon CLI.
//!
//! Cargo-style status lines with right-aligned coloured verbs, written
//! to stderr so stdout stays machine-readable.

use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for the right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer. Colour is enabled when stderr is a
/// terminal.
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Print a status line with a green bold verb.
    /// e.g. "   Generated banner_a1b2c3d4.png (4 layers)"
    pub fn status(&self, verb: &str, message: &str) {
        self.line(GREEN, verb, message);
    }

    /// Print an informational line with a cyan bold verb.
    pub fn info(&self, verb: &str, message: &str) {
        self.line(CYAN, verb, message);
    }

    /// Print a warning line with a yellow bold verb.
    pub fn warning(&self, verb: &str, message: &str) {
        self.line(YELLOW, verb, message);
    }

    fn line(&self, color: &str, verb: &str, message: &str) {
        if self.color {
            eprintln!("{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}");
        } else {
            eprintln!("{verb:>VERB_WIDTH$} {message}");
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}
