//! User facing status output.
//!
//! Everything goes to stderr because `save <input> -` writes audio to stdout.

use std::io::{self, IsTerminal, Write};

const RULE_WIDTH: usize = 72;

/// Sink for the status and error lines shown to the user.
pub trait Reporter {
    fn status(&self, line: &str);
    fn error(&self, line: &str);
}

/// [`Reporter`] writing to stderr, with color when stderr is a terminal.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    color: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Print a horizontal rule, optionally with a centered title.
    pub fn rule(&self, title: Option<&str>) {
        let _ = writeln!(io::stderr().lock(), "{}", rule(title, RULE_WIDTH));
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn status(&self, line: &str) {
        let _ = writeln!(io::stderr().lock(), "{line}");
    }

    fn error(&self, line: &str) {
        let mut stderr = io::stderr().lock();
        let _ = if self.color {
            writeln!(stderr, "\x1b[31m❌ {line}\x1b[0m")
        } else {
            writeln!(stderr, "❌ {line}")
        };
    }
}

/// Banner shown when the tool starts.
pub fn banner(version: &str) -> String {
    format!("TarakoTalk (Voiced by CoeFont) version {version}")
}

/// Build a rule `width` characters wide with `title` in the middle.
pub fn rule(title: Option<&str>, width: usize) -> String {
    let Some(title) = title else {
        return "─".repeat(width);
    };
    let label = format!(" {title} ");
    let remaining = width.saturating_sub(label.chars().count());
    let left = remaining / 2;
    format!(
        "{}{}{}",
        "─".repeat(left),
        label,
        "─".repeat(remaining - left)
    )
}
