//! Status lines on stderr.
//!
//! Machine-readable output (the `resolve` JSON) goes to stdout directly and
//! never through here.

use std::fmt::Display;

use console::{Term, style};

#[derive(Clone, Copy)]
enum Tone {
    Plain,
    Good,
    Warn,
    Bad,
}

fn paint(tone: Tone, msg: &str) -> String {
    match tone {
        Tone::Plain => msg.to_owned(),
        Tone::Good => style(msg).green().to_string(),
        Tone::Warn => style(msg).yellow().to_string(),
        Tone::Bad => style(msg).red().to_string(),
    }
}

/// `"{count} {label}"` followed by one dimmed bullet per entry.
fn list_lines<T: Display>(label: &str, entries: &[T]) -> Vec<String> {
    let bullet = style("-").dim();
    std::iter::once(paint(Tone::Warn, &format!("{} {label}", entries.len())))
        .chain(entries.iter().map(|entry| format!("  {bullet} {entry}")))
        .collect()
}

pub(crate) struct Output {
    term: Term,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(Tone::Plain, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(Tone::Good, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(Tone::Warn, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(Tone::Bad, msg);
    }

    /// Counted warning heading plus the entries. Prints nothing for an
    /// empty list.
    pub(crate) fn warning_list<T: Display>(&self, label: &str, entries: &[T]) {
        if entries.is_empty() {
            return;
        }
        for line in list_lines(label, entries) {
            self.line(Tone::Plain, &line);
        }
    }

    fn line(&self, tone: Tone, msg: &str) {
        // A closed stderr is not worth failing a command over.
        let _ = self.term.write_line(&paint(tone, msg));
    }
}
