//! Line-oriented rendering of a captioning session.

use std::{fmt::Display, io::Write};

use client_core::{transport::image_url, Edge, SubjectView};
use shared::domain::{Subject, SubjectId};
use tracing::warn;
use url::Url;

const FLASH: &str = "\x07\x1b[41;97m";
const ALERT: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

pub struct TerminalView<W> {
    out: W,
    asset_base: Url,
    caption: String,
    total: usize,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, asset_base: Url) -> Self {
        Self {
            out,
            asset_base,
            caption: String::new(),
            total: 0,
        }
    }

    fn line(&mut self, text: impl Display) {
        if let Err(error) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            warn!(%error, "failed to write to terminal");
        }
    }
}

impl<W: Write + Send + Sync> SubjectView for TerminalView<W> {
    fn populate(&mut self, subjects: &[Subject]) {
        self.total = subjects.len();
        self.line(format_args!("loaded {} subjects", subjects.len()));
    }

    fn show_subject(&mut self, index: usize, subject: &Subject) {
        self.caption = subject.caption.clone();
        let image = image_url(&self.asset_base, &subject.image_path)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| subject.image_path.clone());
        let total = self.total;
        self.line(format_args!("[{}/{total}] {}", index + 1, subject.id));
        self.line(format_args!("  image:   {image}"));
        self.line(format_args!("  caption: {}", subject.caption));
    }

    fn hide_subject(&mut self) {
        self.caption.clear();
    }

    fn show_completion(&mut self) {
        self.line("All categories completed!");
    }

    fn caption(&self) -> String {
        self.caption.clone()
    }

    fn set_caption(&mut self, caption: &str) {
        self.caption = caption.to_string();
        self.line(format_args!("  caption: {caption}"));
    }

    fn flash_edge(&mut self, edge: Edge) {
        let text = match edge {
            Edge::First => "already at the first subject",
            Edge::Last => "already at the last subject",
        };
        self.line(format_args!("{FLASH} {text} {RESET}"));
    }

    fn report_persist_failure(&mut self, id: &SubjectId, message: &str) {
        self.line(format_args!(
            "{ALERT}caption for {id} not saved: {message}{RESET}"
        ));
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
