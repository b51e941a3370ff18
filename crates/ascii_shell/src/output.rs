use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ascii_art::CharGrid;

/// Destination for a finished character grid.
pub trait AsciiOutput {
    fn out(&mut self, grid: &CharGrid) -> Result<()>;
}

/// Writes one line per grid row.
pub struct ConsoleOutput<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> AsciiOutput for ConsoleOutput<W> {
    fn out(&mut self, grid: &CharGrid) -> Result<()> {
        for line in grid.lines() {
            writeln!(self.writer, "{line}")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the grid as a standalone HTML page in a fixed width font.
pub struct HtmlOutput {
    path: PathBuf,
    font: String,
}

impl HtmlOutput {
    pub fn new(path: impl Into<PathBuf>, font: impl Into<String>) -> Self {
        Self { path: path.into(), font: font.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AsciiOutput for HtmlOutput {
    fn out(&mut self, grid: &CharGrid) -> Result<()> {
        fs::write(&self.path, render_html(grid, &self.font))
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

pub fn render_html(grid: &CharGrid, font: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>ASCII Art</title>\n</head>\n");
    html.push_str("<body style=\"background-color:black;margin:0;\">\n");
    html.push_str(&format!(
        "<pre style=\"font-family:'{}',monospace;font-size:8px;line-height:1;color:white;\">\n",
        escape(font)
    ));
    for line in grid.lines() {
        html.push_str(&escape(&line));
        html.push('\n');
    }
    html.push_str("</pre>\n</body>\n</html>\n");
    html
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
