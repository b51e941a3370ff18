use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ascii_art::{AsciiRenderer, CharMatcher, RenderOutput};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use walkdir::WalkDir;

use crate::config::{Config, OutputChoice};
use crate::output::{AsciiOutput, ConsoleOutput, HtmlOutput};

/// Non-interactive conversion of one image or a directory tree of images.
pub struct Converter {
    renderer: AsciiRenderer,
    matcher: CharMatcher,
    resolution: u32,
    format: OutputChoice,
    font: String,
}

impl Converter {
    pub fn new(config: &Config) -> Self {
        let mut matcher = CharMatcher::new(config.charset.chars());
        matcher.set_policy(config.round.to_policy());
        Self {
            renderer: AsciiRenderer,
            matcher,
            resolution: config.resolution,
            format: config.output,
            font: config.html.font.clone(),
        }
    }

    /// Converts `input`. A file goes to `output`, or stdout when `output` is
    /// `None`; a directory requires an output directory.
    pub fn run(&self, input: &Path, output: Option<&Path>) -> Result<usize> {
        if input.is_dir() {
            let out_dir = output.context("converting a directory requires --output")?;
            return self.convert_dir(input, out_dir);
        }

        let rendered = self
            .renderer
            .render_path(input, self.resolution, &self.matcher)
            .with_context(|| format!("failed to render {}", input.display()))?;
        match output {
            Some(path) => self.write(&rendered, path)?,
            None => ConsoleOutput::new(io::stdout().lock()).out(&rendered.grid)?,
        }
        Ok(1)
    }

    fn convert_dir(&self, input: &Path, out_dir: &Path) -> Result<usize> {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

        let entries = collect_files(input);
        if entries.is_empty() {
            anyhow::bail!("no files found in {}", input.display());
        }

        let progress = ProgressBar::new(entries.len() as u64);
        progress.set_style(
            ProgressStyle::with_template(
                "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} images",
            )?
            .progress_chars("=> "),
        );

        let mut converted = 0;
        for entry in &entries {
            match self.renderer.render_path(entry, self.resolution, &self.matcher) {
                Ok(rendered) => {
                    let target = self.target_path(input, entry, out_dir);
                    if let Some(parent) = target.parent() {
                        fs::create_dir_all(parent).with_context(|| {
                            format!("failed to create output directory {}", parent.display())
                        })?;
                    }
                    self.write(&rendered, &target)?;
                    converted += 1;
                },
                Err(err) => warn!("skipping {}: {err}", entry.display()),
            }
            progress.inc(1);
        }

        progress.finish_with_message(format!(
            "{converted} of {} images written to {}",
            entries.len(),
            out_dir.display()
        ));
        Ok(converted)
    }

    /// Mirrors `entry`'s position under `input` inside `out_dir`. The format
    /// extension is appended so `a.png` and `a.bmp` land in distinct files.
    fn target_path(&self, input: &Path, entry: &Path, out_dir: &Path) -> PathBuf {
        let relative = entry.strip_prefix(input).unwrap_or(entry);
        let mut target = out_dir.join(relative).into_os_string();
        target.push(".");
        target.push(self.format.extension());
        PathBuf::from(target)
    }

    fn write(&self, rendered: &RenderOutput, path: &Path) -> Result<()> {
        match self.format {
            OutputChoice::Console => {
                let file = fs::File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                ConsoleOutput::new(io::BufWriter::new(file)).out(&rendered.grid)
            },
            OutputChoice::Html => HtmlOutput::new(path, self.font.as_str()).out(&rendered.grid),
        }
    }
}

fn collect_files(root: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .collect();
    entries.sort();
    entries
}

#[cfg(test)]
mod tests {
    use ascii_art::{Rgb, RgbImage};

    use super::*;

    fn save_gray(path: &Path, width: u32, height: u32) {
        save_filled(path, width, height, 90);
    }

    fn save_filled(path: &Path, width: u32, height: u32, value: u8) {
        RgbImage::from_pixel(width, height, Rgb([value, value, value])).save(path).unwrap();
    }

    #[test]
    fn single_file_to_text() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("gray.png");
        let output = dir.path().join("gray.txt");
        save_gray(&input, 8, 8);

        let converted = Converter::new(&Config::default()).run(&input, Some(&output)).unwrap();
        assert_eq!(converted, 1);
        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn directory_mirrors_tree_and_skips_unreadable_files() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::create_dir(input.path().join("nested")).unwrap();
        save_gray(&input.path().join("a.png"), 8, 8);
        save_gray(&input.path().join("nested").join("b.png"), 16, 16);
        fs::write(input.path().join("notes.txt"), "not an image").unwrap();

        let config = Config { output: OutputChoice::Html, ..Config::default() };
        let converted = Converter::new(&config).run(input.path(), Some(out.path())).unwrap();

        assert_eq!(converted, 2);
        assert!(out.path().join("a.png.html").is_file());
        assert!(out.path().join("nested").join("b.png.html").is_file());
        assert!(!out.path().join("notes.txt.html").exists());
    }

    #[test]
    fn same_stem_inputs_get_separate_outputs() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        save_filled(&input.path().join("a.png"), 8, 8, 0);
        save_filled(&input.path().join("a.bmp"), 8, 8, 255);

        let converted =
            Converter::new(&Config::default()).run(input.path(), Some(out.path())).unwrap();

        assert_eq!(converted, 2);
        let dark = fs::read_to_string(out.path().join("a.png.txt")).unwrap();
        let light = fs::read_to_string(out.path().join("a.bmp.txt")).unwrap();
        assert_eq!(dark.lines().count(), 2);
        assert_eq!(light.lines().count(), 2);
        assert_ne!(dark, light);
        assert!(!out.path().join("a.txt").exists());
    }

    #[test]
    fn directory_without_output_is_an_error() {
        let input = tempfile::tempdir().unwrap();
        let err = Converter::new(&Config::default()).run(input.path(), None).unwrap_err();
        assert!(err.to_string().contains("--output"));
    }
}
