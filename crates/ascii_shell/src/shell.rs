use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use ascii_art::{
    pad, AsciiRenderer, CharMatcher, RenderOutput, ResolutionBounds, RgbImage, MIN_ACTIVE_CHARS,
};
use log::{info, warn};

use crate::charset::CharSelection;
use crate::commands::{Command, ResolutionChange};
use crate::config::{Config, HtmlConfig, OutputChoice};
use crate::output::{AsciiOutput, ConsoleOutput, HtmlOutput};

pub const PROMPT: &str = ">>> ";

/// Interactive session over one image.
///
/// The shell owns the padded image and the character matcher for its whole
/// lifetime and renders a fresh grid on every `asciiArt` command.
pub struct Shell<W: Write> {
    image: RgbImage,
    resolution: u32,
    bounds: ResolutionBounds,
    matcher: CharMatcher,
    output: OutputChoice,
    html: HtmlConfig,
    renderer: AsciiRenderer,
    writer: W,
}

impl<W: Write> Shell<W> {
    pub fn new(image: &RgbImage, config: &Config, writer: W) -> Self {
        let image = pad(image).into_owned();
        let bounds = ResolutionBounds::for_image(image.width(), image.height());

        let resolution = if (bounds.min..=bounds.max).contains(&config.resolution) {
            config.resolution
        } else {
            let fallback = bounds.min.min(bounds.max).max(1);
            warn!(
                "resolution {} outside {}..={} for this image, using {fallback}",
                config.resolution, bounds.min, bounds.max
            );
            fallback
        };

        let mut matcher = CharMatcher::new(config.charset.chars());
        matcher.set_policy(config.round.to_policy());

        Self {
            image,
            resolution,
            bounds,
            matcher,
            output: config.output,
            html: config.html.clone(),
            renderer: AsciiRenderer,
            writer,
        }
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn matcher(&self) -> &CharMatcher {
        &self.matcher
    }

    /// Reads commands until `exit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        self.prompt()?;
        for line in input.lines() {
            let line = line.context("failed to read command")?;
            match Command::parse(&line) {
                Command::Exit => return Ok(()),
                command => self.execute(command)?,
            }
            self.prompt()?;
        }
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Empty | Command::Exit => {},
            Command::Chars => {
                let chars: Vec<String> = self.matcher.chars().map(String::from).collect();
                writeln!(self.writer, "{}", chars.join(" "))?;
            },
            Command::Add(Some(selection)) => self.add(&selection),
            Command::Add(None) => writeln!(self.writer, "Did not add due to incorrect format.")?,
            Command::Remove(Some(selection)) => self.remove(&selection),
            Command::Remove(None) => {
                writeln!(self.writer, "Did not remove due to incorrect format.")?
            },
            Command::Resolution(change) => self.change_resolution(change)?,
            Command::Output(Some(output)) => self.output = output,
            Command::Output(None) => {
                writeln!(self.writer, "Did not change output method due to incorrect format.")?
            },
            Command::Round(Some(round)) => self.matcher.set_policy(round.to_policy()),
            Command::Round(None) => {
                writeln!(self.writer, "Did not change rounding method due to incorrect format.")?
            },
            Command::AsciiArt => self.ascii_art()?,
            Command::Unknown(name) => {
                info!("unknown command {name:?}");
                writeln!(self.writer, "Did not execute due to incorrect command.")?
            },
        }
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.writer, "{PROMPT}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn add(&mut self, selection: &CharSelection) {
        for ch in selection.chars() {
            self.matcher.insert(ch);
        }
    }

    fn remove(&mut self, selection: &CharSelection) {
        for ch in selection.chars() {
            self.matcher.remove(ch);
        }
    }

    fn change_resolution(&mut self, change: ResolutionChange) -> Result<()> {
        match change {
            ResolutionChange::Show => {},
            ResolutionChange::Up if self.bounds.can_double(self.resolution) => {
                self.resolution *= 2;
            },
            ResolutionChange::Down if self.bounds.can_halve(self.resolution) => {
                self.resolution /= 2;
            },
            ResolutionChange::Up | ResolutionChange::Down => {
                writeln!(self.writer, "Did not change resolution due to exceeding boundaries.")?;
                return Ok(());
            },
            ResolutionChange::Invalid => {
                writeln!(self.writer, "Did not change resolution due to incorrect format.")?;
                return Ok(());
            },
        }
        writeln!(self.writer, "Resolution set to {}.", self.resolution)?;
        Ok(())
    }

    fn ascii_art(&mut self) -> Result<()> {
        if self.matcher.len() < MIN_ACTIVE_CHARS {
            writeln!(self.writer, "Did not execute. Charset is too small.")?;
            return Ok(());
        }

        let output = match self.renderer.render_image(&self.image, self.resolution, &self.matcher)
        {
            Ok(output) => output,
            Err(err) => {
                warn!("render failed: {err}");
                writeln!(self.writer, "Did not execute: {err}.")?;
                return Ok(());
            },
        };

        self.emit(&output)
    }

    fn emit(&mut self, output: &RenderOutput) -> Result<()> {
        match self.output {
            OutputChoice::Console => ConsoleOutput::new(&mut self.writer).out(&output.grid),
            OutputChoice::Html => {
                let mut html = HtmlOutput::new(&self.html.path, &self.html.font);
                match html.out(&output.grid) {
                    Ok(()) => info!("wrote {}", html.path().display()),
                    Err(err) => {
                        warn!("{err:#}");
                        writeln!(self.writer, "Did not execute: {err:#}.")?;
                    },
                }
                Ok(())
            },
        }
    }
}
