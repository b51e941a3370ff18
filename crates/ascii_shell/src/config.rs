use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ascii_art::RoundingPolicy;
use clap::ValueEnum;
use log::warn;
use serde::Deserialize;

/// Session defaults, optionally read from a TOML file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Characters active when a session starts.
    pub charset: String,
    /// Cells per row.
    pub resolution: u32,
    pub round: RoundChoice,
    pub output: OutputChoice,
    pub html: HtmlConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            charset: "0123456789".to_string(),
            resolution: 2,
            round: RoundChoice::Abs,
            output: OutputChoice::Console,
            html: HtmlConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct HtmlConfig {
    pub path: PathBuf,
    /// CSS font family; should be monospaced.
    pub font: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("out.html"), font: "Courier New".to_string() }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RoundChoice {
    #[default]
    Abs,
    Up,
    Down,
}

impl RoundChoice {
    /// Shell argument form, matched exactly like the `--round`/`--output` flags.
    pub fn parse(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, false).ok()
    }

    pub fn to_policy(self) -> RoundingPolicy {
        match self {
            RoundChoice::Abs => RoundingPolicy::Nearest,
            RoundChoice::Up => RoundingPolicy::Up,
            RoundChoice::Down => RoundingPolicy::Down,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputChoice {
    #[default]
    Console,
    Html,
}

impl OutputChoice {
    pub fn parse(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, false).ok()
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputChoice::Console => "txt",
            OutputChoice::Html => "html",
        }
    }
}

impl Config {
    /// Reads `path`, falling back to defaults when no path is given or the
    /// file does not exist. A file that exists but does not parse is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };

        if !path.exists() {
            warn!("config file {} not found, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_path_uses_defaults() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
        let config = Config::load(Some(Path::new("/nonexistent/ascii_shell.toml"))).unwrap();
        assert_eq!(config.charset, "0123456789");
        assert_eq!(config.resolution, 2);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "round = \"down\"\nresolution = 8\n\n[html]\nfont = \"Menlo\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.round, RoundChoice::Down);
        assert_eq!(config.resolution, 8);
        assert_eq!(config.output, OutputChoice::Console);
        assert_eq!(config.html.font, "Menlo");
        assert_eq!(config.html.path, PathBuf::from("out.html"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "round = \"sideways\"").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config file"));
    }

    #[test]
    fn shell_vocabulary_maps_to_policies() {
        assert_eq!(RoundChoice::parse("abs").map(RoundChoice::to_policy), Some(RoundingPolicy::Nearest));
        assert_eq!(RoundChoice::parse("up").map(RoundChoice::to_policy), Some(RoundingPolicy::Up));
        assert_eq!(RoundChoice::parse("down").map(RoundChoice::to_policy), Some(RoundingPolicy::Down));
        assert_eq!(RoundChoice::parse("nearest"), None);
        assert_eq!(OutputChoice::parse("html"), Some(OutputChoice::Html));
        assert_eq!(OutputChoice::parse("pdf"), None);
        assert_eq!(RoundChoice::parse("ABS"), None);
    }

    #[test]
    fn shell_words_match_flag_values() {
        for &choice in RoundChoice::value_variants() {
            let name = choice.to_possible_value().unwrap();
            assert_eq!(RoundChoice::parse(name.get_name()), Some(choice));
        }
        for &choice in OutputChoice::value_variants() {
            let name = choice.to_possible_value().unwrap();
            assert_eq!(OutputChoice::parse(name.get_name()), Some(choice));
        }
    }
}
