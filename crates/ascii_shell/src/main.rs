use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ascii_art::load_image;
use clap::{Parser, Subcommand};

mod batch;
mod charset;
mod commands;
mod config;
mod output;
mod shell;

use batch::Converter;
use config::{Config, OutputChoice, RoundChoice};
use shell::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert images to brightness-matched ASCII art")]
struct Cli {
    /// TOML file with session defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open an interactive shell over an image
    Shell(ShellArgs),
    /// Convert an image, or every image under a directory, in one go
    Convert(ConvertArgs),
}

#[derive(Parser, Debug)]
struct ShellArgs {
    /// Input image path
    image: PathBuf,
    /// Where `asciiArt` sends its result
    #[arg(long, value_enum)]
    output: Option<OutputChoice>,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input image or directory
    input: PathBuf,
    /// Output file, or output directory for directory input; stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputChoice>,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug, Clone)]
struct RenderSettings {
    /// Initial character set
    #[arg(long)]
    charset: Option<String>,
    /// Characters per row
    #[arg(long)]
    resolution: Option<u32>,
    /// Rounding method used to pick a character
    #[arg(long, value_enum)]
    round: Option<RoundChoice>,
}

impl RenderSettings {
    fn apply(&self, config: &mut Config) {
        if let Some(charset) = &self.charset {
            config.charset = charset.clone();
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(round) = self.round {
            config.round = round;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Shell(args) => shell(args, config),
        Commands::Convert(args) => convert(args, config),
    }
}

fn shell(args: ShellArgs, mut config: Config) -> Result<()> {
    args.settings.apply(&mut config);
    if let Some(output) = args.output {
        config.output = output;
    }

    let image =
        load_image(&args.image).with_context(|| format!("failed to open {:?}", args.image))?;
    let mut shell = Shell::new(&image, &config, io::stdout().lock());
    shell.run(io::stdin().lock())?;
    log::info!(
        "session closed with {} characters at resolution {}",
        shell.matcher().len(),
        shell.resolution()
    );
    Ok(())
}

fn convert(args: ConvertArgs, mut config: Config) -> Result<()> {
    args.settings.apply(&mut config);
    if let Some(format) = args.format {
        config.output = format;
    }

    let converted = Converter::new(&config).run(&args.input, args.output.as_deref())?;
    log::info!("converted {converted} image(s) from {:?}", args.input);
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "ascii_shell",
            "shell",
            "cat.png",
            "--charset",
            "ab",
            "--resolution",
            "16",
            "--round",
            "up",
        ]);
        let Commands::Shell(args) = cli.command else {
            panic!("expected shell subcommand");
        };

        let mut config = Config::default();
        args.settings.apply(&mut config);
        assert_eq!(config.charset, "ab");
        assert_eq!(config.resolution, 16);
        assert_eq!(config.round, RoundChoice::Up);
        assert_eq!(config.output, OutputChoice::Console);
    }
}
