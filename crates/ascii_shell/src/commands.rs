use crate::charset::CharSelection;
use crate::config::{OutputChoice, RoundChoice};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionChange {
    Show,
    Up,
    Down,
    Invalid,
}

/// One line of shell input. Malformed arguments parse to `None` so the shell
/// can report them per command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Empty,
    Exit,
    Chars,
    Add(Option<CharSelection>),
    Remove(Option<CharSelection>),
    Resolution(ResolutionChange),
    Output(Option<OutputChoice>),
    Round(Option<RoundChoice>),
    AsciiArt,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Command::Empty;
        };
        let arg = words.next();

        match name {
            "exit" => Command::Exit,
            "chars" => Command::Chars,
            "add" => Command::Add(arg.and_then(CharSelection::parse)),
            "remove" => Command::Remove(arg.and_then(CharSelection::parse)),
            "res" => Command::Resolution(match arg {
                None => ResolutionChange::Show,
                Some("up") => ResolutionChange::Up,
                Some("down") => ResolutionChange::Down,
                Some(_) => ResolutionChange::Invalid,
            }),
            "output" => Command::Output(arg.and_then(OutputChoice::parse)),
            "round" => Command::Round(arg.and_then(RoundChoice::parse)),
            "asciiArt" => Command::AsciiArt,
            other => Command::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(Command::parse("exit"), Command::Exit);
        assert_eq!(Command::parse("  chars  "), Command::Chars);
        assert_eq!(Command::parse("asciiArt"), Command::AsciiArt);
        assert_eq!(Command::parse("add a-c"), Command::Add(Some(CharSelection::Range('a'..='c'))));
        assert_eq!(Command::parse("remove space"), Command::Remove(Some(CharSelection::Single(' '))));
        assert_eq!(Command::parse("output html"), Command::Output(Some(OutputChoice::Html)));
        assert_eq!(Command::parse("round down"), Command::Round(Some(RoundChoice::Down)));
    }

    #[test]
    fn resolution_arguments() {
        assert_eq!(Command::parse("res"), Command::Resolution(ResolutionChange::Show));
        assert_eq!(Command::parse("res up"), Command::Resolution(ResolutionChange::Up));
        assert_eq!(Command::parse("res down"), Command::Resolution(ResolutionChange::Down));
        assert_eq!(Command::parse("res 4"), Command::Resolution(ResolutionChange::Invalid));
    }

    #[test]
    fn bad_arguments_parse_to_none() {
        assert_eq!(Command::parse("add"), Command::Add(None));
        assert_eq!(Command::parse("add abc"), Command::Add(None));
        assert_eq!(Command::parse("round sideways"), Command::Round(None));
        assert_eq!(Command::parse("output"), Command::Output(None));
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(Command::parse("asciiart"), Command::Unknown("asciiart".to_string()));
    }
}
