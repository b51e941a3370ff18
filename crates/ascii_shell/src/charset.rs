use std::ops::RangeInclusive;

/// Printable ASCII, the range `all` expands to.
pub const PRINTABLE: RangeInclusive<char> = ' '..='~';

/// Characters named by an `add` or `remove` argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharSelection {
    Single(char),
    Range(RangeInclusive<char>),
}

impl CharSelection {
    /// Accepts a single character, `all`, `space`, or an inclusive range such
    /// as `a-z`. Range endpoints given in reverse order are swapped.
    pub fn parse(arg: &str) -> Option<Self> {
        let selection = match arg {
            "all" => CharSelection::Range(PRINTABLE),
            "space" => CharSelection::Single(' '),
            _ => {
                let chars: Vec<char> = arg.chars().collect();
                match chars.as_slice() {
                    &[ch] => CharSelection::Single(ch),
                    &[first, '-', last] => CharSelection::Range(first.min(last)..=first.max(last)),
                    _ => return None,
                }
            },
        };
        selection.is_printable().then_some(selection)
    }

    pub fn chars(&self) -> impl Iterator<Item = char> {
        match self {
            CharSelection::Single(ch) => *ch..=*ch,
            CharSelection::Range(range) => range.clone(),
        }
    }

    fn is_printable(&self) -> bool {
        match self {
            CharSelection::Single(ch) => PRINTABLE.contains(ch),
            CharSelection::Range(range) => {
                PRINTABLE.contains(range.start()) && PRINTABLE.contains(range.end())
            },
        }
    }
}
