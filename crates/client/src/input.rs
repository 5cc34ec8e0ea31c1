//! Line-oriented keyboard input.
use std::str::FromStr;

use game_core::{Command, Direction};

/// Recognised input words. Matching ignores case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString)]
#[strum(ascii_case_insensitive)]
enum Keyword {
    #[strum(serialize = "w", serialize = "k", serialize = "up")]
    Up,
    #[strum(serialize = "s", serialize = "j", serialize = "down")]
    Down,
    #[strum(serialize = "a", serialize = "h", serialize = "left")]
    Left,
    #[strum(serialize = "d", serialize = "l", serialize = "right")]
    Right,
    #[strum(serialize = "r", serialize = "reset")]
    Reset,
    #[strum(serialize = "q", serialize = "quit", serialize = "exit")]
    Quit,
}

impl From<Keyword> for Command {
    fn from(keyword: Keyword) -> Self {
        match keyword {
            Keyword::Up => Command::Move(Direction::Up),
            Keyword::Down => Command::Move(Direction::Down),
            Keyword::Left => Command::Move(Direction::Left),
            Keyword::Right => Command::Move(Direction::Right),
            Keyword::Reset => Command::Reset,
            Keyword::Quit => Command::Quit,
        }
    }
}

/// Maps one input line to a command. Unknown input is a no-op.
pub fn parse_command(line: &str) -> Command {
    Keyword::from_str(line.trim())
        .map(Command::from)
        .unwrap_or(Command::Noop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_keys() {
        for (line, direction) in [
            ("w", Direction::Up),
            ("K", Direction::Up),
            ("down", Direction::Down),
            ("  a\n", Direction::Left),
            ("Right", Direction::Right),
            ("l", Direction::Right),
        ] {
            assert_eq!(parse_command(line), Command::Move(direction), "{line:?}");
        }
    }

    #[test]
    fn control_keys() {
        assert_eq!(parse_command("r"), Command::Reset);
        assert_eq!(parse_command("RESET"), Command::Reset);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("exit"), Command::Quit);
    }

    #[test]
    fn everything_else_is_a_noop() {
        for line in ["", "   ", "x", "upward", "move up", "42"] {
            assert_eq!(parse_command(line), Command::Noop, "{line:?}");
        }
    }
}
