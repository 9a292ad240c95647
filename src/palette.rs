use std::{fmt, str::FromStr};

use crossterm::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::UnknownName;

/// The classic 16-color console palette plus the terminal's own default.
///
/// `Default` never names a concrete color: as a foreground or background it
/// means "keep whatever is currently set".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsoleColor {
    Default,
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    #[serde(alias = "grey")]
    Gray,
    #[serde(alias = "dark-grey")]
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl ConsoleColor {
    /// Concrete palette entries in console order.
    pub const PALETTE: [ConsoleColor; 16] = [
        ConsoleColor::Black,
        ConsoleColor::DarkBlue,
        ConsoleColor::DarkGreen,
        ConsoleColor::DarkCyan,
        ConsoleColor::DarkRed,
        ConsoleColor::DarkMagenta,
        ConsoleColor::DarkYellow,
        ConsoleColor::Gray,
        ConsoleColor::DarkGray,
        ConsoleColor::Blue,
        ConsoleColor::Green,
        ConsoleColor::Cyan,
        ConsoleColor::Red,
        ConsoleColor::Magenta,
        ConsoleColor::Yellow,
        ConsoleColor::White,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConsoleColor::Default => "default",
            ConsoleColor::Black => "black",
            ConsoleColor::DarkBlue => "dark-blue",
            ConsoleColor::DarkGreen => "dark-green",
            ConsoleColor::DarkCyan => "dark-cyan",
            ConsoleColor::DarkRed => "dark-red",
            ConsoleColor::DarkMagenta => "dark-magenta",
            ConsoleColor::DarkYellow => "dark-yellow",
            ConsoleColor::Gray => "gray",
            ConsoleColor::DarkGray => "dark-gray",
            ConsoleColor::Blue => "blue",
            ConsoleColor::Green => "green",
            ConsoleColor::Cyan => "cyan",
            ConsoleColor::Red => "red",
            ConsoleColor::Magenta => "magenta",
            ConsoleColor::Yellow => "yellow",
            ConsoleColor::White => "white",
        }
    }

    /// `None` for [`ConsoleColor::Default`].
    pub fn to_crossterm(self) -> Option<Color> {
        let color = match self {
            ConsoleColor::Default => return None,
            ConsoleColor::Black => Color::Black,
            ConsoleColor::DarkBlue => Color::DarkBlue,
            ConsoleColor::DarkGreen => Color::DarkGreen,
            ConsoleColor::DarkCyan => Color::DarkCyan,
            ConsoleColor::DarkRed => Color::DarkRed,
            ConsoleColor::DarkMagenta => Color::DarkMagenta,
            ConsoleColor::DarkYellow => Color::DarkYellow,
            ConsoleColor::Gray => Color::Grey,
            ConsoleColor::DarkGray => Color::DarkGrey,
            ConsoleColor::Blue => Color::Blue,
            ConsoleColor::Green => Color::Green,
            ConsoleColor::Cyan => Color::Cyan,
            ConsoleColor::Red => Color::Red,
            ConsoleColor::Magenta => Color::Magenta,
            ConsoleColor::Yellow => Color::Yellow,
            ConsoleColor::White => Color::White,
        };
        Some(color)
    }
}

impl fmt::Display for ConsoleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConsoleColor {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        let normalized = normalized.replace("grey", "gray");
        if normalized == "default" {
            return Ok(ConsoleColor::Default);
        }
        ConsoleColor::PALETTE
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| UnknownName::new("color", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("dark-gray".parse::<ConsoleColor>().unwrap(), ConsoleColor::DarkGray);
        assert_eq!("Dark_Grey".parse::<ConsoleColor>().unwrap(), ConsoleColor::DarkGray);
        assert_eq!("YELLOW".parse::<ConsoleColor>().unwrap(), ConsoleColor::Yellow);
        assert_eq!("default".parse::<ConsoleColor>().unwrap(), ConsoleColor::Default);
        assert!("purple".parse::<ConsoleColor>().is_err());
    }

    #[test]
    fn palette_names_round_trip_through_serde() {
        for color in ConsoleColor::PALETTE {
            let json = serde_json::to_string(&color).unwrap();
            assert_eq!(json, format!("\"{}\"", color.name()));
            assert!(color.to_crossterm().is_some());
        }
        assert_eq!(ConsoleColor::Default.to_crossterm(), None);
    }
}
