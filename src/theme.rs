use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownName;
use crate::palette::ConsoleColor;

/// Text levels the renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Error,
    Header,
    SubtleText,
    SystemText,
    Text,
    MenuTitle,
    MenuKey,
    MenuLabel,
    Prompt,
}

impl Level {
    pub const ALL: [Level; 9] = [
        Level::Error,
        Level::Header,
        Level::SubtleText,
        Level::SystemText,
        Level::Text,
        Level::MenuTitle,
        Level::MenuKey,
        Level::MenuLabel,
        Level::Prompt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Header => "header",
            Level::SubtleText => "subtle_text",
            Level::SystemText => "system_text",
            Level::Text => "text",
            Level::MenuTitle => "menu_title",
            Level::MenuKey => "menu_key",
            Level::MenuLabel => "menu_label",
            Level::Prompt => "prompt",
        }
    }

    pub fn default_style(self) -> Style {
        use ConsoleColor::*;
        match self {
            Level::Error => Style::new(DarkGray, DarkRed),
            Level::Header => Style::fg(Yellow),
            Level::SubtleText => Style::fg(DarkGray),
            Level::SystemText => Style::new(White, DarkGray),
            Level::Text => Style::fg(Gray),
            Level::MenuTitle => Style::fg(Green),
            Level::MenuKey => Style::fg(Green),
            Level::MenuLabel => Style::fg(DarkGreen),
            Level::Prompt => Style::fg(DarkGray),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Level::ALL
            .into_iter()
            .find(|l| l.name() == normalized)
            .ok_or_else(|| UnknownName::new("level", s))
    }
}

/// A foreground/background pair. [`ConsoleColor::Default`] on either side
/// keeps the color that is active when the text is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: ConsoleColor,
    pub bg: ConsoleColor,
}

impl Style {
    pub const fn new(fg: ConsoleColor, bg: ConsoleColor) -> Self {
        Self { fg, bg }
    }

    pub const fn fg(fg: ConsoleColor) -> Self {
        Self {
            fg,
            bg: ConsoleColor::Default,
        }
    }
}

/// Partial style as it appears in config files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOverride {
    #[serde(default)]
    pub fg: Option<ConsoleColor>,
    #[serde(default)]
    pub bg: Option<ConsoleColor>,
}

#[derive(Debug, Default, Clone)]
pub struct Theme {
    overrides: HashMap<Level, Style>,
}

impl Theme {
    pub fn style(&self, level: Level) -> Style {
        self.overrides
            .get(&level)
            .copied()
            .unwrap_or_else(|| level.default_style())
    }

    pub fn set(&mut self, level: Level, style: Style) {
        self.overrides.insert(level, style);
    }

    /// Replaces whichever side the override names, keeping the rest.
    pub fn apply(&mut self, level: Level, patch: StyleOverride) {
        let mut style = self.style(level);
        if let Some(fg) = patch.fg {
            style.fg = fg;
        }
        if let Some(bg) = patch.bg {
            style.bg = bg;
        }
        self.set(level, style);
    }
}
