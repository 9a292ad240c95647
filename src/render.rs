use std::{
    env, fmt,
    io::{self, IsTerminal, Stdout, Write},
    str::FromStr,
    sync::{Mutex, MutexGuard, PoisonError},
};

use crossterm::{
    queue,
    style::{Color, SetBackgroundColor, SetForegroundColor},
};
use serde::{Deserialize, Serialize};

use crate::error::UnknownName;
use crate::theme::{Level, Style, Theme};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Whether escape sequences should be written to an output that is (or
    /// is not) a terminal. `Auto` also honours `NO_COLOR`.
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                is_terminal && env::var_os("NO_COLOR").map_or(true, |v| v.is_empty())
            }
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        })
    }
}

impl FromStr for ColorMode {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(UnknownName::new("color mode", s)),
        }
    }
}

/// Colors currently set on the output. Terminals cannot be asked for this,
/// so the renderer keeps track of it itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColorState {
    fg: Color,
    bg: Color,
}

impl ColorState {
    const RESET: ColorState = ColorState {
        fg: Color::Reset,
        bg: Color::Reset,
    };

    fn resolve(self, style: Style) -> ColorState {
        ColorState {
            fg: style.fg.to_crossterm().unwrap_or(self.fg),
            bg: style.bg.to_crossterm().unwrap_or(self.bg),
        }
    }
}

struct Output<W> {
    out: W,
    state: ColorState,
}

/// Leveled, colored console writer.
///
/// Every write sets the level's colors, writes, and puts the previous colors
/// back while holding the renderer's mutex, so concurrent callers never see
/// each other's color state or half-written lines. Use [`Renderer::lock`] to
/// keep several writes together.
pub struct Renderer<W: Write> {
    output: Mutex<Output<W>>,
    theme: Theme,
    colored: bool,
}

impl Renderer<Stdout> {
    pub fn stdout(theme: Theme, mode: ColorMode) -> Self {
        let stdout = io::stdout();
        let colored = mode.enabled(stdout.is_terminal());
        Renderer::new(stdout, theme, colored)
    }
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, theme: Theme, colored: bool) -> Self {
        Self {
            output: Mutex::new(Output {
                out,
                state: ColorState::RESET,
            }),
            theme,
            colored,
        }
    }

    /// Holds the output until the guard is dropped.
    pub fn lock(&self) -> RenderGuard<'_, W> {
        RenderGuard {
            output: self.output.lock().unwrap_or_else(PoisonError::into_inner),
            theme: &self.theme,
            colored: self.colored,
        }
    }

    pub fn into_inner(self) -> W {
        self.output
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .out
    }

    /// Error line followed by a blank line.
    pub fn error(&self, message: &str) -> io::Result<()> {
        let mut guard = self.lock();
        guard.write_line(Level::Error, message)?;
        guard.blank_line()
    }

    pub fn header(&self, title: &str) -> io::Result<()> {
        self.lock().write_line(Level::Header, title)
    }

    pub fn subtle_text(&self, text: &str) -> io::Result<()> {
        self.lock().write_line(Level::SubtleText, text)
    }

    pub fn system_text(&self, text: &str) -> io::Result<()> {
        self.lock().write_line(Level::SystemText, text)
    }

    pub fn text(&self, text: &str) -> io::Result<()> {
        self.lock().write_line(Level::Text, text)
    }

    pub fn blank_line(&self) -> io::Result<()> {
        self.lock().blank_line()
    }
}

pub struct RenderGuard<'a, W: Write> {
    output: MutexGuard<'a, Output<W>>,
    theme: &'a Theme,
    colored: bool,
}

impl<W: Write> RenderGuard<'_, W> {
    pub fn write(&mut self, level: Level, text: &str) -> io::Result<()> {
        let style = self.theme.style(level);
        self.write_styled(style, text, false)
    }

    pub fn write_line(&mut self, level: Level, text: &str) -> io::Result<()> {
        let style = self.theme.style(level);
        self.write_styled(style, text, true)
    }

    pub fn blank_line(&mut self) -> io::Result<()> {
        let output = &mut *self.output;
        output.out.write_all(b"\n")?;
        output.out.flush()
    }

    pub fn write_styled(&mut self, style: Style, text: &str, newline: bool) -> io::Result<()> {
        let colored = self.colored;
        let output = &mut *self.output;
        let prior = output.state;
        let active = prior.resolve(style);

        if colored {
            queue!(
                output.out,
                SetForegroundColor(active.fg),
                SetBackgroundColor(active.bg)
            )?;
        }
        output.state = active;
        output.out.write_all(text.as_bytes())?;

        if colored {
            queue!(
                output.out,
                SetForegroundColor(prior.fg),
                SetBackgroundColor(prior.bg)
            )?;
        }
        output.state = prior;

        if newline {
            output.out.write_all(b"\n")?;
        }
        output.out.flush()
    }

    /// Draws a title in `level` with a dashed underline of the same width.
    pub fn write_underlined(&mut self, level: Level, title: &str) -> io::Result<()> {
        let rule = "-".repeat(title.chars().count());
        self.write_line(level, title)?;
        self.write_line(level, &rule)
    }
}
