use std::{
    io::{self, BufRead, StdinLock, Write},
    sync::Arc,
};

use log::{debug, trace};

use crate::error::NavError;
use crate::menu::{Action, Menu, Selection};
use crate::render::Renderer;
use crate::theme::Level;

pub const INVALID_SELECTION: &str = "Invalid menu option.";

/// What to do when the input reaches end of file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EofPolicy {
    /// Treat it as an empty selection: reported as invalid, and the menu is
    /// drawn again.
    #[default]
    Invalid,
    /// Leave the menu as if the exit item had been chosen.
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    ExitItem,
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Selections that matched an item, including ones made in submenus.
    pub selections: usize,
    pub reason: ExitReason,
}

/// Draws menus and reads selections until the exit item is chosen.
pub struct Navigator<R, W: Write> {
    input: R,
    renderer: Arc<Renderer<W>>,
    eof: EofPolicy,
}

impl<W: Write> Navigator<StdinLock<'static>, W> {
    pub fn stdin(renderer: Arc<Renderer<W>>) -> Self {
        Navigator::new(io::stdin().lock(), renderer)
    }
}

impl<R: BufRead, W: Write> Navigator<R, W> {
    pub fn new(input: R, renderer: Arc<Renderer<W>>) -> Self {
        Self {
            input,
            renderer,
            eof: EofPolicy::default(),
        }
    }

    pub fn with_eof_policy(mut self, eof: EofPolicy) -> Self {
        self.eof = eof;
        self
    }

    pub fn run_menu(&mut self, menu: &mut Menu) -> Result<Outcome, NavError> {
        let mut selections = 0;
        loop {
            self.draw_menu(menu).map_err(NavError::Write)?;

            let input = match self.read_selection(&menu.title)? {
                Some(line) => line,
                None if self.eof == EofPolicy::Exit => {
                    debug!("end of input in menu '{}'", menu.title);
                    return Ok(Outcome {
                        selections,
                        reason: ExitReason::EndOfInput,
                    });
                }
                None => String::new(),
            };

            let Some(selection) = menu.find(&input) else {
                debug!("no item in menu '{}' matches '{input}'", menu.title);
                self.renderer
                    .error(INVALID_SELECTION)
                    .map_err(NavError::Write)?;
                continue;
            };

            selections += 1;
            let nested = self.select(menu, selection)?;
            if let Some(outcome) = nested {
                selections += outcome.selections;
                if outcome.reason == ExitReason::EndOfInput {
                    return Ok(Outcome {
                        selections,
                        reason: ExitReason::EndOfInput,
                    });
                }
            }

            if selection == Selection::Exit {
                return Ok(Outcome {
                    selections,
                    reason: ExitReason::ExitItem,
                });
            }
        }
    }

    fn draw_menu(&self, menu: &mut Menu) -> io::Result<()> {
        let mut out = self.renderer.lock();
        menu.assign_default_keys();
        trace!("drawing menu '{}' with {} items", menu.title, menu.items.len());

        out.blank_line()?;
        out.write_underlined(Level::MenuTitle, &menu.title)?;
        for item in menu.display_order() {
            out.write(Level::MenuKey, &format!("{}) ", item.key().unwrap_or_default()))?;
            out.write_line(Level::MenuLabel, &item.label)?;
        }
        Ok(())
    }

    /// `None` at end of input; otherwise the trimmed line.
    fn read_selection(&mut self, title: &str) -> Result<Option<String>, NavError> {
        {
            let mut out = self.renderer.lock();
            out.blank_line().map_err(NavError::Write)?;
            out.write(Level::Prompt, &format!("{title}> "))
                .map_err(NavError::Write)?;
        }

        // Bytes that are not UTF-8 decode lossily and then fail to match.
        let mut line = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut line)
            .map_err(NavError::Read)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    /// Announces the choice and runs its action. Returns the nested outcome
    /// when the action was a submenu.
    fn select(&mut self, menu: &mut Menu, selection: Selection) -> Result<Option<Outcome>, NavError> {
        let Some(item) = menu.get(selection) else {
            return Ok(None);
        };
        debug!("menu '{}' selected '{}'", menu.title, item.label);

        {
            let mut out = self.renderer.lock();
            out.write_line(Level::SystemText, &format!("Selected: {}", item.label))
                .map_err(NavError::Write)?;
            out.blank_line().map_err(NavError::Write)?;
        }

        match &item.action {
            Action::None => Ok(None),
            Action::Run(action) => {
                let action = Arc::clone(action);
                let snapshot = item.clone();
                action.invoke(menu, &snapshot);
                Ok(None)
            }
            Action::Submenu(_) => {
                let Some(Action::Submenu(submenu)) = menu.get_mut(selection).map(|i| &mut i.action)
                else {
                    return Ok(None);
                };
                self.run_menu(submenu).map(Some)
            }
        }
    }
}
