use std::{fs, io::Write, path::Path, sync::Arc};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::menu::{Action, Actionable, Menu, MenuItem, DEFAULT_EXIT_LABEL};
use crate::render::Renderer;

const SUBMENU_EXIT_LABEL: &str = "Back";

/// A menu described in JSON.
///
/// ```json
/// { "title": "Main", "items": [
///     { "label": "Hello", "message": "hi there" },
///     { "key": "t", "label": "Tools", "items": [ { "label": "Hammer" } ] }
/// ] }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct MenuFile {
    pub title: String,
    #[serde(default)]
    pub exit_label: Option<String>,
    #[serde(default)]
    pub exit_key: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemFile {
    #[serde(default)]
    pub key: Option<String>,
    pub label: String,
    /// Printed when the item is chosen.
    #[serde(default)]
    pub message: Option<String>,
    /// Makes the item open a submenu titled after its label.
    #[serde(default)]
    pub items: Option<Vec<ItemFile>>,
    #[serde(default)]
    pub exit_label: Option<String>,
}

impl MenuFile {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading menu {}", path.display()))?;
        Self::parse(&bytes).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let file: MenuFile = serde_json::from_slice(bytes)?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            bail!("menu title must not be empty");
        }
        validate_items(&self.items, &self.title)
    }

    pub fn build<W>(&self, renderer: &Arc<Renderer<W>>) -> Menu
    where
        W: Write + Send + 'static,
    {
        let mut exit_item = MenuItem::new(self.exit_label.as_deref().unwrap_or(DEFAULT_EXIT_LABEL));
        if let Some(key) = self.exit_key.as_deref() {
            exit_item.set_key(key);
        }
        Menu::new(self.title.clone())
            .with_exit_item(exit_item)
            .with_items(self.items.iter().map(|item| item.build(renderer)))
    }
}

impl ItemFile {
    fn build<W>(&self, renderer: &Arc<Renderer<W>>) -> MenuItem
    where
        W: Write + Send + 'static,
    {
        let mut item = MenuItem::new(self.label.clone());
        if let Some(key) = self.key.as_deref() {
            item.set_key(key);
        }

        if let Some(children) = &self.items {
            let exit = MenuItem::new(self.exit_label.as_deref().unwrap_or(SUBMENU_EXIT_LABEL));
            let submenu = Menu::new(self.label.clone())
                .with_exit_item(exit)
                .with_items(children.iter().map(|child| child.build(renderer)));
            return item.submenu(submenu);
        }

        if let Some(text) = &self.message {
            return item.with_action(Action::run(Message {
                renderer: Arc::clone(renderer),
                text: text.clone(),
            }));
        }

        item
    }
}

fn validate_items(items: &[ItemFile], menu: &str) -> Result<()> {
    for item in items {
        if item.label.trim().is_empty() {
            bail!("item in menu '{menu}' has an empty label");
        }
        if item.message.is_some() && item.items.is_some() {
            bail!(
                "item '{}' in menu '{menu}' has both a message and a submenu",
                item.label
            );
        }
        if let Some(children) = &item.items {
            validate_items(children, &item.label)?;
        }
    }
    Ok(())
}

struct Message<W: Write> {
    renderer: Arc<Renderer<W>>,
    text: String,
}

impl<W: Write> Actionable for Message<W> {
    fn invoke(&self, _menu: &mut Menu, item: &MenuItem) {
        if let Err(e) = self.renderer.text(&self.text) {
            log::warn!("could not print message for '{}': {e}", item.label);
        }
    }
}
