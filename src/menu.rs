use std::{fmt, sync::Arc};

pub const DEFAULT_EXIT_LABEL: &str = "Quit";

/// Something that happens when a menu item is chosen.
///
/// The menu is passed mutably so an action can change what the next render
/// shows. `item` is a snapshot of the chosen item taken before the call.
pub trait Actionable {
    fn invoke(&self, menu: &mut Menu, item: &MenuItem);
}

impl<F> Actionable for F
where
    F: Fn(&mut Menu, &MenuItem),
{
    fn invoke(&self, menu: &mut Menu, item: &MenuItem) {
        self(menu, item)
    }
}

#[derive(Clone, Default)]
pub enum Action {
    #[default]
    None,
    Run(Arc<dyn Actionable + Send + Sync>),
    /// Runs a nested menu loop, then returns to the owning menu.
    Submenu(Box<Menu>),
}

impl Action {
    pub fn run<A>(action: A) -> Self
    where
        A: Actionable + Send + Sync + 'static,
    {
        Action::Run(Arc::new(action))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::None => f.write_str("None"),
            Action::Run(_) => f.write_str("Run(..)"),
            Action::Submenu(menu) => f.debug_tuple("Submenu").field(&menu.title).finish(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MenuItem {
    key: Option<String>,
    pub label: String,
    pub action: Action,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            key: None,
            label: label.into(),
            action: Action::None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    pub fn on_select<F>(self, f: F) -> Self
    where
        F: Fn(&mut Menu, &MenuItem) + Send + Sync + 'static,
    {
        self.with_action(Action::run(f))
    }

    pub fn submenu(self, menu: Menu) -> Self {
        self.with_action(Action::Submenu(Box::new(menu)))
    }

    /// The selection key, or `None` while it is blank.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = Some(key.into());
    }

    /// Case-insensitive comparison of the key against already-trimmed input.
    pub fn matches(&self, input: &str) -> bool {
        self.key().is_some_and(|key| {
            key.chars()
                .flat_map(char::to_lowercase)
                .eq(input.chars().flat_map(char::to_lowercase))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Item(usize),
    Exit,
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub title: String,
    pub items: Vec<MenuItem>,
    pub exit_item: MenuItem,
}

impl Menu {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
            exit_item: MenuItem::new(DEFAULT_EXIT_LABEL),
        }
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = MenuItem>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    pub fn with_exit_item(mut self, exit_item: MenuItem) -> Self {
        self.exit_item = exit_item;
        self
    }

    pub fn push(&mut self, item: MenuItem) {
        self.items.push(item);
    }

    /// Exit item first, then the configured items in order.
    pub fn display_order(&self) -> impl Iterator<Item = &MenuItem> {
        std::iter::once(&self.exit_item).chain(self.items.iter())
    }

    /// Gives every blank key its display position: 0 for the exit item,
    /// 1.. for the items.
    pub fn assign_default_keys(&mut self) {
        let positions = std::iter::once(&mut self.exit_item).chain(self.items.iter_mut());
        for (i, item) in positions.enumerate() {
            if item.key().is_none() {
                item.set_key(i.to_string());
            }
        }
    }

    /// Configured items are searched before the exit item, so an item that
    /// reuses the exit key wins.
    pub fn find(&self, input: &str) -> Option<Selection> {
        if let Some(i) = self.items.iter().position(|item| item.matches(input)) {
            return Some(Selection::Item(i));
        }
        self.exit_item.matches(input).then_some(Selection::Exit)
    }

    pub fn get(&self, selection: Selection) -> Option<&MenuItem> {
        match selection {
            Selection::Item(i) => self.items.get(i),
            Selection::Exit => Some(&self.exit_item),
        }
    }

    pub fn get_mut(&mut self, selection: Selection) -> Option<&mut MenuItem> {
        match selection {
            Selection::Item(i) => self.items.get_mut(i),
            Selection::Exit => Some(&mut self.exit_item),
        }
    }
}
