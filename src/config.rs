use std::{
    collections::HashMap,
    env,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::menu::{Menu, DEFAULT_EXIT_LABEL};
use crate::nav::EofPolicy;
use crate::render::ColorMode;
use crate::theme::{Level, StyleOverride, Theme};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default)]
    pub exit_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_key: Option<String>,

    /// Leave the menu when stdin closes instead of reporting an empty selection.
    #[serde(default)]
    pub exit_on_eof: Option<bool>,

    #[serde(default)]
    pub theme: HashMap<Level, StyleOverride>,
}

impl Config {
    pub fn theme(&self) -> Theme {
        let mut theme = Theme::default();
        for (level, patch) in &self.theme {
            theme.apply(*level, *patch);
        }
        theme
    }

    pub fn eof_policy(&self, default: EofPolicy) -> EofPolicy {
        match self.exit_on_eof {
            Some(true) => EofPolicy::Exit,
            Some(false) => EofPolicy::Invalid,
            None => default,
        }
    }

    /// Applies the configured exit label/key where the menu kept the defaults.
    pub fn apply_exit_item(&self, menu: &mut Menu) {
        if let Some(label) = self.exit_label.as_deref() {
            if menu.exit_item.label == DEFAULT_EXIT_LABEL {
                menu.exit_item.label = label.to_string();
            }
        }
        if let Some(key) = self.exit_key.as_deref() {
            if menu.exit_item.key().is_none() {
                menu.exit_item.set_key(key);
            }
        }
    }
}

const CONFIG_ENV: &str = "CONSOLENAV_CONFIG";
const LOCAL_CONFIG: &str = "consolenav.json";
const APP_DIR: &str = "consolenav";

pub fn load_optional() -> Result<Option<Config>> {
    let Some(path) = resolve_config_path() else {
        return Ok(None);
    };
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("reading config {}", path.display())),
    };
    let cfg: Config =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());
    Ok(Some(cfg))
}

/// `CONSOLENAV_CONFIG` wins even if the file is missing; then a
/// `consolenav.json` in the working directory; then the per-user file.
pub fn resolve_config_path() -> Option<PathBuf> {
    let explicit = env::var_os(CONFIG_ENV).filter(|p| !p.to_string_lossy().trim().is_empty());
    if let Some(explicit) = explicit {
        return Some(PathBuf::from(explicit));
    }

    let local = Path::new(LOCAL_CONFIG);
    if local.is_file() {
        return Some(local.to_path_buf());
    }

    user_config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
}

fn user_config_dir() -> Option<PathBuf> {
    ["XDG_CONFIG_HOME", "APPDATA"]
        .into_iter()
        .filter_map(env::var_os)
        .find(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
}

/// Writes the template unless a config is already there; never overwrites.
pub fn ensure_config_file_exists() -> Result<PathBuf> {
    let path = resolve_config_path().ok_or_else(|| {
        anyhow!("no config location: set {CONFIG_ENV}, XDG_CONFIG_HOME, APPDATA or HOME")
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config dir {}", parent.display()))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(path),
        Err(e) => return Err(e).with_context(|| format!("create {}", path.display())),
    };

    let template = Config {
        exit_label: Some(DEFAULT_EXIT_LABEL.to_string()),
        exit_on_eof: Some(true),
        ..Default::default()
    };
    let mut s = serde_json::to_string_pretty(&template).context("serialize config template")?;
    s.push('\n');
    file.write_all(s.as_bytes())
        .with_context(|| format!("write {}", path.display()))?;
    log::info!("wrote config template to {}", path.display());
    Ok(path)
}
