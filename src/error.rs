use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("writing to the console failed")]
    Write(#[source] io::Error),
    #[error("reading a menu selection failed")]
    Read(#[source] io::Error),
}

/// Returned when a color, level or color-mode name does not parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{name}'")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

impl UnknownName {
    pub fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}
