//! Business logic for each CLI action.
//!
//! Commands operate on an [`Inventory`](crate::inventory::Inventory) (and the
//! store, for pictures) and return a [`CmdResult`]. They never print.

use crate::model::Item;
use std::path::PathBuf;

pub mod add;
pub mod edit;
pub mod list;
pub mod names;
pub mod pictures;
pub mod refs;
pub mod remove;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_items: Vec<Item>,
    /// Size of the whole inventory, for "N of M items shown".
    pub total_items: usize,
    pub names: Vec<String>,
    pub picture_paths: Vec<PathBuf>,
    /// Picture tokens attached to an item by this command.
    pub attached_pictures: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_items<'a, I>(mut self, items: I, total: usize) -> Self
    where
        I: IntoIterator<Item = &'a Item>,
    {
        self.listed_items = items.into_iter().cloned().collect();
        self.total_items = total;
        self
    }

    pub fn with_names<I: IntoIterator<Item = String>>(mut self, names: I) -> Self {
        self.names = names.into_iter().collect();
        self
    }

    pub fn with_picture_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.picture_paths = paths;
        self
    }
}

/// Literal value that clears a field on edit.
pub const UNSET: &str = "unset";
