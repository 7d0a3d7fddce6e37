//! # Inventory
//!
//! The in-memory listing: an ordered list of [`Item`]s, one per non-blank line
//! of the inventory file, in file order. Items are addressed either by their
//! 1-based line number or by their alias.
//!
//! This module knows nothing about files; loading and saving live in
//! [`crate::store`].

use crate::codec;
use crate::error::{InvError, Result};
use crate::model::{Item, Markers};
use std::collections::BTreeSet;

/// How a user refers to an item on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKey {
    Line(usize),
    Alias(String),
}

impl ItemKey {
    /// Anything that reads as an integer is a line number (even when out of
    /// range); everything else is an alias, with the marker added if missing.
    pub fn parse(key: &str, markers: &Markers) -> Self {
        let key = key.trim();
        let digits = key
            .strip_prefix('-')
            .or_else(|| key.strip_prefix('+'))
            .unwrap_or(key);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return ItemKey::Alias(markers.aliased(key));
        }
        // Too large for a line number means out of range, not an alias.
        match key.parse::<i64>() {
            Ok(n) if n > 0 => ItemKey::Line(usize::try_from(n).unwrap_or(0)),
            _ => ItemKey::Line(0),
        }
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKey::Line(n) => write!(f, "line {}", n),
            ItemKey::Alias(a) => write!(f, "{}", a),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<Item>,
    markers: Markers,
}

impl Inventory {
    pub fn new(markers: Markers) -> Self {
        Self {
            items: Vec::new(),
            markers,
        }
    }

    /// Parses every non-blank line and numbers the items in file order.
    pub fn from_text(text: &str, markers: Markers) -> Self {
        let items = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| codec::parse(line, &markers))
            .collect();
        let mut inventory = Self { items, markers };
        inventory.renumber();
        inventory
    }

    /// The file contents: serialized, trimmed, non-blank lines joined by newlines.
    pub fn to_text(&self) -> String {
        self.items
            .iter()
            .map(|item| self.serialize(item))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn serialize(&self, item: &Item) -> String {
        codec::serialize(item, &self.markers)
    }

    pub fn parse(&self, line: &str) -> Item {
        codec::parse(line, &self.markers)
    }

    fn renumber(&mut self) {
        for (i, item) in self.items.iter_mut().enumerate() {
            item.line = i + 1;
        }
    }

    /// Appends an item. Its alias, if any, must not be used yet.
    pub fn add(&mut self, item: Item) -> Result<&Item> {
        if let Some(alias) = &item.alias {
            if !self.alias_free(alias) {
                return Err(InvError::AliasTaken(alias.clone()));
            }
        }
        self.items.push(item);
        self.renumber();
        Ok(&self.items[self.items.len() - 1])
    }

    /// Removes the item at a 1-based line and renumbers the rest.
    pub fn remove(&mut self, line: usize) -> Result<Item> {
        if line == 0 || line > self.items.len() {
            return Err(InvError::ItemNotFound(format!("line {}", line)));
        }
        let item = self.items.remove(line - 1);
        self.renumber();
        Ok(item)
    }

    /// Case-insensitive substring match against each item's serialized line.
    pub fn filter(&self, needle: &str) -> Vec<&Item> {
        let needle = needle.to_lowercase();
        self.items
            .iter()
            .filter(|item| self.serialize(item).to_lowercase().contains(&needle))
            .collect()
    }

    /// Items with a required amount that is not met.
    pub fn filter_deficit(&self) -> Vec<&Item> {
        self.items.iter().filter(|item| item.is_deficit()).collect()
    }

    pub fn tags(&self) -> BTreeSet<String> {
        self.items
            .iter()
            .flat_map(|item| item.tags().iter().cloned())
            .collect()
    }

    pub fn categories(&self) -> BTreeSet<String> {
        self.items
            .iter()
            .filter_map(|item| item.category().map(str::to_string))
            .collect()
    }

    pub fn aliases(&self) -> BTreeSet<String> {
        self.items
            .iter()
            .filter_map(|item| item.alias.clone())
            .collect()
    }

    /// Picture tokens referenced by any item.
    pub fn pictures(&self) -> BTreeSet<String> {
        self.items
            .iter()
            .flat_map(|item| item.pics().iter().cloned())
            .collect()
    }

    /// `alias` must include its marker.
    pub fn alias_free(&self, alias: &str) -> bool {
        !self
            .items
            .iter()
            .any(|item| item.alias.as_deref() == Some(alias))
    }

    fn position(&self, key: &ItemKey) -> Option<usize> {
        match key {
            ItemKey::Line(n) if *n >= 1 && *n <= self.items.len() => Some(n - 1),
            ItemKey::Line(_) => None,
            ItemKey::Alias(alias) => self
                .items
                .iter()
                .position(|item| item.alias.as_deref() == Some(alias.as_str())),
        }
    }

    /// Looks an item up by line number or alias (marker optional).
    pub fn get(&self, key: &str) -> Option<&Item> {
        let key = ItemKey::parse(key, &self.markers);
        self.position(&key).map(|i| &self.items[i])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Item> {
        let key = ItemKey::parse(key, &self.markers);
        match self.position(&key) {
            Some(i) => self.items.get_mut(i),
            None => None,
        }
    }

    /// Like [`Inventory::get`], but a miss is an error.
    pub fn require(&self, key: &str) -> Result<&Item> {
        self.get(key)
            .ok_or_else(|| InvError::ItemNotFound(ItemKey::parse(key, &self.markers).to_string()))
    }

    pub fn require_mut(&mut self, key: &str) -> Result<&mut Item> {
        let parsed = ItemKey::parse(key, &self.markers);
        match self.position(&parsed) {
            Some(i) => Ok(&mut self.items[i]),
            None => Err(InvError::ItemNotFound(parsed.to_string())),
        }
    }

    /// Items the given item references, skipping references that resolve to nothing.
    pub fn referenced_by(&self, item: &Item) -> Vec<&Item> {
        item.refs()
            .iter()
            .filter_map(|reference| self.get(reference))
            .collect()
    }
}
