use super::backend::StorageBackend;
use crate::error::{InvError, Result};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::PathBuf;

const VIRTUAL_ROOT: &str = "/mem/inventory";

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since invtxt is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    inventory: RefCell<Option<String>>,
    backup: RefCell<Option<String>>,
    pictures: RefCell<BTreeSet<String>>,
    garbage: RefCell<Option<BTreeSet<String>>>,
    simulate_write_error: RefCell<bool>,
    simulate_discard_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inventory(text: &str) -> Self {
        let backend = Self::new();
        *backend.inventory.borrow_mut() = Some(text.to_string());
        backend
    }

    pub fn with_pictures<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pictures
            .borrow_mut()
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Enable write error simulation for testing the save recovery path.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Make removing the backup fail, after the new contents were written.
    pub fn set_simulate_discard_error(&self, simulate: bool) {
        *self.simulate_discard_error.borrow_mut() = simulate;
    }

    pub fn inventory_text(&self) -> Option<String> {
        self.inventory.borrow().clone()
    }

    pub fn has_backup(&self) -> bool {
        self.backup.borrow().is_some()
    }

    pub fn picture_names(&self) -> Vec<String> {
        self.pictures.borrow().iter().cloned().collect()
    }

    pub fn garbage_names(&self) -> Vec<String> {
        self.garbage
            .borrow()
            .as_ref()
            .map(|g| g.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Simulates the user emptying and removing the garbage directory.
    pub fn clear_garbage(&self) {
        *self.garbage.borrow_mut() = None;
    }
}

impl StorageBackend for MemBackend {
    fn init_layout(&self) -> Result<()> {
        let mut inventory = self.inventory.borrow_mut();
        if inventory.is_none() {
            *inventory = Some(String::new());
        }
        Ok(())
    }

    fn read_inventory(&self) -> Result<String> {
        self.inventory
            .borrow()
            .clone()
            .ok_or_else(|| InvError::Store("Inventory file missing".to_string()))
    }

    fn backup_inventory(&self) -> Result<()> {
        let current = self
            .inventory
            .borrow_mut()
            .take()
            .ok_or_else(|| InvError::Store("Inventory file missing".to_string()))?;
        *self.backup.borrow_mut() = Some(current);
        Ok(())
    }

    fn write_inventory(&self, content: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            // A failed write may still leave a truncated file behind.
            *self.inventory.borrow_mut() = Some(String::new());
            return Err(InvError::Store("Simulated write error".to_string()));
        }
        *self.inventory.borrow_mut() = Some(content.to_string());
        Ok(())
    }

    fn restore_backup(&self) -> Result<()> {
        let backup = self
            .backup
            .borrow_mut()
            .take()
            .ok_or_else(|| InvError::Store("No backup to restore".to_string()))?;
        *self.inventory.borrow_mut() = Some(backup);
        Ok(())
    }

    fn discard_backup(&self) -> Result<()> {
        if *self.simulate_discard_error.borrow() {
            return Err(InvError::Store("Simulated backup removal error".to_string()));
        }
        self.backup
            .borrow_mut()
            .take()
            .map(|_| ())
            .ok_or_else(|| InvError::Store("No backup to discard".to_string()))
    }

    fn list_pictures(&self) -> Result<Vec<String>> {
        Ok(self.picture_names())
    }

    fn picture_path(&self, file_name: &str) -> PathBuf {
        PathBuf::from(VIRTUAL_ROOT).join("pics").join(file_name)
    }

    fn confirm_picture(&self, file_name: &str) -> Result<()> {
        self.pictures.borrow_mut().insert(file_name.to_string());
        Ok(())
    }

    fn garbage_path(&self) -> PathBuf {
        PathBuf::from(VIRTUAL_ROOT).join("garbage")
    }

    fn garbage_exists(&self) -> bool {
        self.garbage.borrow().is_some()
    }

    fn create_garbage(&self) -> Result<()> {
        let mut garbage = self.garbage.borrow_mut();
        if garbage.is_some() {
            return Err(InvError::Store("Garbage directory exists".to_string()));
        }
        *garbage = Some(BTreeSet::new());
        Ok(())
    }

    fn move_to_garbage(&self, file_name: &str) -> Result<()> {
        if !self.pictures.borrow_mut().remove(file_name) {
            return Err(InvError::Store(format!("No such picture: {}", file_name)));
        }
        self.garbage
            .borrow_mut()
            .as_mut()
            .ok_or_else(|| InvError::Store("Garbage directory missing".to_string()))?
            .insert(file_name.to_string());
        Ok(())
    }
}
