//! # API Facade
//!
//! [`InvApi`] is the single entry point for a run: it loads the inventory
//! once, dispatches to the command functions, remembers whether anything
//! changed, and saves on [`InvApi::finish`].
//!
//! The facade does no printing and no business logic of its own. It is
//! generic over [`StorageBackend`], so tests drive it with
//! [`MemBackend`](crate::store::mem_backend::MemBackend).

use crate::commands::{self, edit::Field, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::pictures::PictureImporter;
use crate::store::{InventoryStore, StorageBackend};
use std::path::PathBuf;

pub struct InvApi<B: StorageBackend> {
    store: InventoryStore<B>,
    inventory: Inventory,
    dirty: bool,
}

impl<B: StorageBackend> InvApi<B> {
    /// Loads the inventory through `store`. A load failure is fatal for the run.
    pub fn open(store: InventoryStore<B>) -> Result<Self> {
        let inventory = store.load()?;
        Ok(Self {
            store,
            inventory,
            dirty: false,
        })
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn store(&self) -> &InventoryStore<B> {
        &self.store
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mutated(&mut self, result: Result<CmdResult>) -> Result<CmdResult> {
        if result.is_ok() {
            self.dirty = true;
        }
        result
    }

    pub fn list(&self, filter: Option<&str>) -> CmdResult {
        commands::list::run(&self.inventory, filter)
    }

    pub fn deficit(&self) -> CmdResult {
        commands::list::deficit(&self.inventory)
    }

    pub fn categories(&self) -> CmdResult {
        commands::names::categories(&self.inventory)
    }

    pub fn tags(&self) -> CmdResult {
        commands::names::tags(&self.inventory)
    }

    pub fn aliases(&self) -> CmdResult {
        commands::names::aliases(&self.inventory)
    }

    pub fn refs(&self, key: &str) -> Result<CmdResult> {
        commands::refs::run(&self.inventory, key)
    }

    pub fn add(&mut self, record: &str) -> Result<CmdResult> {
        let result = commands::add::run(&mut self.inventory, record);
        self.mutated(result)
    }

    pub fn remove(&mut self, key: &str) -> Result<CmdResult> {
        let result = commands::remove::run(&mut self.inventory, key);
        self.mutated(result)
    }

    pub fn edit(&mut self, key: &str, field: Field, value: &str) -> Result<CmdResult> {
        let result = commands::edit::run(&mut self.inventory, key, field, value);
        self.mutated(result)
    }

    pub fn add_pictures(
        &mut self,
        key: &str,
        files: &[PathBuf],
        importer: &dyn PictureImporter,
    ) -> Result<CmdResult> {
        let result =
            commands::pictures::add(&self.store, &mut self.inventory, key, files, importer)?;
        if !result.attached_pictures.is_empty() {
            self.dirty = true;
        }
        Ok(result)
    }

    pub fn show_pictures(&self, key: &str) -> Result<CmdResult> {
        commands::pictures::show(&self.store, &self.inventory, key)
    }

    pub fn clean_pictures(&self) -> Result<CmdResult> {
        commands::pictures::clean(&self.store, &self.inventory)
    }

    /// Saves the inventory if any command changed it. Returns whether a
    /// save happened.
    pub fn finish(self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        self.store.save(&self.inventory)?;
        Ok(true)
    }
}
