//! # Storage Layer
//!
//! [`InventoryStore`] loads and saves the inventory file and keeps the
//! picture directory in step with the items that reference it. Raw I/O goes
//! through the [`StorageBackend`] trait:
//!
//! - [`fs_backend::FsBackend`]: production, rooted at the inventory directory.
//! - [`mem_backend::MemBackend`]: in-memory, for tests. Can simulate write
//!   failures.
//!
//! ## Saving
//!
//! A save renames the inventory file to a backup, writes the new contents and
//! then deletes the backup. If the write fails the backup is renamed back, so
//! the file is never left missing or half written. There is no locking: one
//! process, one run.
//!
//! ## Pictures
//!
//! Pictures are files named `<id>.jpg`, referenced from an item's metadata
//! by the picture marker plus the id (`+12`). New ids take the first gap in
//! 1, 2, 3, ... so ids freed by a clean are reused.

use crate::codec;
use crate::error::{InvError, Result};
use crate::inventory::Inventory;
use crate::model::Markers;
use crate::pictures::PictureImporter;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;

const PICTURE_EXT: &str = ".jpg";

/// Result of moving orphaned pictures into quarantine.
#[derive(Debug, Default)]
pub struct CleanReport {
    pub moved: Vec<String>,
    pub garbage_dir: Option<PathBuf>,
}

pub struct InventoryStore<B: StorageBackend> {
    backend: B,
    markers: Markers,
}

impl<B: StorageBackend> InventoryStore<B> {
    pub fn new(backend: B, markers: Markers) -> Self {
        Self { backend, markers }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn init(&self) -> Result<()> {
        self.backend.init_layout()
    }

    /// Reads and parses the inventory file. Lines whose metadata holds more
    /// than one category are reported, since the extra ones are dropped on
    /// the next save.
    pub fn load(&self) -> Result<Inventory> {
        let text = self.backend.read_inventory()?;
        let inventory = Inventory::from_text(&text, self.markers.clone());

        for item in inventory.items() {
            let dropped = codec::dropped_categories(item, &self.markers);
            if !dropped.is_empty() {
                warn!(
                    line = item.line,
                    kept = item.category().unwrap_or_default(),
                    dropped = %dropped.join(" "),
                    "item has more than one category, only the first is kept"
                );
            }
        }

        debug!(items = inventory.len(), "inventory loaded");
        Ok(inventory)
    }

    /// Writes the inventory back: backup, write, delete backup. A failed
    /// write restores the backup before the error is returned. Failing to
    /// delete the backup afterwards is only logged.
    pub fn save(&self, inventory: &Inventory) -> Result<()> {
        let content = inventory.to_text();

        self.backend
            .backup_inventory()
            .map_err(|e| InvError::SaveFailed(format!("could not create backup: {}", e)))?;

        if let Err(write_err) = self.backend.write_inventory(&content) {
            return match self.backend.restore_backup() {
                Ok(()) => Err(InvError::SaveFailed(format!(
                    "{} (previous contents restored)",
                    write_err
                ))),
                Err(restore_err) => Err(InvError::SaveFailed(format!(
                    "{}; restoring the backup also failed: {}",
                    write_err, restore_err
                ))),
            };
        }

        // The new contents are already in place.
        if let Err(e) = self.backend.discard_backup() {
            warn!(error = %e, "inventory saved, but the backup file could not be removed");
        }

        debug!(lines = inventory.len(), "inventory saved");
        Ok(())
    }

    /// Smallest positive id with no `<id>.*` file in the picture directory.
    pub fn allocate_picture_id(&self) -> Result<String> {
        let taken: BTreeSet<u64> = self
            .backend
            .list_pictures()?
            .iter()
            .filter_map(|name| Path::new(name).file_stem()?.to_str()?.parse().ok())
            .collect();

        let id = (1u64..)
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or(1);
        debug!(id, "allocated picture id");
        Ok(id.to_string())
    }

    /// File name a picture token refers to, e.g. `+12` -> `12.jpg`.
    pub fn picture_file_name(&self, token: &str) -> Option<String> {
        self.markers
            .picture_id(token)
            .map(|id| format!("{}{}", id, PICTURE_EXT))
    }

    pub fn picture_path(&self, token: &str) -> Option<PathBuf> {
        self.picture_file_name(token)
            .map(|name| self.backend.picture_path(&name))
    }

    /// Picture files that no item references.
    pub fn detect_orphan_pictures(&self, inventory: &Inventory) -> Result<BTreeSet<String>> {
        let referenced: BTreeSet<String> = inventory
            .pictures()
            .iter()
            .filter_map(|token| self.picture_file_name(token))
            .collect();

        Ok(self
            .backend
            .list_pictures()?
            .into_iter()
            .filter(|name| !referenced.contains(name))
            .collect())
    }

    /// Moves orphaned pictures into the garbage directory for review.
    ///
    /// Refuses to run while the garbage directory from a previous clean
    /// still exists. A failure part way leaves the already moved files in
    /// place; the directory itself marks that a review is due.
    pub fn clean_pictures(&self, inventory: &Inventory) -> Result<CleanReport> {
        let orphans = self.detect_orphan_pictures(inventory)?;
        if orphans.is_empty() {
            return Ok(CleanReport::default());
        }

        let garbage_dir = self.backend.garbage_path();
        if self.backend.garbage_exists() {
            return Err(InvError::GarbagePending(garbage_dir));
        }

        self.backend.create_garbage()?;
        let mut report = CleanReport {
            moved: Vec::with_capacity(orphans.len()),
            garbage_dir: Some(garbage_dir),
        };
        for name in orphans {
            self.backend.move_to_garbage(&name)?;
            debug!(picture = %name, "moved orphaned picture");
            report.moved.push(name);
        }
        Ok(report)
    }

    /// Imports one picture under a fresh id and returns its token (`+<id>`).
    pub fn import_picture(&self, importer: &dyn PictureImporter, source: &Path) -> Result<String> {
        let id = self.allocate_picture_id()?;
        let file_name = format!("{}{}", id, PICTURE_EXT);
        importer.import(source, &self.backend.picture_path(&file_name))?;
        self.backend.confirm_picture(&file_name)?;
        Ok(self.markers.picture_token(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::mem_backend::MemBackend;
    use super::*;
    use std::cell::RefCell;

    const SAMPLE: &str = "(2/5) *widget screws -> @hardware +2\nlamp -> @attic @garage";

    fn store(backend: MemBackend) -> InventoryStore<MemBackend> {
        InventoryStore::new(backend, Markers::default())
    }

    /// Records the destinations it was asked to fill; fails for sources named "bad".
    #[derive(Default)]
    struct FakeImporter {
        calls: RefCell<Vec<PathBuf>>,
    }

    impl PictureImporter for FakeImporter {
        fn import(&self, source: &Path, dest: &Path) -> Result<()> {
            if source.file_stem().and_then(|s| s.to_str()) == Some("bad") {
                return Err(InvError::Picture("bad picture".into()));
            }
            self.calls.borrow_mut().push(dest.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn load_parses_and_numbers() {
        let store = store(MemBackend::with_inventory(SAMPLE));
        let inv = store.load().unwrap();
        assert_eq!(inv.len(), 2);
        assert_eq!(inv.items()[1].line, 2);
        assert_eq!(inv.items()[1].category(), Some("@attic"));
    }

    #[test]
    fn load_without_file_fails() {
        let store = store(MemBackend::new());
        assert!(store.load().is_err());
    }

    #[test]
    fn save_normalizes_and_drops_backup() {
        let store = store(MemBackend::with_inventory(SAMPLE));
        let inv = store.load().unwrap();
        store.save(&inv).unwrap();

        assert_eq!(
            store.backend().inventory_text().unwrap(),
            "(2/5) *widget screws -> @hardware +2\nlamp -> @attic"
        );
        assert!(!store.backend().has_backup());
    }

    #[test]
    fn failed_write_restores_original() {
        let store = store(MemBackend::with_inventory(SAMPLE));
        let mut inv = store.load().unwrap();
        inv.remove(1).unwrap();

        store.backend().set_simulate_write_error(true);
        let err = store.save(&inv).unwrap_err();
        assert!(matches!(err, InvError::SaveFailed(_)));
        assert_eq!(store.backend().inventory_text().unwrap(), SAMPLE);
        assert!(!store.backend().has_backup());
    }

    #[test]
    fn leftover_backup_does_not_fail_save() {
        let store = store(MemBackend::with_inventory(SAMPLE));
        let mut inv = store.load().unwrap();
        inv.remove(1).unwrap();

        store.backend().set_simulate_discard_error(true);
        store.save(&inv).unwrap();
        assert_eq!(
            store.backend().inventory_text().unwrap(),
            "lamp -> @attic"
        );
        assert!(store.backend().has_backup());
    }

    #[test]
    fn save_without_file_fails_before_writing() {
        let store = store(MemBackend::new());
        let inv = Inventory::new(Markers::default());
        assert!(matches!(store.save(&inv), Err(InvError::SaveFailed(_))));
        assert_eq!(store.backend().inventory_text(), None);
    }

    #[test]
    fn picture_id_fills_first_gap() {
        let store = store(MemBackend::new().with_pictures(["1.jpg", "3.jpg", "4.jpg"]));
        assert_eq!(store.allocate_picture_id().unwrap(), "2");
    }

    #[test]
    fn picture_id_starts_at_one() {
        let store = store(MemBackend::new());
        assert_eq!(store.allocate_picture_id().unwrap(), "1");
    }

    #[test]
    fn picture_id_ignores_non_numeric_names() {
        let store = store(MemBackend::new().with_pictures(["1.jpg", "notes.txt", "2.jpg"]));
        assert_eq!(store.allocate_picture_id().unwrap(), "3");
    }

    #[test]
    fn orphans_are_unreferenced_files() {
        let backend = MemBackend::with_inventory("thing -> +2").with_pictures([
            "1.jpg", "2.jpg", "3.jpg",
        ]);
        let store = store(backend);
        let inv = store.load().unwrap();

        let orphans: Vec<String> = store.detect_orphan_pictures(&inv).unwrap().into_iter().collect();
        assert_eq!(orphans, ["1.jpg", "3.jpg"]);
    }

    #[test]
    fn clean_moves_orphans_and_refuses_second_run() {
        let backend = MemBackend::with_inventory("thing -> +2").with_pictures([
            "1.jpg", "2.jpg", "3.jpg",
        ]);
        let store = store(backend);
        let inv = store.load().unwrap();

        let report = store.clean_pictures(&inv).unwrap();
        assert_eq!(report.moved, ["1.jpg", "3.jpg"]);
        assert_eq!(store.backend().picture_names(), ["2.jpg"]);
        assert_eq!(store.backend().garbage_names(), ["1.jpg", "3.jpg"]);

        store.backend().confirm_picture("9.jpg").unwrap();
        assert!(matches!(
            store.clean_pictures(&inv),
            Err(InvError::GarbagePending(_))
        ));

        store.backend().clear_garbage();
        assert_eq!(store.clean_pictures(&inv).unwrap().moved, ["9.jpg"]);
    }

    #[test]
    fn clean_without_orphans_does_nothing() {
        let store = store(MemBackend::with_inventory("thing -> +1").with_pictures(["1.jpg"]));
        let inv = store.load().unwrap();
        let report = store.clean_pictures(&inv).unwrap();
        assert!(report.moved.is_empty());
        assert!(report.garbage_dir.is_none());
        assert!(!store.backend().garbage_exists());
    }

    #[test]
    fn import_allocates_distinct_ids() {
        let store = store(MemBackend::new().with_pictures(["2.jpg"]));
        let importer = FakeImporter::default();

        let first = store.import_picture(&importer, Path::new("a.png")).unwrap();
        let second = store.import_picture(&importer, Path::new("b.png")).unwrap();
        assert_eq!(first, "+1");
        assert_eq!(second, "+3");
        assert_eq!(importer.calls.borrow().len(), 2);
        assert!(importer.calls.borrow()[1].ends_with("pics/3.jpg"));
    }

    #[test]
    fn failed_import_claims_no_id() {
        let store = store(MemBackend::new());
        let importer = FakeImporter::default();
        assert!(store.import_picture(&importer, Path::new("bad.jpg")).is_err());
        assert_eq!(store.import_picture(&importer, Path::new("ok.jpg")).unwrap(), "+1");
    }

    #[test]
    fn picture_paths_follow_tokens() {
        let store = store(MemBackend::new());
        assert_eq!(store.picture_file_name("+12").as_deref(), Some("12.jpg"));
        assert_eq!(store.picture_file_name("#12"), None);
    }
}
