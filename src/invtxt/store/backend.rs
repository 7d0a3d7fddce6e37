use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::InventoryStore`] handles the "what": the save sequence, picture id
/// allocation and orphan detection.
pub trait StorageBackend {
    // --- Layout ---

    /// Verify the inventory root exists; create the picture directory and an
    /// empty inventory file if they are missing.
    fn init_layout(&self) -> Result<()>;

    // --- Inventory file ---

    fn read_inventory(&self) -> Result<String>;

    /// Rename the inventory file to its backup name.
    fn backup_inventory(&self) -> Result<()>;

    /// Write the inventory file. Called only after a successful backup.
    fn write_inventory(&self, content: &str) -> Result<()>;

    /// Move the backup back into place, replacing whatever was written.
    fn restore_backup(&self) -> Result<()>;

    fn discard_backup(&self) -> Result<()>;

    // --- Pictures ---

    /// File names in the picture directory.
    fn list_pictures(&self) -> Result<Vec<String>>;

    /// Where a picture file with this name lives (virtual for memory backends).
    fn picture_path(&self, file_name: &str) -> PathBuf;

    /// Called after an importer reported success for `file_name`.
    /// Returns Err if the picture is not actually there.
    fn confirm_picture(&self, file_name: &str) -> Result<()>;

    // --- Quarantine for orphaned pictures ---

    fn garbage_path(&self) -> PathBuf;

    fn garbage_exists(&self) -> bool;

    fn create_garbage(&self) -> Result<()>;

    fn move_to_garbage(&self, file_name: &str) -> Result<()>;
}
