use super::backend::StorageBackend;
use crate::error::{InvError, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

const INVENTORY_FILE: &str = "inv.txt";
const PICTURE_DIR: &str = "pics";
const GARBAGE_DIR: &str = "garbage";
const BACKUP_SUFFIX: &str = ".bak";

/// Filesystem layout rooted at the inventory directory:
///
/// ```text
/// <root>/
/// ├── inv.txt        # one record per line
/// ├── inv.txt.bak    # only while a save is in progress
/// ├── pics/          # <id>.jpg
/// └── garbage/       # orphaned pictures awaiting review
/// ```
pub struct FsBackend {
    root: PathBuf,
    inventory_file: PathBuf,
    picture_dir: PathBuf,
    garbage_dir: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            inventory_file: root.join(INVENTORY_FILE),
            picture_dir: root.join(PICTURE_DIR),
            garbage_dir: root.join(GARBAGE_DIR),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn inventory_file(&self) -> &Path {
        &self.inventory_file
    }

    pub fn picture_dir(&self) -> &Path {
        &self.picture_dir
    }

    pub fn backup_file(&self) -> PathBuf {
        let mut name: OsString = self.inventory_file.as_os_str().to_owned();
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(InvError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn init_layout(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(InvError::Store(format!(
                "Inventory directory {} not found",
                self.root.display()
            )));
        }
        self.ensure_dir(&self.picture_dir)?;
        if !self.inventory_file.exists() {
            fs::write(&self.inventory_file, "").map_err(InvError::Io)?;
        }
        Ok(())
    }

    fn read_inventory(&self) -> Result<String> {
        fs::read_to_string(&self.inventory_file).map_err(InvError::Io)
    }

    fn backup_inventory(&self) -> Result<()> {
        fs::rename(&self.inventory_file, self.backup_file()).map_err(InvError::Io)
    }

    fn write_inventory(&self, content: &str) -> Result<()> {
        fs::write(&self.inventory_file, content).map_err(InvError::Io)
    }

    fn restore_backup(&self) -> Result<()> {
        fs::rename(self.backup_file(), &self.inventory_file).map_err(InvError::Io)
    }

    fn discard_backup(&self) -> Result<()> {
        fs::remove_file(self.backup_file()).map_err(InvError::Io)
    }

    fn list_pictures(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.picture_dir).map_err(InvError::Io)? {
            let entry = entry.map_err(InvError::Io)?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn picture_path(&self, file_name: &str) -> PathBuf {
        self.picture_dir.join(file_name)
    }

    fn confirm_picture(&self, file_name: &str) -> Result<()> {
        if self.picture_path(file_name).is_file() {
            Ok(())
        } else {
            Err(InvError::Picture(format!(
                "{} was not created by the import",
                file_name
            )))
        }
    }

    fn garbage_path(&self) -> PathBuf {
        self.garbage_dir.clone()
    }

    fn garbage_exists(&self) -> bool {
        self.garbage_dir.exists()
    }

    fn create_garbage(&self) -> Result<()> {
        fs::create_dir(&self.garbage_dir).map_err(InvError::Io)
    }

    fn move_to_garbage(&self, file_name: &str) -> Result<()> {
        fs::rename(
            self.picture_dir.join(file_name),
            self.garbage_dir.join(file_name),
        )
        .map_err(InvError::Io)
    }
}
