use crate::commands::{CmdMessage, CmdResult};
use crate::error::{InvError, Result};
use crate::inventory::Inventory;
use crate::pictures::PictureImporter;
use crate::store::{InventoryStore, StorageBackend};
use std::path::PathBuf;

/// Imports each file and attaches the new picture tokens to the item at
/// `key`. A file that fails to import is reported and skipped.
pub fn add<B: StorageBackend>(
    store: &InventoryStore<B>,
    inventory: &mut Inventory,
    key: &str,
    files: &[PathBuf],
    importer: &dyn PictureImporter,
) -> Result<CmdResult> {
    inventory.require(key)?;
    if files.is_empty() {
        return Err(InvError::Picture("No picture files specified".to_string()));
    }

    let mut result = CmdResult::default();
    let mut tokens = Vec::new();
    for file in files {
        match store.import_picture(importer, file) {
            Ok(token) => {
                result.add_message(CmdMessage::success(format!(
                    "Imported {} as {}",
                    file.display(),
                    token
                )));
                tokens.push(token);
            }
            Err(e) => {
                result.add_message(CmdMessage::error(format!(
                    "{} ({} skipped)",
                    e,
                    file.display()
                )));
            }
        }
    }

    if !tokens.is_empty() {
        let markers = inventory.markers().clone();
        inventory.require_mut(key)?.append_meta(&tokens, &markers);
    }
    result.attached_pictures = tokens;
    Ok(result)
}

/// Paths of the pictures attached to the item at `key`.
pub fn show<B: StorageBackend>(
    store: &InventoryStore<B>,
    inventory: &Inventory,
    key: &str,
) -> Result<CmdResult> {
    let item = inventory.require(key)?;
    if item.pics().is_empty() {
        return Err(InvError::Picture(
            "Item has no associated pictures".to_string(),
        ));
    }

    let paths = item
        .pics()
        .iter()
        .filter_map(|token| store.picture_path(token))
        .collect();
    Ok(CmdResult::default().with_picture_paths(paths))
}

/// Moves pictures no item references into the garbage directory.
pub fn clean<B: StorageBackend>(
    store: &InventoryStore<B>,
    inventory: &Inventory,
) -> Result<CmdResult> {
    let report = store.clean_pictures(inventory)?;
    let mut result = CmdResult::default();

    match report.garbage_dir {
        None => result.add_message(CmdMessage::success("No orphaned pictures found")),
        Some(dir) => {
            result.add_message(CmdMessage::warning(format!(
                "{} orphaned picture(s) moved to {}. Please check and delete them!",
                report.moved.len(),
                dir.display()
            )));
            for name in report.moved {
                result.add_message(CmdMessage::info(format!("  - {}", name)));
            }
        }
    }
    Ok(result)
}
