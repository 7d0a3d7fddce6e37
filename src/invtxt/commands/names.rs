use crate::commands::CmdResult;
use crate::inventory::Inventory;

pub fn categories(inventory: &Inventory) -> CmdResult {
    CmdResult::default().with_names(inventory.categories())
}

pub fn tags(inventory: &Inventory) -> CmdResult {
    CmdResult::default().with_names(inventory.tags())
}

pub fn aliases(inventory: &Inventory) -> CmdResult {
    CmdResult::default().with_names(inventory.aliases())
}
