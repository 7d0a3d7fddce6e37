use crate::commands::CmdResult;
use crate::inventory::Inventory;

/// All items, or those whose line contains `filter` (case-insensitive).
pub fn run(inventory: &Inventory, filter: Option<&str>) -> CmdResult {
    let total = inventory.len();
    match filter {
        Some(needle) => CmdResult::default().with_listed_items(inventory.filter(needle), total),
        None => CmdResult::default().with_listed_items(inventory.items(), total),
    }
}

/// Items whose amount is below their required amount.
pub fn deficit(inventory: &Inventory) -> CmdResult {
    CmdResult::default().with_listed_items(inventory.filter_deficit(), inventory.len())
}
