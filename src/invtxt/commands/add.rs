use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;

/// Parses `record` as an inventory line and appends it.
pub fn run(inventory: &mut Inventory, record: &str) -> Result<CmdResult> {
    let item = inventory.parse(record);
    let line = inventory.add(item)?.line;
    let added = inventory.serialize(&inventory.items()[line - 1]);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Item added ({}): {}",
        line, added
    )));
    Ok(result)
}
