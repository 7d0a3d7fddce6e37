use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;

/// Removes the item at `key` and echoes its line so it can be re-added.
pub fn run(inventory: &mut Inventory, key: &str) -> Result<CmdResult> {
    let line = inventory.require(key)?.line;
    let removed = inventory.remove(line)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("The following entry has been removed:"));
    result.add_message(CmdMessage::info(inventory.serialize(&removed)));
    result.add_message(CmdMessage::info(
        "If this was a mistake, re-add the item by using the line above.",
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Markers;

    #[test]
    fn removes_by_alias() {
        let mut inv = Inventory::from_text("(1) *saw saw\n(2) *axe axe", Markers::default());
        let result = run(&mut inv, "saw").unwrap();
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.items()[0].line, 1);
        assert_eq!(result.messages[1].content, "(1) *saw saw");
    }

    #[test]
    fn missing_item_leaves_inventory_alone() {
        let mut inv = Inventory::from_text("(1) *saw saw", Markers::default());
        assert!(run(&mut inv, "5").is_err());
        assert_eq!(inv.len(), 1);
    }
}
