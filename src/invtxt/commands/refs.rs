use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;

/// Items referenced by the item at `key`. References that resolve to no
/// item are reported and skipped.
pub fn run(inventory: &Inventory, key: &str) -> Result<CmdResult> {
    let item = inventory.require(key)?;
    let found = inventory.referenced_by(item);
    let mut result = CmdResult::default().with_listed_items(found, inventory.len());

    for reference in item.refs() {
        if inventory.get(reference).is_none() {
            result.add_message(CmdMessage::warning(format!(
                "Reference {} does not match any item",
                reference
            )));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvError;
    use crate::model::Markers;

    fn inventory() -> Inventory {
        Inventory::from_text(
            "*drill cordless drill -> @tools *bits *charger\n*bits drill bits\n(2) screws",
            Markers::default(),
        )
    }

    #[test]
    fn lists_referenced_items() {
        let result = run(&inventory(), "drill").unwrap();
        assert_eq!(result.listed_items.len(), 1);
        assert_eq!(result.listed_items[0].alias.as_deref(), Some("*bits"));
        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].content.contains("*charger"));
    }

    #[test]
    fn works_with_line_numbers() {
        let result = run(&inventory(), "1").unwrap();
        assert_eq!(result.listed_items[0].line, 2);
    }

    #[test]
    fn unknown_item_is_an_error() {
        assert!(matches!(
            run(&inventory(), "saw"),
            Err(InvError::ItemNotFound(_))
        ));
    }
}
