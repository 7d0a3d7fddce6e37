use crate::codec;
use crate::commands::{CmdMessage, CmdResult, UNSET};
use crate::error::{InvError, Result};
use crate::inventory::Inventory;

/// The part of a record an edit replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Amount,
    Required,
    Alias,
    Text,
    Meta,
}

/// A new amount: absolute (`5`) or relative to the current one (`+2`, `-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountChange {
    Set(u32),
    Add(i64),
}

impl AmountChange {
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || InvError::InvalidNumber(value.to_string());
        if value.starts_with('+') || value.starts_with('-') {
            value.parse::<i64>().map(AmountChange::Add).map_err(|_| invalid())
        } else {
            value.parse::<u32>().map(AmountChange::Set).map_err(|_| invalid())
        }
    }

    /// Applies the change; an unset amount counts as zero and the result
    /// never drops below zero.
    pub fn apply(self, current: Option<u32>) -> u32 {
        match self {
            AmountChange::Set(n) => n,
            AmountChange::Add(delta) => {
                let next = (current.unwrap_or(0) as i64).saturating_add(delta);
                next.clamp(0, u32::MAX as i64) as u32
            }
        }
    }
}

fn parse_count(value: &str) -> Result<u32> {
    value
        .parse()
        .map_err(|_| InvError::InvalidNumber(value.to_string()))
}

/// Sets one field of the item at `key`. The literal value `unset` clears it.
pub fn run(inventory: &mut Inventory, key: &str, field: Field, value: &str) -> Result<CmdResult> {
    let markers = inventory.markers().clone();
    let unset = value == UNSET;

    // Validate against the whole inventory before taking the item mutably.
    let alias = match field {
        Field::Alias if !unset => {
            let alias = markers.aliased(value.trim());
            if codec::find_token(&alias, markers.alias) != Some(0..alias.len()) {
                return Err(InvError::InvalidAlias(alias));
            }
            let current = inventory.require(key)?.alias.clone();
            if current.as_deref() != Some(alias.as_str()) && !inventory.alias_free(&alias) {
                return Err(InvError::AliasTaken(alias));
            }
            Some(alias)
        }
        _ => None,
    };

    let item = inventory.require_mut(key)?;
    match field {
        Field::Amount => {
            item.amount = if unset {
                None
            } else {
                Some(AmountChange::parse(value)?.apply(item.amount))
            };
        }
        Field::Required => {
            item.required = if unset { None } else { Some(parse_count(value)?) };
        }
        Field::Alias => item.alias = alias,
        Field::Text => {
            item.text = if unset { None } else { Some(value.to_string()) };
        }
        Field::Meta => {
            item.set_meta(if unset { None } else { Some(value.to_string()) }, &markers);
        }
    }

    let line = item.line;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Item updated ({}): {}",
        line,
        codec::serialize(item, &markers)
    )));
    Ok(result)
}
