use colored::Colorize;
use invtxt::codec;
use invtxt::commands::{CmdMessage, MessageLevel};
use invtxt::model::{Item, Markers};
use unicode_width::UnicodeWidthStr;

/// Column the quantity is aligned to in the pretty listing.
const QUANTITY_COLUMN: usize = 30;

#[derive(Debug, Clone, Copy)]
pub struct ListStyle {
    /// Group by category (items without one first). Display only.
    pub sorted: bool,
    pub pretty: bool,
}

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_names(names: &[String]) {
    if !names.is_empty() {
        println!("{}", names.join(" "));
    }
}

pub fn print_items(items: &[Item], total: usize, markers: &Markers, style: ListStyle) {
    for entry in format_items(items, total, markers, style) {
        println!("{}", entry);
    }
    println!("--");
    println!("{} of {} items shown", items.len(), total);
}

fn format_items(items: &[Item], total: usize, markers: &Markers, style: ListStyle) -> Vec<String> {
    let mut items: Vec<&Item> = items.iter().collect();
    if style.sorted {
        items.sort_by(|a, b| a.category().unwrap_or("").cmp(b.category().unwrap_or("")));
    }

    // Line numbers never exceed the inventory size.
    let width = total.max(1).to_string().len();
    items
        .into_iter()
        .map(|item| {
            if style.pretty {
                format_pretty(item, width)
            } else {
                format!(
                    "{:0width$} {}",
                    item.line,
                    codec::serialize(item, markers),
                    width = width
                )
            }
        })
        .collect()
}

/// Alias and quantity on the first row, then text, then metadata, indented
/// under the line number. Short text without an alias takes the first row.
fn format_pretty(item: &Item, width: usize) -> String {
    let number = format!("{:0width$} ", item.line, width = width);
    let indent = " ".repeat(width + 1);

    let quantity = item.quantity_label().map(|label| {
        if item.is_deficit() {
            label.bold().red().to_string()
        } else {
            label.bold().green().to_string()
        }
    });
    let text = item
        .text
        .as_deref()
        .map(codec::collapse_whitespace)
        .filter(|t| !t.is_empty());

    let (mut head, head_width, text_in_head) = match (&item.alias, &text) {
        (Some(alias), _) => (alias.bold().yellow().to_string(), alias.width(), false),
        (None, Some(t)) if t.width() <= QUANTITY_COLUMN => (t.clone(), t.width(), true),
        _ => (String::new(), 0, false),
    };
    if let Some(quantity) = &quantity {
        let pad = QUANTITY_COLUMN.saturating_sub(head_width).max(1);
        head.push_str(&" ".repeat(pad));
        head.push_str(quantity);
    }

    let mut rows = Vec::new();
    if !head.is_empty() {
        rows.push(head);
    }
    if !text_in_head {
        rows.extend(text);
    }
    if item.has_meta_tokens() {
        rows.push(format_meta(item));
    }

    format!(
        "{}{}",
        number.bold(),
        rows.join(&format!("\n{}", indent))
    )
}

fn format_meta(item: &Item) -> String {
    let mut tokens: Vec<String> = Vec::new();
    tokens.extend(item.category().map(|c| c.bold().cyan().to_string()));
    tokens.extend(item.tags().iter().map(|t| t.bold().magenta().to_string()));
    tokens.extend(item.refs().iter().map(|r| r.yellow().to_string()));
    tokens.extend(item.pics().iter().map(|p| p.bold().blue().to_string()));
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use invtxt::inventory::Inventory;

    const PLAIN: ListStyle = ListStyle {
        sorted: false,
        pretty: false,
    };

    fn inventory(text: &str) -> Inventory {
        Inventory::from_text(text, Markers::default())
    }

    #[test]
    fn plain_lines_are_zero_padded() {
        let text = (1..=10)
            .map(|i| format!("item {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let inv = inventory(&text);
        let lines = format_items(inv.items(), inv.len(), inv.markers(), PLAIN);
        assert_eq!(lines[0], "01 item 1");
        assert_eq!(lines[9], "10 item 10");
    }

    #[test]
    fn sorted_groups_by_category() {
        let inv = inventory("saw -> @tools\nmug -> @kitchen\nloose thing");
        let style = ListStyle {
            sorted: true,
            pretty: false,
        };
        let lines = format_items(inv.items(), inv.len(), inv.markers(), style);
        assert_eq!(lines, ["3 loose thing", "2 mug -> @kitchen", "1 saw -> @tools"]);
    }

    #[test]
    fn pretty_layout() {
        colored::control::set_override(false);
        let inv = inventory("(2/5) *widget small screws -> @hardware +3\n(1) mug");
        let style = ListStyle {
            sorted: false,
            pretty: true,
        };
        let lines = format_items(inv.items(), inv.len(), inv.markers(), style);
        assert_eq!(
            lines[0],
            format!(
                "1 *widget{}(2/5)\n  small screws\n  @hardware +3",
                " ".repeat(23)
            )
        );
        assert_eq!(lines[1], format!("2 mug{}(1)", " ".repeat(27)));
    }
}
