//! # Record Codec
//!
//! Turns one inventory line into an [`Item`] and back. The format is
//!
//! ```text
//! [(<amount>|<amount>/<required>)] [*alias] [free text] [ -> @category #tag... *ref... +pic...]
//! ```
//!
//! Parsing never fails. Each stage consumes an optional prefix of what is left
//! and anything it does not recognise stays in the free text (or in the raw
//! metadata string), so a hand-edited file always loads.
//!
//! The stages are plain functions over `&str` so they can be tested on their
//! own:
//!
//! 1. [`split_meta`]: cut the line at the first separator token.
//! 2. [`parse_quantity`]: a leading `(N)` or `(N/M)` group.
//! 3. [`take_alias`]: the leftmost alias token in the remainder.
//! 4. what is left is the text.
//! 5. [`MetaTokens::scan`]: all marker tokens of the metadata string.
//!
//! ## Normalization
//!
//! [`serialize`] writes the metadata section back as category, tags, refs and
//! pics, in that order. Only the first category survives and anything in the
//! metadata string that is not a token is dropped. A line is therefore stable
//! after its first save, but not necessarily before.
//!
//! ## Known ambiguity
//!
//! The alias is the leftmost alias-marker token *anywhere* before the
//! separator, so free text such as `size *2 screws` on an item without an
//! alias yields the alias `*2`. Existing inventory files rely on this scan, so
//! it is kept as is.

use crate::model::{Item, Markers};
use std::ops::Range;

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Byte length of the token starting at `start`, if `input[start..]` is the
/// marker followed by at least one word character.
fn token_len_at(input: &str, start: usize, marker: char) -> Option<usize> {
    let rest = &input[start..];
    let after_marker = rest.strip_prefix(marker)?;
    let word_len: usize = after_marker
        .chars()
        .take_while(|c| is_word_char(*c))
        .map(char::len_utf8)
        .sum();
    if word_len == 0 {
        None
    } else {
        Some(marker.len_utf8() + word_len)
    }
}

/// Byte range of the leftmost `<marker><word chars>` token in `input`.
pub fn find_token(input: &str, marker: char) -> Option<Range<usize>> {
    input
        .char_indices()
        .filter(|(_, c)| *c == marker)
        .find_map(|(start, _)| token_len_at(input, start, marker).map(|len| start..start + len))
}

/// All non-overlapping `<marker><word chars>` tokens, left to right.
pub fn scan_tokens(input: &str, marker: char) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    while let Some(range) = find_token(&input[offset..], marker) {
        let start = offset + range.start;
        let end = offset + range.end;
        tokens.push(&input[start..end]);
        offset = end;
    }
    tokens
}

/// Collapses all whitespace runs into single spaces and trims both ends.
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits a collapsed line at the first separator that stands as its own
/// word. Returns the part before it and the raw metadata after it.
///
/// A separator at the very start of the line counts, so an item that only
/// carries metadata survives a round trip.
pub fn split_meta<'a>(line: &'a str, separator: &str) -> (&'a str, Option<&'a str>) {
    if separator.is_empty() {
        return (line, None);
    }
    for (start, _) in line.match_indices(separator) {
        let end = start + separator.len();
        let opens_word = start == 0 || line[..start].ends_with(' ');
        let closes_word = line[end..].starts_with(' ');
        if opens_word && closes_word {
            return (line[..start].trim_end(), Some(line[end..].trim()));
        }
    }
    (line, None)
}

/// Amount and required amount read from a leading quantity group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity {
    pub amount: u32,
    pub required: Option<u32>,
}

fn take_number(input: &str) -> Option<(u32, &str)> {
    let digits = input.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let value = input[..digits].parse().ok()?;
    Some((value, &input[digits..]))
}

/// Reads `(N)` or `(N/M)` at the very start of `input`. Returns the quantity
/// and the unconsumed remainder; a malformed group is not consumed.
pub fn parse_quantity(input: &str) -> Option<(Quantity, &str)> {
    let rest = input.strip_prefix('(')?;
    let (amount, rest) = take_number(rest)?;
    let (required, rest) = match rest.strip_prefix('/') {
        Some(after_slash) => {
            let (required, rest) = take_number(after_slash)?;
            (Some(required), rest)
        }
        None => (None, rest),
    };
    let rest = rest.strip_prefix(')')?;
    Some((Quantity { amount, required }, rest))
}

/// Removes the leftmost alias token from `input`. Returns the alias (with
/// its marker) and the remaining text with the gap closed.
pub fn take_alias(input: &str, marker: char) -> (Option<String>, String) {
    let input = input.trim();
    match find_token(input, marker) {
        Some(range) => {
            let before = input[..range.start].trim_end();
            let after = input[range.end..].trim_start();
            let text = match (before.is_empty(), after.is_empty()) {
                (true, _) => after.to_string(),
                (false, true) => before.to_string(),
                (false, false) => format!("{} {}", before, after),
            };
            (Some(input[range].to_string()), text)
        }
        None => (None, input.to_string()),
    }
}

/// Tokens found in a metadata string, grouped by marker in textual order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaTokens {
    /// Every category token; only the first one is kept on an [`Item`].
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub refs: Vec<String>,
    pub pics: Vec<String>,
}

impl MetaTokens {
    pub fn scan(meta: &str, markers: &Markers) -> Self {
        let owned = |marker: char| -> Vec<String> {
            scan_tokens(meta, marker)
                .into_iter()
                .map(str::to_string)
                .collect()
        };
        Self {
            categories: owned(markers.category),
            tags: owned(markers.tag),
            refs: owned(markers.alias),
            pics: owned(markers.picture),
        }
    }
}

/// Parses one inventory line. Never fails.
pub fn parse(line: &str, markers: &Markers) -> Item {
    let line = collapse_whitespace(line);
    let (body, meta) = split_meta(&line, &markers.separator);

    let (quantity, rest) = match parse_quantity(body) {
        Some((quantity, rest)) => (Some(quantity), rest),
        None => (None, body),
    };

    let (alias, text) = take_alias(rest, markers.alias);

    let mut item = Item {
        amount: quantity.map(|q| q.amount),
        required: quantity.and_then(|q| q.required),
        alias,
        text: if text.is_empty() { None } else { Some(text) },
        ..Default::default()
    };
    item.set_meta(meta.map(str::to_string), markers);
    item
}

/// Writes an item back in canonical form. The result has no leading or
/// trailing whitespace and no line breaks.
pub fn serialize(item: &Item, markers: &Markers) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(quantity) = item.quantity_label() {
        parts.push(quantity);
    }
    if let Some(alias) = item.alias.as_deref().map(str::trim) {
        if !alias.is_empty() {
            parts.push(alias.to_string());
        }
    }
    if let Some(text) = item.text.as_deref().map(collapse_whitespace) {
        if !text.is_empty() {
            parts.push(text);
        }
    }

    if item.has_meta_tokens() {
        parts.push(markers.separator.clone());
        parts.extend(item.category().map(str::to_string));
        parts.extend(item.tags().iter().cloned());
        parts.extend(item.refs().iter().cloned());
        parts.extend(item.pics().iter().cloned());
    }

    parts.join(" ")
}

/// Category tokens in the item's metadata that will not survive a save.
pub fn dropped_categories(item: &Item, markers: &Markers) -> Vec<String> {
    let meta = item.meta().unwrap_or("");
    scan_tokens(meta, markers.category)
        .into_iter()
        .skip(1)
        .map(str::to_string)
        .collect()
}
