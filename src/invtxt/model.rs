use serde::{Deserialize, Serialize};

/// Marker characters and the metadata separator of the record format.
///
/// Every marker prefixes one token class; a token is the marker followed by
/// one or more word characters (`[A-Za-z0-9_]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub category: char,
    pub tag: char,
    /// Used both for an item's own alias and for references to other items.
    pub alias: char,
    pub picture: char,
    pub separator: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            category: '@',
            tag: '#',
            alias: '*',
            picture: '+',
            separator: "->".to_string(),
        }
    }
}

impl Markers {
    /// Prepends the alias marker unless `name` already starts with it.
    pub fn aliased(&self, name: &str) -> String {
        if name.starts_with(self.alias) {
            name.to_string()
        } else {
            format!("{}{}", self.alias, name)
        }
    }

    pub fn picture_token(&self, id: &str) -> String {
        format!("{}{}", self.picture, id)
    }

    /// Picture id for a token such as `+12`, if it carries the picture marker.
    pub fn picture_id<'a>(&self, token: &'a str) -> Option<&'a str> {
        token.strip_prefix(self.picture)
    }
}

/// One inventory record.
///
/// `category`, `tags`, `refs` and `pics` are derived from `meta` and are kept
/// in sync by [`Item::set_meta`]. The raw `meta` string is stored verbatim so
/// that text which is not a token survives until the next save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub amount: Option<u32>,
    pub required: Option<u32>,
    pub alias: Option<String>,
    pub text: Option<String>,
    pub(crate) meta: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) tags: Vec<String>,
    pub(crate) refs: Vec<String>,
    pub(crate) pics: Vec<String>,
    /// 1-based position in the current listing. Not persisted.
    pub line: usize,
}

impl Item {
    pub fn meta(&self) -> Option<&str> {
        self.meta.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn refs(&self) -> &[String] {
        &self.refs
    }

    pub fn pics(&self) -> &[String] {
        &self.pics
    }

    /// Replaces the metadata string and re-derives category, tags, refs and pics.
    pub fn set_meta(&mut self, meta: Option<String>, markers: &Markers) {
        let tokens = crate::codec::MetaTokens::scan(meta.as_deref().unwrap_or(""), markers);
        self.category = tokens.categories.into_iter().next();
        self.tags = tokens.tags;
        self.refs = tokens.refs;
        self.pics = tokens.pics;
        self.meta = meta;
    }

    /// Appends tokens to the metadata string, keeping whatever is there.
    pub fn append_meta(&mut self, tokens: &[String], markers: &Markers) {
        if tokens.is_empty() {
            return;
        }
        let meta = match self.meta.take() {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), tokens.join(" "))
            }
            _ => tokens.join(" "),
        };
        self.set_meta(Some(meta), markers);
    }

    /// Amount used for display and serialization: an item with a required
    /// amount but no amount on hand counts as one.
    pub fn effective_amount(&self) -> Option<u32> {
        match (self.amount, self.required) {
            (None, Some(_)) => Some(1),
            (amount, _) => amount,
        }
    }

    /// True when a required amount is set and the amount on hand is below it.
    /// Uses the effective amount, so the answer does not change across a save.
    pub fn is_deficit(&self) -> bool {
        match (self.effective_amount(), self.required) {
            (Some(amount), Some(required)) => amount < required,
            _ => false,
        }
    }

    /// Quantity group as written in the file, e.g. `(2/5)`.
    pub fn quantity_label(&self) -> Option<String> {
        match (self.amount, self.required) {
            (None, None) => None,
            (Some(n), None) => Some(format!("({})", n)),
            (None, Some(m)) => Some(format!("(1/{})", m)),
            (Some(n), Some(m)) => Some(format!("({}/{})", n, m)),
        }
    }

    /// True when the derived metadata holds at least one token.
    pub fn has_meta_tokens(&self) -> bool {
        self.category.is_some()
            || !self.tags.is_empty()
            || !self.refs.is_empty()
            || !self.pics.is_empty()
    }
}
