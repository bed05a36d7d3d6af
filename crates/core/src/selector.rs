//! Element selectors
//!
//! Supports the three shapes needed to look up a single control:
//! `tag#id`, `#id` and a bare `tag`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Selector parse failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("invalid character {ch:?} in selector '{selector}'")]
    InvalidChar { selector: String, ch: char },

    #[error("missing id after '#' in selector '{0}'")]
    MissingId(String),
}

/// Parsed element selector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    /// Tag name, lowercased (None matches any tag)
    tag: Option<String>,
    /// Element id (None matches any id)
    id: Option<String>,
}

impl Selector {
    /// Parse a selector string
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let selector = input.trim();
        if selector.is_empty() {
            return Err(SelectorError::Empty);
        }

        let (tag, id) = match selector.split_once('#') {
            Some((tag, id)) => {
                if id.is_empty() {
                    return Err(SelectorError::MissingId(selector.to_string()));
                }
                (tag, Some(id))
            }
            None => (selector, None),
        };

        for part in [tag].into_iter().chain(id) {
            if let Some(ch) = part.chars().find(|c| !is_name_char(*c)) {
                return Err(SelectorError::InvalidChar {
                    selector: selector.to_string(),
                    ch,
                });
            }
        }

        Ok(Self {
            tag: (!tag.is_empty()).then(|| tag.to_ascii_lowercase()),
            id: id.map(str::to_string),
        })
    }

    /// Tag name this selector requires, if any
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Id this selector requires, if any
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Check whether an element with this tag and id matches
    ///
    /// Tags compare case-insensitively, ids exactly.
    pub fn matches(&self, tag: &str, id: &str) -> bool {
        let tag_ok = self
            .tag
            .as_deref()
            .map_or(true, |t| t.eq_ignore_ascii_case(tag));
        let id_ok = self.id.as_deref().map_or(true, |i| i == id);
        tag_ok && id_ok
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{}", tag)?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }
        Ok(())
    }
}
