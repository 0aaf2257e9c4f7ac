//! Per-item expand/collapse flags for the timeline.
//!
//! Keys combine the entry kind with its numeric id because ids are only
//! unique within one kind: `experience:5` and `certification:5` are
//! independent flags.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FolioError;

/// Which source collection a timeline entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Experience,
    Certification,
}

impl EntryKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Experience => "experience",
            Self::Certification => "certification",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "experience" | "exp" => Ok(Self::Experience),
            "certification" | "cert" => Ok(Self::Certification),
            _ => Err(FolioError::InvalidExpandKey {
                input: s.to_string(),
                reason: "kind must be 'experience' or 'certification'",
            }),
        }
    }
}

/// Composite registry key. Renders as `kind:id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExpandKey {
    pub kind: EntryKind,
    pub id: u32,
}

impl ExpandKey {
    #[must_use]
    pub const fn new(kind: EntryKind, id: u32) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for ExpandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl FromStr for ExpandKey {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((kind, id)) = s.split_once(':') else {
            return Err(FolioError::InvalidExpandKey {
                input: s.to_string(),
                reason: "expected <kind>:<id>",
            });
        };
        let kind = kind.parse::<EntryKind>().map_err(|_| FolioError::InvalidExpandKey {
            input: s.to_string(),
            reason: "kind must be 'experience' or 'certification'",
        })?;
        let id = id.trim().parse::<u32>().map_err(|_| FolioError::InvalidExpandKey {
            input: s.to_string(),
            reason: "id must be a non-negative integer",
        })?;
        Ok(Self { kind, id })
    }
}

/// Expand flags keyed by [`ExpandKey`]. Unseen keys read as collapsed.
///
/// Transitions return a new registry. Entries are never removed once created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandRegistry {
    flags: BTreeMap<ExpandKey, bool>,
}

impl ExpandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip exactly the flag for `(kind, id)`.
    #[must_use]
    pub fn toggle_expand(&self, kind: EntryKind, id: u32) -> Self {
        self.toggle_key(ExpandKey::new(kind, id))
    }

    #[must_use]
    pub fn toggle_key(&self, key: ExpandKey) -> Self {
        let mut flags = self.flags.clone();
        let flag = flags.entry(key).or_insert(false);
        *flag = !*flag;
        Self { flags }
    }

    #[must_use]
    pub fn is_expanded(&self, kind: EntryKind, id: u32) -> bool {
        self.is_key_expanded(ExpandKey::new(kind, id))
    }

    #[must_use]
    pub fn is_key_expanded(&self, key: ExpandKey) -> bool {
        self.flags.get(&key).copied().unwrap_or(false)
    }

    /// Keys currently expanded, in key order.
    pub fn expanded_keys(&self) -> impl Iterator<Item = ExpandKey> + '_ {
        self.flags
            .iter()
            .filter_map(|(key, &open)| open.then_some(*key))
    }

    /// Number of keys ever toggled, expanded or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
