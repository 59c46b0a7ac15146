use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the fixed inspection categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckItemKey {
    Tyres,
    Brakes,
    Lights,
    Oil,
    Coolant,
}

static ALL_KEYS: &[CheckItemKey] = &[
    CheckItemKey::Tyres,
    CheckItemKey::Brakes,
    CheckItemKey::Lights,
    CheckItemKey::Oil,
    CheckItemKey::Coolant,
];

impl CheckItemKey {
    /// Returns all keys in checklist order.
    pub fn all() -> &'static [CheckItemKey] {
        ALL_KEYS
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Tyres => "Tyres",
            Self::Brakes => "Brakes",
            Self::Lights => "Lights",
            Self::Oil => "Oil",
            Self::Coolant => "Coolant",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Tyres => 0,
            Self::Brakes => 1,
            Self::Lights => 2,
            Self::Oil => 3,
            Self::Coolant => 4,
        }
    }
}

#[mutants::skip]
impl fmt::Display for CheckItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pass/fail result for a single checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    #[default]
    Ok,
    Fail,
}

impl CheckStatus {
    /// Returns the opposite status.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ok => Self::Fail,
            Self::Fail => Self::Ok,
        }
    }

    /// Short label shown next to each checklist row.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Fail => "FAIL",
        }
    }
}

/// A checklist entry as sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckItem {
    pub key: CheckItemKey,
    pub status: CheckStatus,
}

/// The five inspection items, one per [`CheckItemKey`], in key order.
///
/// Entries are never added or removed; only their status changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checklist {
    items: [CheckItem; 5],
}

impl Default for Checklist {
    fn default() -> Self {
        Self::new()
    }
}

impl Checklist {
    /// Creates a checklist with every item marked [`CheckStatus::Ok`].
    pub fn new() -> Self {
        let item = |key| CheckItem {
            key,
            status: CheckStatus::Ok,
        };
        Self {
            items: [
                item(CheckItemKey::Tyres),
                item(CheckItemKey::Brakes),
                item(CheckItemKey::Lights),
                item(CheckItemKey::Oil),
                item(CheckItemKey::Coolant),
            ],
        }
    }

    /// Replaces the status of the item for `key`, leaving the others untouched.
    pub fn set_status(&mut self, key: CheckItemKey, status: CheckStatus) {
        self.items[key.index()].status = status;
    }

    /// Flips the status of the item for `key`.
    pub fn toggle(&mut self, key: CheckItemKey) {
        let status = self.status(key).toggled();
        self.set_status(key, status);
    }

    /// Returns the status of the item for `key`.
    pub fn status(&self, key: CheckItemKey) -> CheckStatus {
        self.items[key.index()].status
    }

    /// Returns the items in key order.
    pub fn items(&self) -> &[CheckItem] {
        &self.items
    }

    /// Number of items marked [`CheckStatus::Fail`].
    pub fn failures(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.status == CheckStatus::Fail)
            .count()
    }
}
