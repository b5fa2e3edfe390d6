//! Ledger data model
//!
//! The persisted document is one JSON object mapping group id → [`Group`].
//! All maps are insertion-ordered so detail breakdowns print in the order
//! expenses were first recorded.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Whole persisted document: group id → group state.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Ledger {
    pub(crate) groups: IndexMap<String, Group>,
}

impl Ledger {
    pub(crate) fn group_mut(&mut self, group_id: &str) -> &mut Group {
        self.groups.entry(group_id.to_string()).or_default()
    }
}

/// Per-group state: accounts plus the persisted id → display-name cache.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct Group {
    pub(crate) users: IndexMap<String, UserAccount>,
    /// Display names learned from callers, keyed by member id. Consulted by
    /// ordering and by the import merger's reverse lookup.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub(crate) names: IndexMap<String, String>,
}

impl Group {
    pub(crate) fn account_mut(&mut self, user_key: &str) -> &mut UserAccount {
        self.users.entry(user_key.to_string()).or_default()
    }
}

/// One member's current-period accrual.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct UserAccount {
    pub(crate) total: i64,
    #[serde(default)]
    pub(crate) details: IndexMap<String, Detail>,
    #[serde(default)]
    pub(crate) history: Vec<HistoryEntry>,
}

impl UserAccount {
    /// Rollover reset: state is cleared but the account itself persists,
    /// preserving membership across periods.
    pub(crate) fn clear(&mut self) {
        self.total = 0;
        self.details.clear();
        self.history.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.total == 0 && self.details.is_empty() && self.history.is_empty()
    }
}

/// Per-usage accrual. The entry is removed once `count` reaches 0, even if
/// `total` is nonzero: count-zero is the deletion trigger, not total-zero.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct Detail {
    pub(crate) total: i64,
    pub(crate) count: i64,
}

/// One recorded contribution. Append-only except undo, which pops the tail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct HistoryEntry {
    pub(crate) usage: String,
    pub(crate) amount: i64,
    /// Contribution to the detail's count: 1, 0, or -1.
    pub(crate) count: i64,
    pub(crate) timestamp: DateTime<Utc>,
    /// Shared id stamped on every entry created by one split-all record,
    /// making cascade undo exact. Absent on plain records and imported state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) op: Option<String>,
}
