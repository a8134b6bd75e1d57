// Path: crates/jam-types/src/report/state_delta.rs

use crate::report::global_state::Account;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The effect of executing a single `WorkItem` against `GlobalState`, expressed
/// as a set of optional per-section overrides rather than a full state copy.
///
/// Pure data: `Ψ_A` produces it, the accumulation processor applies it. Fields
/// left `None` are left untouched by [`StateDelta::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct StateDelta {
    /// Account records to merge by id, replacing any existing record for that id.
    pub accounts: Option<BTreeMap<String, Account>>,
    /// Free-form key/value data to shallow-merge into `GlobalState::data`.
    pub data: Option<BTreeMap<String, String>>,
    /// A line to append to `GlobalState::log`.
    pub log: Option<String>,
}

impl StateDelta {
    /// A delta that changes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merges another delta's fields into this one, with `other` taking
    /// precedence on overlapping keys. Used when a report's work-items each
    /// produce a delta that must be folded into one before commit.
    pub fn merge(mut self, other: StateDelta) -> StateDelta {
        if let Some(other_accounts) = other.accounts {
            let accounts = self.accounts.get_or_insert_with(BTreeMap::new);
            accounts.extend(other_accounts);
        }
        if let Some(other_data) = other.data {
            let data = self.data.get_or_insert_with(BTreeMap::new);
            data.extend(other_data);
        }
        if let Some(line) = other.log {
            match &mut self.log {
                Some(existing) => {
                    existing.push('\n');
                    existing.push_str(&line);
                }
                None => self.log = Some(line),
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_last_write_wins_on_accounts() {
        let mut a_accounts = BTreeMap::new();
        a_accounts.insert(
            "alice".to_string(),
            Account {
                balance: 100,
                data: Default::default(),
            },
        );
        let a = StateDelta {
            accounts: Some(a_accounts),
            data: None,
            log: None,
        };
        let mut b_accounts = BTreeMap::new();
        b_accounts.insert(
            "alice".to_string(),
            Account {
                balance: 200,
                data: Default::default(),
            },
        );
        let b = StateDelta {
            accounts: Some(b_accounts),
            data: None,
            log: None,
        };
        let merged = a.merge(b);
        assert_eq!(merged.accounts.expect("accounts")["alice"].balance, 200);
    }

    #[test]
    fn merge_appends_log_lines() {
        let a = StateDelta {
            log: Some("first".into()),
            ..StateDelta::empty()
        };
        let b = StateDelta {
            log: Some("second".into()),
            ..StateDelta::empty()
        };
        assert_eq!(a.merge(b).log.expect("log"), "first\nsecond");
    }
}
