//! Ledger state transitions
//!
//! Pure functions over [`Group`]: record, undo, check orderings, and the
//! per-group rollover. No I/O here; the service layer owns locking,
//! persistence, and outbound delivery.

use chrono::{DateTime, Utc};

use crate::command::{AmountSpec, Share};
use crate::ledger::types::{Group, HistoryEntry, UserAccount};
use crate::resolve::{Resolver, display_name_or_key};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum RecordOutcome {
    /// Only the acting user's account changed.
    Solo {
        usage: String,
        share_amount: i64,
        total: i64,
    },
    /// Every current member received one share.
    SplitAll {
        usage: String,
        share_amount: i64,
        members: usize,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum UndoOutcome {
    NothingToUndo,
    Undone {
        usage: String,
        amount: i64,
        /// Matching tail entries removed from other members' accounts.
        cascaded: usize,
    },
}

/// Ceiling division, rounding toward positive infinity for both signs.
fn div_ceil(a: i64, b: i64) -> i64 {
    let d = a / b;
    if a % b != 0 && (a < 0) == (b < 0) {
        d + 1
    } else {
        d
    }
}

/// Apply a record action. The per-share amount is `ceil(amount / n)`,
/// rounding toward positive infinity for both signs, so every participant
/// carries the same share (minor over-accrual vs. the original amount is
/// accepted).
pub(crate) fn record(
    group: &mut Group,
    user_key: &str,
    usage: &str,
    amount: AmountSpec,
    share: Share,
    now: DateTime<Utc>,
) -> RecordOutcome {
    match share {
        Share::Solo | Share::Ways(_) => {
            let n = match share {
                Share::Ways(n) => n,
                _ => 1,
            };
            let share_amount = div_ceil(amount.value, n);
            let entry = HistoryEntry {
                usage: usage.to_string(),
                amount: share_amount,
                count: count_change(amount, share_amount),
                timestamp: now,
                op: None,
            };
            let account = group.account_mut(user_key);
            apply_entry(account, entry);
            RecordOutcome::Solo {
                usage: usage.to_string(),
                share_amount,
                total: account.total,
            }
        }
        Share::All => {
            // The acting user always participates, even in a fresh group.
            group.account_mut(user_key);
            let members: Vec<String> = group.users.keys().cloned().collect();
            let share_amount = div_ceil(amount.value, members.len() as i64);
            let count = count_change(amount, share_amount);
            let op = format!("{}:{}", now.timestamp_micros(), user_key);
            for key in &members {
                apply_entry(
                    group.account_mut(key),
                    HistoryEntry {
                        usage: usage.to_string(),
                        amount: share_amount,
                        count,
                        timestamp: now,
                        op: Some(op.clone()),
                    },
                );
            }
            RecordOutcome::SplitAll {
                usage: usage.to_string(),
                share_amount,
                members: members.len(),
            }
        }
    }
}

/// Count contribution of one entry: `--` decrements, a negative share
/// leaves the count alone, a normal expense increments.
fn count_change(amount: AmountSpec, share_amount: i64) -> i64 {
    if amount.double_minus {
        -1
    } else if share_amount < 0 {
        0
    } else {
        1
    }
}

fn apply_entry(account: &mut UserAccount, entry: HistoryEntry) {
    account.total += entry.amount;
    let detail = account.details.entry(entry.usage.clone()).or_default();
    detail.total += entry.amount;
    detail.count += entry.count;
    if detail.count <= 0 {
        account.details.shift_remove(&entry.usage);
    }
    account.history.push(entry);
}

fn revert_entry(account: &mut UserAccount, entry: &HistoryEntry) {
    account.total -= entry.amount;
    if let Some(detail) = account.details.get_mut(&entry.usage) {
        detail.total -= entry.amount;
        detail.count -= entry.count;
        if detail.count <= 0 {
            account.details.shift_remove(&entry.usage);
        }
    }
}

/// Undo the acting user's most recent entry (LIFO), then cascade to every
/// other member whose tail entry belongs to the same operation: exact when
/// the popped entry carries an op id, otherwise the same-usage-same-amount
/// heuristic for entries recorded without one.
pub(crate) fn undo(group: &mut Group, user_key: &str) -> UndoOutcome {
    let Some(popped) = group
        .users
        .get_mut(user_key)
        .and_then(|account| account.history.pop())
    else {
        return UndoOutcome::NothingToUndo;
    };
    if let Some(account) = group.users.get_mut(user_key) {
        revert_entry(account, &popped);
    }

    let mut cascaded = 0;
    let others: Vec<String> = group
        .users
        .keys()
        .filter(|key| key.as_str() != user_key)
        .cloned()
        .collect();
    for key in others {
        let Some(account) = group.users.get_mut(&key) else {
            continue;
        };
        if account
            .history
            .last()
            .is_some_and(|tail| cascade_match(&popped, tail))
            && let Some(entry) = account.history.pop()
        {
            revert_entry(account, &entry);
            cascaded += 1;
        }
    }

    UndoOutcome::Undone {
        usage: popped.usage,
        amount: popped.amount,
        cascaded,
    }
}

fn cascade_match(popped: &HistoryEntry, tail: &HistoryEntry) -> bool {
    match &popped.op {
        Some(op) => tail.op.as_deref() == Some(op.as_str()),
        None => tail.usage == popped.usage && tail.amount == popped.amount,
    }
}

/// User keys paired with resolved display names, ordered by name so the
/// ordering stays total even when resolution fails (raw key fallback).
pub(crate) fn ordered_members(
    group: &Group,
    group_id: &str,
    resolver: &dyn Resolver,
) -> Vec<(String, String)> {
    let mut members: Vec<(String, String)> = group
        .users
        .keys()
        .map(|key| (key.clone(), display_name_or_key(resolver, group_id, key)))
        .collect();
    members.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    members
}

/// Close out one group: snapshot every account in display-name order, then
/// clear it. The caller holds the group's lock for the whole sequence and
/// delivers one summary per snapshot.
pub(crate) fn rollover_group(
    group: &mut Group,
    group_id: &str,
    resolver: &dyn Resolver,
) -> Vec<(String, String, UserAccount)> {
    let mut summaries = Vec::new();
    for (key, name) in ordered_members(group, group_id, resolver) {
        if let Some(account) = group.users.get_mut(&key) {
            let snapshot = account.clone();
            account.clear();
            summaries.push((key, name, snapshot));
        }
    }
    summaries
}
