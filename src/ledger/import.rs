//! Report import merger (the `catch` command)
//!
//! Re-absorbs a previously printed check_all report into the store, used to
//! recover state after a restart. Parsing goes through the shared line
//! grammar, so whatever check_all prints is guaranteed to come back in.
//! The merge is purely additive: re-pasting the same report double-counts,
//! which is accepted rather than silently deduplicated.

use crate::command::grammar::{parse_report_detail, parse_report_header};
use crate::config::UnresolvedPolicy;
use crate::consts::UNKNOWN_USER;
use crate::ledger::types::Group;
use crate::resolve::Resolver;
use indexmap::IndexMap;

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ImportOutcome {
    /// Grand total added across all merged blocks.
    pub(crate) added: i64,
    pub(crate) merged_blocks: usize,
    /// Blocks with no header match, skipped silently.
    pub(crate) skipped_blocks: usize,
}

/// Merge a pasted check_all-style report into the group.
///
/// Names are mapped back to user keys through the resolver (reverse map over
/// existing members, sentinel excluded; resolution failures drop that member
/// from the map). Unmatched names fall to the configured policy.
pub(crate) fn merge_report(
    group: &mut Group,
    group_id: &str,
    pasted: &str,
    resolver: &dyn Resolver,
    policy: UnresolvedPolicy,
) -> ImportOutcome {
    let mut name_to_key: IndexMap<String, String> = IndexMap::new();
    for key in group.users.keys() {
        if key == UNKNOWN_USER {
            continue;
        }
        if let Ok(name) = resolver.resolve(group_id, key) {
            name_to_key.insert(name, key.clone());
        }
    }

    let mut outcome = ImportOutcome::default();
    for block in split_blocks(pasted) {
        let Some((name, total)) = parse_report_header(block[0]) else {
            outcome.skipped_blocks += 1;
            continue;
        };
        let user_key = match name_to_key.get(&name) {
            Some(key) => key.clone(),
            None => match policy {
                UnresolvedPolicy::NewKey => name,
                UnresolvedPolicy::UnknownUser => UNKNOWN_USER.to_string(),
            },
        };
        let account = group.account_mut(&user_key);
        account.total += total;
        outcome.added += total;
        outcome.merged_blocks += 1;

        for line in &block[1..] {
            if let Some((usage, amount)) = parse_report_detail(line) {
                let detail = account.details.entry(usage).or_default();
                detail.total += amount;
                detail.count += 1;
            }
        }
    }
    outcome
}

/// Split pasted text into blocks: a non-blank line matching the header
/// pattern begins a new block; anything before the first header forms a
/// leading block that the caller will skip.
fn split_blocks(pasted: &str) -> Vec<Vec<&str>> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    for line in pasted.lines() {
        if parse_report_header(line).is_some() || blocks.is_empty() {
            blocks.push(vec![line]);
        } else if let Some(current) = blocks.last_mut() {
            current.push(line);
        }
    }
    blocks
}
