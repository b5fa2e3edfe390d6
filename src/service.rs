//! Command handling service
//!
//! Owns the serialization discipline around the shared ledger document:
//! every operation on a group runs under that group's lock for its whole
//! load→mutate→save cycle, and the document itself has a single-writer
//! lock because all groups share one file. Rollover holds the group lock
//! across its entire read-summarize-clear-write sequence, so no command
//! can land mid-close-out with ambiguous period attribution.
//!
//! The periodic debug repeater lives here as explicit service state, not a
//! process-wide flag.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{Local, Utc};

use crate::command::{Action, parse_message};
use crate::config::{Config, DebugMode, UnresolvedPolicy};
use crate::error::AppError;
use crate::ledger::engine::{ordered_members, record, rollover_group, undo};
use crate::ledger::import::merge_report;
use crate::ledger::{Store, UserAccount};
use crate::output;
use crate::resolve::{CacheResolver, display_name_or_key};
use crate::schedule::{Repeater, prior_month_label};
use crate::transport::{SharedTransport, Transport};

#[derive(Debug, Clone, Copy)]
pub(crate) struct ServiceOptions {
    pub(crate) unresolved: UnresolvedPolicy,
    pub(crate) debug_mode: DebugMode,
    pub(crate) debug_interval: Duration,
}

impl From<&Config> for ServiceOptions {
    fn from(config: &Config) -> Self {
        Self {
            unresolved: config.unresolved(),
            debug_mode: config.debug_mode(),
            debug_interval: config.debug_interval(),
        }
    }
}

/// One inbound chat message with its context.
pub(crate) struct Inbound<'a> {
    pub(crate) group_id: &'a str,
    pub(crate) user_id: &'a str,
    pub(crate) display_name: Option<&'a str>,
    pub(crate) text: &'a str,
}

pub(crate) struct Service {
    store: Store,
    options: ServiceOptions,
    group_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    /// Single-writer lock for the shared document file, held across each
    /// load→save cycle.
    doc_lock: Mutex<()>,
    repeater: Mutex<Option<Repeater>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Service {
    pub(crate) fn new(store: Store, options: ServiceOptions) -> Self {
        Self {
            store,
            options,
            group_locks: Mutex::new(HashMap::new()),
            doc_lock: Mutex::new(()),
            repeater: Mutex::new(None),
        }
    }

    fn group_lock(&self, group_id: &str) -> Arc<Mutex<()>> {
        let mut locks = lock(&self.group_locks);
        Arc::clone(
            locks
                .entry(group_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    /// Interpret and apply one inbound message, delivering the reply.
    /// Validation failures are replied to the caller with no state touched;
    /// only persistence failures surface as errors.
    pub(crate) fn handle_message(
        self: &Arc<Self>,
        inbound: &Inbound<'_>,
        transport: &SharedTransport,
    ) -> Result<(), AppError> {
        let action = match parse_message(inbound.text) {
            Ok(action) => action,
            Err(validation) => {
                let name = self.caller_name(inbound)?;
                transport.reply(&format!("{name}さん、{validation}"));
                return Ok(());
            }
        };

        let reply = match action {
            Action::Help => output::help_text(),
            Action::Unknown => output::unknown_reply(&self.caller_name(inbound)?),
            Action::Debug => match self.options.debug_mode {
                DebugMode::Immediate => {
                    self.rollover_now(transport.as_ref())?;
                    output::debug_immediate_reply(&self.caller_name(inbound)?)
                }
                DebugMode::Periodic => {
                    let name = self.caller_name(inbound)?;
                    if self.toggle_debug(transport) {
                        output::debug_started_reply(&name, self.options.debug_interval.as_secs())
                    } else {
                        output::debug_stopped_reply(&name)
                    }
                }
            },
            _ => self.apply_group_action(inbound, action)?,
        };
        transport.reply(&reply);
        Ok(())
    }

    /// Actions that read or mutate one group's state.
    fn apply_group_action(&self, inbound: &Inbound<'_>, action: Action) -> Result<String, AppError> {
        let group_lock = self.group_lock(inbound.group_id);
        let _group_guard = lock(&group_lock);
        let _doc_guard = lock(&self.doc_lock);

        let mut ledger = self.store.load()?;
        let group = ledger.group_mut(inbound.group_id);
        let resolver = CacheResolver::new(group.names.clone());
        let name = match inbound.display_name {
            Some(name) => name.to_string(),
            None => display_name_or_key(&resolver, inbound.group_id, inbound.user_id),
        };

        let (reply, mutated) = match action {
            Action::Check => (
                output::check_reply(&name, group.users.get(inbound.user_id)),
                false,
            ),
            Action::CheckAll => {
                let blocks: Vec<(String, &UserAccount)> =
                    ordered_members(group, inbound.group_id, &resolver)
                        .into_iter()
                        .filter_map(|(key, member_name)| {
                            group.users.get(&key).map(|account| (member_name, account))
                        })
                        .collect();
                (output::check_all_report(&blocks), false)
            }
            Action::Record {
                usage,
                amount,
                share,
            } => {
                if let Some(display) = inbound.display_name {
                    group
                        .names
                        .insert(inbound.user_id.to_string(), display.to_string());
                }
                let outcome = record(
                    group,
                    inbound.user_id,
                    &usage,
                    amount,
                    share,
                    Utc::now(),
                );
                (output::record_reply(&name, &outcome), true)
            }
            Action::Undo => {
                if let Some(display) = inbound.display_name {
                    group
                        .names
                        .insert(inbound.user_id.to_string(), display.to_string());
                }
                let outcome = undo(group, inbound.user_id);
                (output::undo_reply(&name, &outcome), true)
            }
            Action::Catch { pasted } => {
                if let Some(display) = inbound.display_name {
                    group
                        .names
                        .insert(inbound.user_id.to_string(), display.to_string());
                }
                let outcome = merge_report(
                    group,
                    inbound.group_id,
                    &pasted,
                    &resolver,
                    self.options.unresolved,
                );
                (output::catch_reply(&name, &outcome), true)
            }
            // Help / Unknown / Debug are handled before this point.
            _ => (output::help_text(), false),
        };

        if mutated {
            self.store.save(&ledger)?;
        }
        Ok(reply)
    }

    /// Caller's display name without mutating anything: the provided name,
    /// the cached one, or the raw id.
    fn caller_name(&self, inbound: &Inbound<'_>) -> Result<String, AppError> {
        if let Some(name) = inbound.display_name {
            return Ok(name.to_string());
        }
        let _doc_guard = lock(&self.doc_lock);
        let ledger = self.store.load()?;
        Ok(ledger
            .groups
            .get(inbound.group_id)
            .and_then(|group| group.names.get(inbound.user_id).cloned())
            .unwrap_or_else(|| inbound.user_id.to_string()))
    }

    /// Close out every group: push one summary per member, then clear.
    pub(crate) fn rollover_now(&self, transport: &dyn Transport) -> Result<(), AppError> {
        let group_ids: Vec<String> = {
            let _doc_guard = lock(&self.doc_lock);
            self.store.load()?.groups.keys().cloned().collect()
        };
        let label = prior_month_label(Local::now().date_naive());

        for group_id in group_ids {
            let group_lock = self.group_lock(&group_id);
            let _group_guard = lock(&group_lock);
            let summaries = {
                let _doc_guard = lock(&self.doc_lock);
                let mut ledger = self.store.load()?;
                let group = ledger.group_mut(&group_id);
                let resolver = CacheResolver::new(group.names.clone());
                let summaries = rollover_group(group, &group_id, &resolver);
                self.store.save(&ledger)?;
                summaries
            };
            for (user_key, name, snapshot) in summaries {
                transport.push(
                    &group_id,
                    &user_key,
                    &output::rollover_report(&label, &name, &snapshot),
                );
            }
        }
        Ok(())
    }

    /// Start the periodic close-out repeater if idle, stop it if running.
    /// Returns whether it is running afterwards. Starting twice never
    /// stacks a second repeater; stopping with none running is a no-op.
    pub(crate) fn toggle_debug(self: &Arc<Self>, transport: &SharedTransport) -> bool {
        let mut slot = lock(&self.repeater);
        if let Some(repeater) = slot.take() {
            drop(slot);
            repeater.stop();
            return false;
        }
        let service = Arc::clone(self);
        let transport = Arc::clone(transport);
        *slot = Some(Repeater::spawn(self.options.debug_interval, move || {
            if let Err(err) = service.rollover_now(transport.as_ref()) {
                eprintln!("Periodic close-out failed: {err}");
            }
        }));
        true
    }

    #[allow(dead_code)]
    pub(crate) fn debug_running(&self) -> bool {
        lock(&self.repeater).is_some()
    }

    /// Stop the repeater if one is running. Safe to call when idle.
    pub(crate) fn stop_debug(&self) {
        let repeater = lock(&self.repeater).take();
        if let Some(repeater) = repeater {
            repeater.stop();
        }
    }
}
