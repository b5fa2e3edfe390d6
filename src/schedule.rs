//! Close-out scheduling
//!
//! Pure schedule math plus the cancellable repeater behind the periodic
//! debug mode. The repeater owns its worker thread: starting is explicit,
//! stopping wakes the sleep immediately, and dropping the handle stops it
//! too.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Next scheduled close-out strictly after `after`. `day` must be 1-28 and
/// `hour` 0-23 (the config layer clamps), so the candidate always exists.
pub(crate) fn next_rollover(after: NaiveDateTime, day: u32, hour: u32) -> NaiveDateTime {
    let (mut year, mut month) = (after.year(), after.month());
    loop {
        if let Some(candidate) = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            && candidate > after
        {
            return candidate;
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
}

/// Label for the period a close-out is summarizing: the calendar month
/// before `now` ("2026年7月").
pub(crate) fn prior_month_label(now: NaiveDate) -> String {
    let (year, month) = if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    };
    format!("{year}年{month}月")
}

/// A repeating background task with a cancellable sleep.
pub(crate) struct Repeater {
    stop: mpsc::Sender<()>,
    handle: thread::JoinHandle<()>,
}

impl Repeater {
    /// Spawn a worker that runs `tick` every `interval` until stopped.
    pub(crate) fn spawn<F>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (stop, wakeup) = mpsc::channel();
        let handle = thread::spawn(move || {
            loop {
                match wakeup.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => tick(),
                    // Stop requested or the handle was dropped.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });
        Self { stop, handle }
    }

    /// Stop the worker and wait for it to finish.
    pub(crate) fn stop(self) {
        let _ = self.stop.send(());
        let _ = self.handle.join();
    }
}
