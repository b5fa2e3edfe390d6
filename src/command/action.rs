//! Structured actions produced by the command interpreter

/// Parsed amount line. `value` already carries the sign; `double_minus`
/// records the `--` form, which also decrements the usage count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AmountSpec {
    pub(crate) value: i64,
    pub(crate) double_minus: bool,
}

/// How a recorded amount is divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Share {
    /// Acting user carries the full amount
    Solo,
    /// Acting user carries one of N equal shares
    Ways(i64),
    /// Every current member of the group receives one equal share
    All,
}

/// One inbound message, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Record {
        usage: String,
        amount: AmountSpec,
        share: Share,
    },
    Check,
    CheckAll,
    Catch {
        pasted: String,
    },
    Undo,
    Debug,
    Help,
    Unknown,
}
