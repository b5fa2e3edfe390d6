mod format;
mod text;

pub(crate) use text::{
    catch_reply, check_all_report, check_reply, debug_immediate_reply, debug_started_reply,
    debug_stopped_reply, help_text, record_reply, rollover_report, undo_reply, unknown_reply,
};
