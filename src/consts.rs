/// Account key used when a member's identity cannot be determined
pub(crate) const UNKNOWN_USER: &str = "不明なユーザー";

/// First-line command keywords
pub(crate) const KW_HELP: &str = "help";
pub(crate) const KW_CHECK: &str = "check";
pub(crate) const KW_CHECK_ALL: &str = "check_all";
pub(crate) const KW_CATCH: &str = "catch";
pub(crate) const KW_DEBUG: &str = "debug";
pub(crate) const KW_UNDO: &str = "取り消し";

/// Third-line marker: split evenly across every member of the group
pub(crate) const KW_SPLIT_ALL: &str = "割り勘";
