use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("Invalid interval \"{input}\" (expected seconds > 0)")]
    InvalidInterval { input: String },

    #[error("Unknown group \"{group}\"")]
    UnknownGroup { group: String },

    #[error("Failed to read message from stdin: {0}")]
    Stdin(std::io::Error),
}

/// Persistence failures. Fatal for the command that hit them: the caller
/// must never be told "recorded" when the write did not happen.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("Failed to read ledger {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Ledger {path} is not valid JSON: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write ledger {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode ledger: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Message validation failures, reported to the caller verbatim with no
/// state touched. Texts are user-facing chat replies.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ParseError {
    #[error("1行目の用途が空です。用途を1行目に書いてください、、")]
    EmptyUsage,

    #[error("2行目の金額「{input}」が読めません。数字で書いてください、、")]
    InvalidAmount { input: String },

    #[error("3行目の分割数「{input}」が読めません。正の数字か「割り勘」で書いてください、、")]
    InvalidShare { input: String },

    #[error("catchコマンドの2行目以降にcheck_allの結果をペーストしてください、、")]
    EmptyCatch,
}

/// Identity-resolution failure. Non-fatal everywhere: call sites fall back
/// to the raw key.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ResolveError {
    #[error("No display name for member {member} in group {group}")]
    NotFound { group: String, member: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_the_amount_line() {
        let e = ParseError::InvalidAmount {
            input: "abc".to_string(),
        };
        assert!(e.to_string().starts_with("2行目"));
        assert!(e.to_string().contains("abc"));
    }

    #[test]
    fn parse_error_names_the_share_line() {
        let e = ParseError::InvalidShare {
            input: "-3".to_string(),
        };
        assert!(e.to_string().starts_with("3行目"));
    }

    #[test]
    fn resolve_error_display() {
        let e = ResolveError::NotFound {
            group: "g1".to_string(),
            member: "u1".to_string(),
        };
        assert_eq!(e.to_string(), "No display name for member u1 in group g1");
    }

    #[test]
    fn app_error_from_store_error() {
        let e = StoreError::Encode(serde_json::from_str::<i32>("x").unwrap_err());
        let app: AppError = e.into();
        assert!(app.to_string().starts_with("Failed to encode ledger"));
    }
}
