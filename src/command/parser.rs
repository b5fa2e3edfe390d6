//! Command interpreter
//!
//! Turns a raw (already trimmed) message into an [`Action`]. The first line
//! is the discriminator unless the message is a two- or three-line record
//! form. Validation failures name the offending line and touch no state.

use crate::command::action::{Action, Share};
use crate::command::grammar::{parse_amount_line, parse_share_line};
use crate::consts::{KW_CATCH, KW_CHECK, KW_CHECK_ALL, KW_DEBUG, KW_HELP, KW_UNDO};
use crate::error::ParseError;

pub(crate) fn parse_message(text: &str) -> Result<Action, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    let first = lines.first().map(|l| l.trim()).unwrap_or("");

    match first {
        KW_HELP => return Ok(Action::Help),
        KW_CHECK => return Ok(Action::Check),
        KW_CHECK_ALL => return Ok(Action::CheckAll),
        KW_UNDO => return Ok(Action::Undo),
        KW_DEBUG => return Ok(Action::Debug),
        KW_CATCH => {
            let pasted = lines[1..].join("\n").trim().to_string();
            if pasted.is_empty() {
                return Err(ParseError::EmptyCatch);
            }
            return Ok(Action::Catch { pasted });
        }
        _ => {}
    }

    if lines.len() < 2 {
        return Ok(Action::Unknown);
    }

    let usage = first;
    if usage.is_empty() {
        return Err(ParseError::EmptyUsage);
    }
    let amount_line = lines[1].trim();
    let amount = parse_amount_line(amount_line).ok_or_else(|| ParseError::InvalidAmount {
        input: amount_line.to_string(),
    })?;
    let share = match lines.get(2).map(|l| l.trim()).filter(|l| !l.is_empty()) {
        Some(line) => parse_share_line(line).ok_or_else(|| ParseError::InvalidShare {
            input: line.to_string(),
        })?,
        None => Share::Solo,
    };

    Ok(Action::Record {
        usage: usage.to_string(),
        amount,
        share,
    })
}
