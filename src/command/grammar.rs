//! Shared line grammar
//!
//! One tested parsing layer used by both the command interpreter and the
//! report import merger, so the two sides cannot drift apart. All
//! classifiers are hand-written; a line either matches a shape exactly or
//! is rejected.

use crate::command::action::{AmountSpec, Share};
use crate::consts::KW_SPLIT_ALL;

/// Separator between a member name and the amount in a report header line.
const HEADER_SEP: &str = " さん: ";

/// Parse an amount line: optional `-` or `--` prefix, then one or more
/// ASCII digits, nothing else. `-` subtracts; `--` subtracts and also
/// decrements the usage count.
pub(crate) fn parse_amount_line(line: &str) -> Option<AmountSpec> {
    let line = line.trim();
    let (digits, negative, double_minus) = if let Some(rest) = line.strip_prefix("--") {
        (rest, true, true)
    } else if let Some(rest) = line.strip_prefix('-') {
        (rest, true, false)
    } else {
        (line, false, false)
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    Some(AmountSpec {
        value: if negative { -value } else { value },
        double_minus,
    })
}

/// Parse the optional third line: a positive share count or the split-all
/// marker.
pub(crate) fn parse_share_line(line: &str) -> Option<Share> {
    let line = line.trim();
    if line == KW_SPLIT_ALL {
        return Some(Share::All);
    }
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: i64 = line.parse().ok()?;
    if n == 0 { None } else { Some(Share::Ways(n)) }
}

/// Parse a comma-grouped non-negative number ("1,234"). The first character
/// must be a digit; the rest may mix digits and group separators.
pub(crate) fn parse_grouped(s: &str) -> Option<i64> {
    let s = s.trim();
    if !s.chars().next()?.is_ascii_digit() {
        return None;
    }
    if !s.bytes().all(|b| b.is_ascii_digit() || b == b',') {
        return None;
    }
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Classify a report header line: `<name> さん: <amount,grouped> 円`.
/// The line must not start with whitespace and the name must be non-empty.
pub(crate) fn parse_report_header(line: &str) -> Option<(String, i64)> {
    if line.is_empty() || line.starts_with(char::is_whitespace) {
        return None;
    }
    // Try each separator occurrence left to right so a name containing the
    // separator still parses, as a non-greedy match would.
    for (idx, _) in line.match_indices(HEADER_SEP) {
        let name = &line[..idx];
        if name.is_empty() {
            continue;
        }
        let rest = line[idx + HEADER_SEP.len()..].trim_end();
        if let Some(num) = rest.strip_suffix('円')
            && let Some(amount) = parse_grouped(num)
        {
            return Some((name.to_string(), amount));
        }
    }
    None
}

/// Classify a report detail line: an optional bullet/dash marker, then
/// `<usage>: <amount,grouped> 円`.
pub(crate) fn parse_report_detail(line: &str) -> Option<(String, i64)> {
    let body = line
        .trim()
        .trim_start_matches(['-', 'ー', '・', ' ', '\u{3000}', '\t']);
    // Try each colon in turn so a usage containing ':' still parses.
    for (idx, _) in body.match_indices(':') {
        let usage = body[..idx].trim();
        if usage.is_empty() {
            continue;
        }
        let rest = body[idx + 1..].trim();
        if let Some(num) = rest.strip_suffix('円')
            && let Some(amount) = parse_grouped(num)
        {
            return Some((usage.to_string(), amount));
        }
    }
    None
}
