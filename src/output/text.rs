//! Reply and report texts
//!
//! All user-facing chat texts live here. The check_all report shape is the
//! one the import merger parses, so a printed report always round-trips.

use crate::ledger::{ImportOutcome, RecordOutcome, UndoOutcome, UserAccount};
use crate::output::format::yen;

pub(crate) fn help_text() -> String {
    [
        "【使い方】",
        "・記録: 1行目に用途、2行目に金額(円)。3行目に人数を書くと割り算、「割り勘」で全員に記録します。",
        "・金額の先頭に「-」で減算、「--」で減算して回数も1つ取り消します。",
        "・check: 自分の今月の合計を表示",
        "・check_all: グループ全員の合計を表示",
        "・catch: 2行目以降にcheck_allの結果をペーストすると記録に加算します",
        "・取り消し: 直前の記録を取り消します",
    ]
    .join("\n")
}

pub(crate) fn unknown_reply(name: &str) -> String {
    format!("{name}さん、コマンドが分かりませんでした。「help」で使い方を表示します、、")
}

pub(crate) fn record_reply(name: &str, outcome: &RecordOutcome) -> String {
    match outcome {
        RecordOutcome::Solo {
            usage,
            share_amount,
            total,
        } => format!(
            "{name}さん、「{usage}」に {} 円を記録しました。今月の合計は {} 円です。",
            yen(*share_amount),
            yen(*total)
        ),
        RecordOutcome::SplitAll {
            usage,
            share_amount,
            members,
        } => format!(
            "{name}さん、「{usage}」を{members}人で割り勘しました。1人 {} 円を記録しました。",
            yen(*share_amount)
        ),
    }
}

pub(crate) fn undo_reply(name: &str, outcome: &UndoOutcome) -> String {
    match outcome {
        UndoOutcome::NothingToUndo => {
            format!("{name}さん、取り消せる記録がありません、、")
        }
        UndoOutcome::Undone {
            usage,
            amount,
            cascaded: 0,
        } => format!(
            "{name}さん、「{usage}」の {} 円を取り消しました。",
            yen(*amount)
        ),
        UndoOutcome::Undone {
            usage,
            amount,
            cascaded,
        } => format!(
            "{name}さん、「{usage}」の {} 円を取り消しました(他{cascaded}人の分も取り消し)。",
            yen(*amount)
        ),
    }
}

/// One user block, exactly the shape the import merger parses back.
pub(crate) fn account_block(name: &str, account: &UserAccount) -> String {
    let mut lines = vec![format!("{name} さん: {} 円", yen(account.total))];
    for (usage, detail) in &account.details {
        lines.push(format!("・{usage}: {} 円", yen(detail.total)));
    }
    lines.join("\n")
}

pub(crate) fn check_reply(name: &str, account: Option<&UserAccount>) -> String {
    match account {
        None => format!("{name}さん、今月の記録はまだありません、、"),
        Some(account) => {
            let mut text = format!(
                "{name}さん、今月の合計は {} 円です。",
                yen(account.total)
            );
            for (usage, detail) in &account.details {
                text.push_str(&format!("\n・{usage}: {} 円", yen(detail.total)));
            }
            text
        }
    }
}

pub(crate) fn check_all_report(blocks: &[(String, &UserAccount)]) -> String {
    if blocks.is_empty() {
        return "まだ誰の記録もありません、、".to_string();
    }
    blocks
        .iter()
        .map(|(name, account)| account_block(name, account))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn catch_reply(name: &str, outcome: &ImportOutcome) -> String {
    format!(
        "{name}さん、catchコマンドのデータを取り込みました。合計 {} 円を現在の記録に加算しました！",
        yen(outcome.added)
    )
}

/// Per-user close-out summary pushed at rollover, labeled with the closed
/// period ("2026年7月").
pub(crate) fn rollover_report(label: &str, name: &str, account: &UserAccount) -> String {
    format!(
        "【{label}の集計】\n{}\n今月もお疲れさまでした！",
        account_block(name, account)
    )
}

pub(crate) fn debug_immediate_reply(name: &str) -> String {
    format!("{name}さん、締め処理を実行しました。")
}

pub(crate) fn debug_started_reply(name: &str, interval_secs: u64) -> String {
    format!("{name}さん、{interval_secs}秒ごとの定期締め処理を開始しました。")
}

pub(crate) fn debug_stopped_reply(name: &str) -> String {
    format!("{name}さん、定期締め処理を停止しました。")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{AmountSpec, Share};
    use crate::ledger::Group;
    use crate::ledger::engine::record;
    use chrono::Utc;

    fn account_with(entries: &[(&str, i64)]) -> Group {
        let mut group = Group::default();
        for (usage, value) in entries {
            record(
                &mut group,
                "u1",
                usage,
                AmountSpec {
                    value: *value,
                    double_minus: false,
                },
                Share::Solo,
                Utc::now(),
            );
        }
        group
    }

    #[test]
    fn account_block_matches_the_import_grammar() {
        use crate::command::grammar::{parse_report_detail, parse_report_header};

        let group = account_with(&[("ランチ", 1000), ("コーヒー", 500)]);
        let block = account_block("田中", &group.users["u1"]);
        let mut lines = block.lines();
        assert_eq!(
            parse_report_header(lines.next().unwrap()),
            Some(("田中".to_string(), 1500))
        );
        assert_eq!(
            parse_report_detail(lines.next().unwrap()),
            Some(("ランチ".to_string(), 1000))
        );
        assert_eq!(
            parse_report_detail(lines.next().unwrap()),
            Some(("コーヒー".to_string(), 500))
        );
    }

    #[test]
    fn check_reply_without_account() {
        assert!(check_reply("田中", None).contains("まだありません"));
    }

    #[test]
    fn check_reply_lists_details_in_insertion_order() {
        let group = account_with(&[("b", 200), ("a", 100)]);
        let text = check_reply("田中", group.users.get("u1"));
        let b_pos = text.find("・b:").unwrap();
        let a_pos = text.find("・a:").unwrap();
        assert!(b_pos < a_pos);
        assert!(text.contains("300 円"));
    }

    #[test]
    fn rollover_report_carries_the_period_label() {
        let group = account_with(&[("ランチ", 1000)]);
        let text = rollover_report("2026年7月", "田中", &group.users["u1"]);
        assert!(text.starts_with("【2026年7月の集計】"));
        assert!(text.contains("田中 さん: 1,000 円"));
    }
}
