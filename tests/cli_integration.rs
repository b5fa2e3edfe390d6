use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("warikan-{prefix}-{}-{nanos}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn run_warikan(store: &Path, args: &[&str]) -> (bool, String, String) {
    let bin = std::env::var("CARGO_BIN_EXE_warikan").unwrap_or_else(|_| {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("target");
        path.push("debug");
        if cfg!(windows) {
            path.push("warikan.exe");
        } else {
            path.push("warikan");
        }
        path.to_string_lossy().into_owned()
    });
    let store_arg = store.to_string_lossy().into_owned();
    let mut cmd = Command::new(bin);
    cmd.arg("--store").arg(&store_arg).args(args);
    let output = cmd.output().expect("run warikan");
    (
        output.status.success(),
        String::from_utf8(output.stdout).expect("stdout utf8"),
        String::from_utf8(output.stderr).expect("stderr utf8"),
    )
}

fn apply(store: &Path, user: &str, name: &str, message: &str) -> String {
    let (ok, stdout, stderr) = run_warikan(
        store,
        &[
            "apply", "--group", "g1", "--user", user, "--name", name, message,
        ],
    );
    assert!(ok, "apply failed: {stderr}");
    stdout
}

#[test]
fn record_split_then_undo_scenario() {
    let dir = unique_temp_dir("undo");
    let store = dir.join("ledger.json");

    let reply = apply(&store, "u1", "田中", "lunch\n1000\n2");
    assert!(reply.contains("500 円"), "unexpected reply: {reply}");

    let reply = apply(&store, "u1", "田中", "check");
    assert!(reply.contains("今月の合計は 500 円"));
    assert!(reply.contains("・lunch: 500 円"));

    let reply = apply(&store, "u1", "田中", "取り消し");
    assert!(reply.contains("取り消しました"));

    let reply = apply(&store, "u1", "田中", "check");
    assert!(reply.contains("今月の合計は 0 円"));
    assert!(!reply.contains("lunch"));
}

#[test]
fn double_minus_decrements_the_count() {
    let dir = unique_temp_dir("refund");
    let store = dir.join("ledger.json");

    apply(&store, "u1", "田中", "refund\n500");
    apply(&store, "u1", "田中", "refund\n500");
    apply(&store, "u1", "田中", "refund\n--500");

    let (ok, stdout, _) = run_warikan(&store, &["show", "--group", "g1"]);
    assert!(ok);
    let group: serde_json::Value = serde_json::from_str(&stdout).expect("show json");
    let detail = &group["users"]["u1"]["details"]["refund"];
    assert_eq!(detail["total"], 500);
    assert_eq!(detail["count"], 1);
    assert_eq!(group["users"]["u1"]["total"], 500);
}

#[test]
fn check_all_report_reimports_via_catch() {
    let dir = unique_temp_dir("catch");
    let store = dir.join("ledger.json");

    apply(&store, "u1", "田中", "ランチ\n1000");
    apply(&store, "u2", "鈴木", "夕食\n2000");

    let report = apply(&store, "u1", "田中", "check_all");
    assert!(report.contains("田中 さん: 1,000 円"));
    assert!(report.contains("鈴木 さん: 2,000 円"));

    let reply = apply(&store, "u1", "田中", &format!("catch\n{}", report.trim()));
    assert!(reply.contains("合計 3,000 円"), "unexpected reply: {reply}");

    let reply = apply(&store, "u1", "田中", "check");
    assert!(reply.contains("今月の合計は 2,000 円"));
}

#[test]
fn catch_without_payload_gives_guidance() {
    let dir = unique_temp_dir("catch-empty");
    let store = dir.join("ledger.json");
    let reply = apply(&store, "u1", "田中", "catch");
    assert!(reply.contains("ペーストしてください"));
    assert!(!store.exists(), "guidance reply must not create state");
}

#[test]
fn invalid_amount_is_replied_not_fatal() {
    let dir = unique_temp_dir("invalid");
    let store = dir.join("ledger.json");
    let reply = apply(&store, "u1", "田中", "lunch\nmille");
    assert!(reply.contains("2行目"));
    assert!(!store.exists());
}

#[test]
fn rollover_pushes_summaries_and_resets() {
    let dir = unique_temp_dir("rollover");
    let store = dir.join("ledger.json");

    apply(&store, "u1", "田中", "ランチ\n1000");
    apply(&store, "u2", "鈴木", "夕食\n2000");

    let (ok, stdout, stderr) = run_warikan(&store, &["rollover"]);
    assert!(ok, "rollover failed: {stderr}");
    assert!(stdout.contains("u1@g1"));
    assert!(stdout.contains("u2@g1"));
    assert!(stdout.contains("田中 さん: 1,000 円"));
    assert!(stdout.contains("の集計】"));

    let reply = apply(&store, "u1", "田中", "check");
    assert!(reply.contains("今月の合計は 0 円"));
}

#[test]
fn message_can_come_from_stdin() {
    use std::io::Write;
    use std::process::Stdio;

    let dir = unique_temp_dir("stdin");
    let store = dir.join("ledger.json");
    let bin = std::env::var("CARGO_BIN_EXE_warikan").expect("binary path");
    let mut child = Command::new(bin)
        .args([
            "--store",
            &store.to_string_lossy(),
            "apply",
            "--group",
            "g1",
            "--user",
            "u1",
            "--name",
            "田中",
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn warikan");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all("コーヒー\n300\n".as_bytes())
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("300 円"), "unexpected reply: {stdout}");
}

#[test]
fn show_unknown_group_fails_cleanly() {
    let dir = unique_temp_dir("show");
    let store = dir.join("ledger.json");
    apply(&store, "u1", "田中", "ランチ\n1000");
    let (ok, _, stderr) = run_warikan(&store, &["show", "--group", "nope"]);
    assert!(!ok);
    assert!(stderr.contains("Unknown group"));
}
