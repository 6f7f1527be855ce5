use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{HYPE, Sandbox};

#[test]
fn test_init_creates_history_with_bom_and_header() {
    let sb = Sandbox::new();

    sb.rcw().args(["--test", "init"]).assert().success();

    let bytes = fs::read(&sb.history).expect("history created");
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    assert_eq!(text, "timestamp,product_name,style,content\n");
    assert!(!sb.home().join("rcopywriter.conf").exists());
}

#[test]
fn test_list_empty_history() {
    let sb = Sandbox::new();

    sb.rcw()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("目前尚無紀錄"));
}

#[test]
fn test_list_most_recent_first() {
    let sb = Sandbox::new();
    sb.seed_two();

    let out = sb.rcw().arg("list").assert().success().get_output().stdout.clone();
    let out = String::from_utf8(out).unwrap();

    let newer = out.find("2025-09-01 10:00:00 | Newer").expect("newer listed");
    let older = out.find("2025-09-01 09:00:00 | Older").expect("older listed");
    assert!(newer < older);
}

#[test]
fn test_list_limit() {
    let sb = Sandbox::new();
    sb.seed_two();

    sb.rcw()
        .args(["list", "--limit", "1"])
        .assert()
        .success()
        .stdout(contains("Newer").and(contains("| Older").not()))
        .stdout(contains("1 older posts not shown"));
}

#[test]
fn test_show_by_position_label_and_timestamp() {
    let sb = Sandbox::new();
    sb.seed_two();

    sb.rcw()
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(contains("new copy"));

    sb.rcw()
        .args(["show", "2025-09-01 09:00:00 | Older"])
        .assert()
        .success()
        .stdout(contains("old copy"));

    sb.rcw()
        .args(["show", "2025-09-01 10:00:00"])
        .assert()
        .success()
        .stdout(contains("new copy"));
}

#[test]
fn test_show_unknown_selection_fails() {
    let sb = Sandbox::new();
    sb.seed_two();

    sb.rcw()
        .args(["show", "7"])
        .assert()
        .failure()
        .stderr(contains("No record found"));
}

#[test]
fn test_edit_changes_only_selected_content() {
    let sb = Sandbox::new();
    let (older, newer) = sb.seed_two();

    sb.rcw()
        .args(["edit", &older.timestamp, "--content", "new text"])
        .assert()
        .success()
        .stdout(contains("修改已儲存"));

    let rows = sb.records();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].timestamp, older.timestamp);
    assert_eq!(rows[0].product_name, older.product_name);
    assert_eq!(rows[0].style, older.style);
    assert_eq!(rows[0].content, "new text");
    assert_eq!(rows[1], newer);
}

#[test]
fn test_edit_from_file() {
    let sb = Sandbox::new();
    let (_, newer) = sb.seed_two();

    let src = sb.dir.path().join("copy.txt");
    fs::write(&src, "line one\nline, \"two\"").unwrap();

    sb.rcw()
        .args(["edit", "#1", "--file", &src.to_string_lossy()])
        .assert()
        .success();

    let rows = sb.records();
    assert_eq!(rows[1].timestamp, newer.timestamp);
    assert_eq!(rows[1].content, "line one\nline, \"two\"");
}

#[test]
fn test_edit_requires_a_source() {
    let sb = Sandbox::new();
    sb.seed_two();

    sb.rcw().args(["edit", "1"]).assert().failure();
}

#[test]
fn test_del_with_yes() {
    let sb = Sandbox::new();
    let (older, newer) = sb.seed_two();

    sb.rcw()
        .args(["del", &newer.timestamp, "--yes"])
        .assert()
        .success()
        .stdout(contains("已刪除該筆紀錄"));

    assert_eq!(sb.records(), vec![older]);
}

#[test]
fn test_del_twice_leaves_same_state() {
    let sb = Sandbox::new();
    let (older, newer) = sb.seed_two();

    sb.rcw()
        .args(["del", &older.timestamp, "-y"])
        .assert()
        .success();
    let once = sb.records();

    // already gone: a silent no-op, reported as information
    sb.rcw()
        .args(["del", &older.timestamp, "-y"])
        .assert()
        .success()
        .stdout(contains("nothing changed"));

    assert_eq!(sb.records(), once);
    assert_eq!(once, vec![newer]);
}

#[test]
fn test_del_absent_label_without_confirmation() {
    let sb = Sandbox::new();
    let before = sb.seed_two();

    sb.rcw()
        .args(["del", "1999-01-01 00:00:00 | Ghost"])
        .assert()
        .success()
        .stdout(contains("nothing changed"));

    assert_eq!(sb.records(), vec![before.0, before.1]);
}

#[test]
fn test_del_position_out_of_range_fails() {
    let sb = Sandbox::new();
    sb.seed_two();

    sb.rcw()
        .args(["del", "7", "-y"])
        .assert()
        .failure()
        .stderr(contains("No record found"));

    assert_eq!(sb.records().len(), 2);
}

#[test]
fn test_edit_absent_timestamp_changes_nothing() {
    let sb = Sandbox::new();
    let before = sb.seed_two();
    let bytes = fs::read(&sb.history).unwrap();

    sb.rcw()
        .args(["edit", "1999-01-01 00:00:00", "--content", "x"])
        .assert()
        .success()
        .stdout(contains("nothing changed"));

    assert_eq!(fs::read(&sb.history).unwrap(), bytes);
    assert_eq!(sb.records(), vec![before.0, before.1]);
}

#[test]
fn test_del_cancelled() {
    let sb = Sandbox::new();
    sb.seed_two();

    sb.rcw()
        .args(["del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    assert_eq!(sb.records().len(), 2);
}

#[test]
fn test_reads_history_written_with_localized_headers() {
    let sb = Sandbox::new();
    let mut data = b"\xEF\xBB\xBF".to_vec();
    data.extend_from_slice(
        format!(
            "日期,商品名稱,風格,生成的文案\n2024-12-24 20:15:00,聖誕蛋糕,{HYPE},\"限量！\n快搶\"\n"
        )
        .as_bytes(),
    );
    fs::write(&sb.history, &data).unwrap();

    sb.rcw()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("2024-12-24 20:15:00 | 聖誕蛋糕"));

    sb.rcw()
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(contains("限量！\n快搶"));
}

#[test]
fn test_corrupt_history_is_reported() {
    let sb = Sandbox::new();
    fs::write(&sb.history, "timestamp,product_name,style,content\nonly,three,cols\n").unwrap();

    sb.rcw()
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("History file error"));
}

#[test]
fn test_styles_lists_presets() {
    let sb = Sandbox::new();

    sb.rcw()
        .arg("styles")
        .assert()
        .success()
        .stdout(contains("🔥 熱血叫賣風"))
        .stdout(contains("💖 溫柔閨蜜風"))
        .stdout(contains("🧐 專業分析風"))
        .stdout(contains("🤣 幽默搞笑風"))
        .stdout(contains("(default)"));
}
