use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "guild-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_strategies_writes_output() {
    let exe = env!("CARGO_BIN_EXE_guild-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-strategies", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available strategies"));
    assert!(content.contains("conservative"));
}

#[test]
fn cli_json_report_is_an_array_of_campaigns() {
    let exe = env!("CARGO_BIN_EXE_guild-tester");
    let output_path = temp_path("json");
    let output = Command::new(exe)
        .args([
            "--strategies",
            "balanced,aggressive",
            "--seeds",
            "1,2",
            "--max-days",
            "5",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let content = std::fs::read_to_string(output_path).expect("read output");
    let value: serde_json::Value = serde_json::from_str(&content).expect("json output");
    let campaigns = value.as_array().expect("array of campaigns");
    assert_eq!(campaigns.len(), 4);
    for campaign in campaigns {
        assert!(campaign["days_survived"].as_u64().expect("days") <= 5);
        assert_eq!(campaign["violations"].as_array().map(Vec::len), Some(0));
    }
}

#[test]
fn cli_rejects_unknown_strategy() {
    let exe = env!("CARGO_BIN_EXE_guild-tester");
    let output = Command::new(exe)
        .args(["--strategies", "reckless", "--report", "json"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("reckless"));
}
