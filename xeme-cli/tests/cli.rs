use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "xeme-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_presets_writes_output() {
    let exe = env!("CARGO_BIN_EXE_xeme");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-presets", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available presets"));
    assert!(content.contains("jeme"));
}

#[test]
fn cli_json_report_covers_every_preset() {
    let exe = env!("CARGO_BIN_EXE_xeme");
    let output_path = temp_path("json");
    let output = Command::new(exe)
        .args(["--report", "json", "--rounds", "1,0,3", "--output"])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let results = value["results"].as_array().expect("results array");
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["status"], "REME");
    let rounds: Vec<_> = results[0]["reports"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["rounds"].as_u64().unwrap())
        .collect();
    assert_eq!(rounds, vec![1, 1, 3]);
}

#[test]
fn cli_fails_on_incomplete_configuration() {
    let exe = env!("CARGO_BIN_EXE_xeme");
    let config_path = temp_path("broken.json");
    std::fs::write(
        &config_path,
        r#"{
            "mode": "Raw",
            "weights": { "defaultWeight": 2, "weights": {} },
            "orders": { "player": [[0, 1, 2, 3, 4, 6]], "host": [[0, 1, 2, 3, 4, 5, 6]] }
        }"#,
    )
    .expect("write config");
    let output_path = temp_path("broken-report");
    let output = Command::new(exe)
        .args(["--bound", "7", "--report", "markdown", "--config"])
        .arg(&config_path)
        .arg("--output")
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(1));
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Computation failed"));
    assert!(content.contains("value 5 is not ranked"));
}

#[test]
fn cli_rejects_unknown_presets() {
    let exe = env!("CARGO_BIN_EXE_xeme");
    let output = Command::new(exe)
        .args(["--presets", "keme"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown game variant"));
}
