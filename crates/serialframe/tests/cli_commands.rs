#![cfg(all(unix, feature = "cli"))]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn unique_temp_file(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "serialframe-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir.join("input")
}

fn run_with_stdin(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_serialframe"))
        .args(["--log-level", "error"])
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("serialframe should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin)
        .expect("stdin should accept input");
    child.wait_with_output().expect("serialframe should finish")
}

fn json_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be json"))
        .collect()
}

#[test]
fn encode_hello_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_serialframe"))
        .args(["encode", "--index", "0x12345678", "--type", "command", "--data", "Hello"])
        .output()
        .expect("encode should run");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "0A 01 12 34 56 78 48 65 6C 6C 6F"
    );
}

#[test]
fn encode_with_shift_adapter() {
    let output = Command::new(env!("CARGO_BIN_EXE_serialframe"))
        .args([
            "encode",
            "--index",
            "0x12345678",
            "--data",
            "Hello",
            "--protocol",
            "shift:1",
        ])
        .output()
        .expect("encode should run");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "0A 01 12 34 56 78 49 66 6D 6D 70"
    );
}

#[test]
fn encode_index_only() {
    let output = Command::new(env!("CARGO_BIN_EXE_serialframe"))
        .args(["encode", "--index", "1", "--hex", "AA BB", "--index-only"])
        .output()
        .expect("encode should run");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "06 00 00 00 01 AA BB"
    );
}

#[test]
fn encode_rejects_oversize_payload() {
    let payload = "x".repeat(251);
    let output = Command::new(env!("CARGO_BIN_EXE_serialframe"))
        .args(["encode", "--data", &payload])
        .output()
        .expect("encode should run");

    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn decode_hex_file_to_json() {
    let path = unique_temp_file("decode-hex");
    std::fs::write(
        &path,
        "0A 01 12 34 56 78 48 65 6C 6C 6F\n07 04 00 00 00 02 2A 2B\n",
    )
    .expect("input should be writable");

    let output = Command::new(env!("CARGO_BIN_EXE_serialframe"))
        .args(["--format", "json", "decode", "--hex"])
        .arg(&path)
        .output()
        .expect("decode should run");

    assert!(output.status.success());
    let messages = json_lines(&output);
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["index"], 0x12345678);
    assert_eq!(messages[0]["type_name"], "COMMAND");
    assert_eq!(messages[0]["payload"], "Hello");
    assert_eq!(messages[1]["type"], 4);
    assert_eq!(messages[1]["payload_hex"], "2A 2B");

    let _ = std::fs::remove_dir_all(path.parent().expect("temp file has a parent"));
}

#[test]
fn decode_raw_stdin_with_shift() {
    let wire = [0x0A, 0x01, 0x12, 0x34, 0x56, 0x78, 0x49, 0x66, 0x6D, 0x6D, 0x70];
    let output = run_with_stdin(&["--format", "json", "decode", "--protocol", "shift:1"], &wire);

    assert!(output.status.success());
    let messages = json_lines(&output);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["payload"], "Hello");
    assert_eq!(messages[0]["adapter"], "shift");
}

#[test]
fn decode_reports_malformed_frames_and_continues() {
    // A truncated frame (length 2) followed by a valid one.
    let mut wire = vec![0x02u8, 0x01, 0x00];
    wire.extend_from_slice(&[0x07, 0x03, 0x00, 0x00, 0x00, 0x09, 0x01, 0x02]);
    let output = run_with_stdin(&["--format", "json", "decode"], &wire);

    assert_eq!(output.status.code(), Some(60));
    let messages = json_lines(&output);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["index"], 9);
}

#[test]
fn decode_stops_after_count() {
    let mut wire = Vec::new();
    for index in 0u8..3 {
        wire.extend_from_slice(&[0x05, 0x00, 0x00, 0x00, index]);
    }
    let output = run_with_stdin(
        &["--format", "json", "decode", "--index-only", "--count", "2"],
        &wire,
    );

    assert!(output.status.success());
    assert_eq!(json_lines(&output).len(), 2);
}

#[test]
fn version_prints_package_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_serialframe"))
        .arg("version")
        .output()
        .expect("version should run");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("serialframe {}", env!("CARGO_PKG_VERSION"))
    );
}
