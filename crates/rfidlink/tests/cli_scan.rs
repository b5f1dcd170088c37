#![cfg(feature = "cli")]

use std::process::Command;

fn rfidlink(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_rfidlink"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .output()
        .expect("rfidlink should run")
}

#[test]
fn scan_reports_complete_binary_frame() {
    // FIRMWARE query: count 1, checksum 0x82.
    let output = rfidlink(&["--format", "json", "scan", "FF 00 01 81 82"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"result\":5"));
    assert!(stdout.contains("FIRMWARE frame"));
}

#[test]
fn scan_reports_checksum_error_as_negative_code() {
    let output = rfidlink(&["--format", "json", "scan", "FF 00 01 81 FF"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"result\":-5"));
    assert!(stdout.contains("checksum mismatch"));
}

#[test]
fn scan_resynchronizes_after_garbage() {
    let output = rfidlink(&["--format", "json", "scan", "AA FF 00 01 81 82"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"result\":-1"));
    assert!(stdout.contains("\"result\":5"));
}

#[test]
fn scan_line_kind_counts_content_only() {
    // "hi\n" — terminator excluded from the reported length.
    let output = rfidlink(&["--format", "json", "scan", "68 69 0A", "--kind", "line"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"result\":2"));
    assert!(stdout.contains("\"detail\":\"line\""));
}

#[test]
fn frame_builds_seek_command() {
    let output = rfidlink(&["--format", "json", "frame", "seek"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FF 00 01 82 83"));
}

#[test]
fn frame_accepts_hex_command_and_data() {
    // READ_BLOCK of block 4: count 2, checksum 0x86+0x04+0x02 = 0x8C.
    let output = rfidlink(&["--format", "json", "frame", "0x86", "--data", "04"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FF 00 02 86 04 8C"));
}
