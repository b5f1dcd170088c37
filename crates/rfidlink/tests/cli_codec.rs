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
fn encode_hex_message_matches_known_vector() {
    let output = rfidlink(&["--format", "json", "encode", "RR", "1", "--hex", "01 FF"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"len\":17"));
    assert!(stdout.contains("RR 1 -2 01 FF 3F"));
}

#[test]
fn decode_recovers_tag_and_payload() {
    let output = rfidlink(&["--format", "json", "decode", "RR 1 -2 01 FF 3F"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"tag\":\"RR\""));
    assert!(stdout.contains("\"subcode\":1"));
    assert!(stdout.contains("\"payload_hex\":\"01 FF\""));
}

#[test]
fn decode_round_trips_literal_mode() {
    let encoded = rfidlink(&["--format", "raw", "encode", "CM", "0", "--text", "hello", "--mode", "literal"]);
    assert!(encoded.status.success());

    // Strip the NUL terminator the way a line reader would.
    let mut wire = encoded.stdout.clone();
    assert_eq!(wire.pop(), Some(0));
    let message = String::from_utf8(wire).expect("literal message should be ASCII");

    let decoded = rfidlink(&["--format", "json", "decode", &message]);
    assert!(decoded.status.success());
    let stdout = String::from_utf8_lossy(&decoded.stdout);
    assert!(stdout.contains("\"mode\":\"literal\""));
    assert!(stdout.contains("\"payload_text\":\"hello\""));
}

#[test]
fn decode_bad_checksum_exits_data_invalid() {
    let output = rfidlink(&["decode", "RR 1 -2 01 FF 00"]);

    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("checksum"));
    assert!(stderr.contains("-17"));
}

#[test]
fn encode_rejects_one_character_tag() {
    let output = rfidlink(&["encode", "R", "1"]);

    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn version_reports_package_version() {
    let output = rfidlink(&["version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}
