use std::io::Write;
use std::process::{Command, Output};

fn ferrous_wire(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ferrous-wire"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_temp(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file
}

#[test]
fn test_query_raw_bytes() {
    let output = ferrous_wire(&["query", "a.b", "--id", "1", "--raw"]);

    assert!(output.status.success());
    assert_eq!(
        output.stdout,
        vec![
            0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, b'a',
            0x01, b'b', 0x00, 0x00, 0x01, 0x00, 0x01,
        ]
    );
}

#[test]
fn test_query_ids_count_up_per_name() {
    let output = ferrous_wire(&["query", "a.b", "c.d", "--id", "7", "--raw"]);

    assert!(output.status.success());
    let bytes = output.stdout;
    assert_eq!(bytes.len(), 42);
    assert_eq!(&bytes[0..2], &[0x00, 0x07]);
    assert_eq!(&bytes[21..23], &[0x00, 0x08]);
    assert_eq!(&bytes[33..38], &[0x01, b'c', 0x01, b'd', 0x00]);
}

#[test]
fn test_query_id_wraps() {
    let output = ferrous_wire(&["query", "a.b", "a.b", "--id", "65535", "--raw"]);

    assert!(output.status.success());
    assert_eq!(&output.stdout[0..2], &[0xFF, 0xFF]);
    assert_eq!(&output.stdout[21..23], &[0x00, 0x00]);
}

#[test]
fn test_query_names_file() {
    let names = write_temp(b"x.y\n\n  z.w  \n");

    let output = ferrous_wire(&[
        "query",
        "a.b",
        "--names",
        names.path().to_str().unwrap(),
        "--id",
        "100",
        "--raw",
    ]);

    assert!(output.status.success());
    let bytes = output.stdout;
    assert_eq!(bytes.len(), 63);
    assert_eq!(&bytes[0..2], &[0x00, 100]);
    assert_eq!(&bytes[21..23], &[0x00, 101]);
    assert_eq!(&bytes[33..35], &[0x01, b'x']);
    assert_eq!(&bytes[42..44], &[0x00, 102]);
    assert_eq!(&bytes[54..56], &[0x01, b'z']);
}

#[test]
fn test_query_without_names_fails() {
    let output = ferrous_wire(&["query"]);

    assert!(!output.status.success());
}

#[test]
fn test_query_hex_dump() {
    let output = ferrous_wire(&["query", "a.b", "--id", "1", "--type", "AAAA"]);

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.starts_with("00000000  00 01 01 00 00 01 00 00  00 00 00 00 01 61 01 62"));
    assert!(text.contains("00 1c 00 01"));
}

#[test]
fn test_decode_hex_file() {
    let input = write_temp(b"00 01 01 00 00 01 00 00 00 00 00 00 01 61 01 62 00 00 01 00 01\n");

    let output = ferrous_wire(&["decode", "--hex", input.path().to_str().unwrap()]);

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("ID: 1\n"));
    assert!(text.contains("QDCount: 1\n"));
    assert!(text.contains("{ a.b; A; IN }"));
}

#[test]
fn test_decode_truncated_input_fails() {
    let input = write_temp(&[0x00, 0x01, 0x01, 0x00, 0x00, 0x01]);

    let output = ferrous_wire(&["decode", input.path().to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Truncated message"));
}

#[test]
fn test_answer_from_hosts() {
    let hosts = write_temp(b"10.1.2.3 a.b\n");
    let query = write_temp(&[
        0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, b'a', 0x01,
        b'b', 0x00, 0x00, 0x01, 0x00, 0x01,
    ]);

    let output = ferrous_wire(&[
        "answer",
        "--hosts",
        hosts.path().to_str().unwrap(),
        "--raw",
        query.path().to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let reply = output.stdout;
    assert_eq!(&reply[..2], &[0x00, 0x01]);
    assert_eq!(reply[2] & 0x80, 0x80);
    assert_eq!(&reply[6..8], &[0x00, 0x01]);
    assert_eq!(&reply[reply.len() - 4..], &[10, 1, 2, 3]);
}

#[test]
fn test_answer_without_match_prints_nothing() {
    let hosts = write_temp(b"10.1.2.3 other.host\n");
    let query = write_temp(b"00 07 01 00 00 01 00 00 00 00 00 00 01 61 01 62 00 00 01 00 01");

    let output = ferrous_wire(&[
        "answer",
        "--hex",
        "--hosts",
        hosts.path().to_str().unwrap(),
        query.path().to_str().unwrap(),
    ]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_max_message_size_rejected() {
    let output = ferrous_wire(&["--max-message-size", "4", "query", "a.b"]);

    assert!(!output.status.success());
}
