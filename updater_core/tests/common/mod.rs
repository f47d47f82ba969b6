// Shared helpers for reading back session log files.
#![allow(dead_code)]

use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One parsed log line: (level, message).
pub fn parse_line(line: &str) -> (String, String) {
    let rest = line
        .strip_prefix('[')
        .unwrap_or_else(|| panic!("missing '[' in {line:?}"));
    let (ts, rest) = rest
        .split_once("] ")
        .unwrap_or_else(|| panic!("missing '] ' in {line:?}"));
    NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT)
        .unwrap_or_else(|e| panic!("bad timestamp {ts:?}: {e}"));
    let (level, msg) = rest
        .split_once(": ")
        .unwrap_or_else(|| panic!("missing level separator in {line:?}"));
    assert!(
        level == "INFO" || level == "ERROR",
        "unexpected level {level:?}"
    );
    (level.to_string(), msg.to_string())
}

/// All lines of the log file, parsed. Panics if the file does not end in a newline.
pub fn read_log(path: &Path) -> Vec<(String, String)> {
    let text = fs::read_to_string(path).expect("read log");
    if !text.is_empty() {
        assert!(text.ends_with('\n'), "log must end with newline: {text:?}");
    }
    text.lines().map(parse_line).collect()
}

pub fn messages(path: &Path) -> Vec<String> {
    read_log(path).into_iter().map(|(_, m)| m).collect()
}
