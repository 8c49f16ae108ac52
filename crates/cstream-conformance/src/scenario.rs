//! Host scenario execution.
//!
//! Each scenario drives `cstream-core` through one observable contract on
//! the host file system and records an expected/actual pair. Scenarios that
//! compare payload content also record a blake3 digest of the expected
//! payload.

use std::mem;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cstream_core::CStream;

/// Failure to prepare the scenario workspace.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("workspace setup failed: {0}")]
    Workspace(#[from] std::io::Error),
}

/// Result of running a single scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario name.
    pub name: String,
    /// C stdio facility exercised (e.g. "fread", "fopen").
    pub reference: String,
    /// Whether expected and actual agree.
    pub passed: bool,
    /// Expected observation.
    pub expected: String,
    /// Actual observation.
    pub actual: String,
    /// blake3 digest of the expected payload, for content scenarios.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_digest: Option<String>,
}

fn observe(
    name: &str,
    reference: &str,
    expected: impl ToString,
    actual: impl ToString,
) -> ScenarioResult {
    let expected = expected.to_string();
    let actual = actual.to_string();
    ScenarioResult {
        name: name.to_string(),
        reference: reference.to_string(),
        passed: expected == actual,
        expected,
        actual,
        payload_digest: None,
    }
}

fn scratch(workdir: &Path, leaf: &str) -> PathBuf {
    workdir.join(format!("{leaf}-{}", std::process::id()))
}

/// Runs every scenario, creating `workdir` if needed.
///
/// Individual scenario failures are reported in the results, not as errors;
/// only workspace setup can fail here.
pub fn run_all(workdir: &Path) -> Result<Vec<ScenarioResult>, ScenarioError> {
    std::fs::create_dir_all(workdir)?;
    Ok(vec![
        roundtrip_block(workdir),
        read_block_zero_no_io(),
        read_block_truncates(workdir),
        open_missing_is_empty(workdir),
        take_leaves_source_empty(),
        swap_exchanges_handles(),
        uint_little_endian(),
        uint_swapped_reverses_host(),
        rename_remove_lifecycle(workdir),
        line_read(workdir),
        scan_formatted_integers(workdir),
    ])
}

fn roundtrip_block(workdir: &Path) -> ScenarioResult {
    let path = scratch(workdir, "roundtrip");
    let payload: Vec<u8> = (0..=255).collect();

    let mut writer = CStream::open(&path, "wb");
    let wrote = writer.write_block(&payload);
    writer.fclose();

    let mut reader = CStream::open(&path, "rb");
    let got = reader.read_block::<u8>(payload.len());
    drop(reader);
    CStream::remove(&path);

    let expected_digest = blake3::hash(&payload).to_hex().to_string();
    let actual_digest = blake3::hash(&got).to_hex().to_string();
    let mut result = observe(
        "roundtrip_block",
        "fwrite/fread",
        format!("wrote=256 digest={expected_digest}"),
        format!("wrote={wrote} digest={actual_digest}"),
    );
    result.payload_digest = Some(expected_digest);
    result
}

fn read_block_zero_no_io() -> ScenarioResult {
    let mut stream = CStream::tmpfile();
    if !stream.is_open() {
        return observe("read_block_zero_no_io", "fread", "tmpfile open", "tmpfile failed");
    }
    stream.write_block(b"abc".as_slice());
    stream.rewind();
    let len = stream.read_block::<u8>(0).len();
    let pos = stream.ftell();
    observe(
        "read_block_zero_no_io",
        "fread",
        "len=0 pos=0",
        format!("len={len} pos={pos}"),
    )
}

fn read_block_truncates(workdir: &Path) -> ScenarioResult {
    let path = scratch(workdir, "truncate");
    let records: Vec<u32> = (0..10).collect();

    let mut writer = CStream::open(&path, "wb");
    writer.write_block(&records);
    writer.fclose();

    let mut reader = CStream::open(&path, "rb");
    let got = reader.read_block::<u32>(20);
    drop(reader);
    CStream::remove(&path);

    observe(
        "read_block_truncates",
        "fread",
        "len=10",
        format!("len={}", got.len()),
    )
}

fn open_missing_is_empty(workdir: &Path) -> ScenarioResult {
    let path = scratch(workdir, "does-not-exist");
    let stream = CStream::open(&path, "r");
    observe(
        "open_missing_is_empty",
        "fopen",
        "empty",
        if stream.is_open() { "open" } else { "empty" },
    )
}

fn take_leaves_source_empty() -> ScenarioResult {
    let mut source = CStream::tmpfile();
    if !source.is_open() {
        return observe("take_leaves_source_empty", "fclose", "tmpfile open", "tmpfile failed");
    }
    let raw = source.as_ptr();
    let taken = mem::take(&mut source);
    let transferred = !source.is_open() && taken.as_ptr() == raw;
    observe(
        "take_leaves_source_empty",
        "fclose",
        "moved",
        if transferred { "moved" } else { "not moved" },
    )
}

fn swap_exchanges_handles() -> ScenarioResult {
    let mut a = CStream::tmpfile();
    let mut b = CStream::new();
    let raw = a.as_ptr();
    a.swap(&mut b);
    let swapped = !a.is_open() && b.as_ptr() == raw;
    observe(
        "swap_exchanges_handles",
        "fclose",
        "swapped",
        if swapped { "swapped" } else { "not swapped" },
    )
}

fn uint_little_endian() -> ScenarioResult {
    let mut stream = CStream::tmpfile();
    if !stream.is_open() {
        return observe("uint_little_endian", "fread", "tmpfile open", "tmpfile failed");
    }
    stream.write_block(&[0x04u8, 0x03, 0x02, 0x01]);
    stream.rewind();
    let value = stream.read_uint_little::<u32>();
    observe(
        "uint_little_endian",
        "fread",
        format!("{:#010x}", 0x0102_0304_u32),
        value.map_or_else(|| "short read".to_string(), |v| format!("{v:#010x}")),
    )
}

fn uint_swapped_reverses_host() -> ScenarioResult {
    let mut stream = CStream::tmpfile();
    if !stream.is_open() {
        return observe("uint_swapped_reverses_host", "fread", "tmpfile open", "tmpfile failed");
    }
    stream.write_block(&[0x04u8, 0x03, 0x02, 0x01]);
    stream.rewind();
    let host = stream.read_uint_host::<u32>();
    stream.rewind();
    let swapped = stream.read_uint_swapped::<u32>();
    let (expected, actual) = match (host, swapped) {
        (Some(h), Some(s)) => (format!("{:#010x}", h.swap_bytes()), format!("{s:#010x}")),
        _ => ("reads complete".to_string(), "short read".to_string()),
    };
    observe("uint_swapped_reverses_host", "fread", expected, actual)
}

fn rename_remove_lifecycle(workdir: &Path) -> ScenarioResult {
    let old = scratch(workdir, "rename-old");
    let new = scratch(workdir, "rename-new");

    let mut writer = CStream::open(&old, "wb");
    writer.write_block(b"moved".as_slice());
    writer.fclose();

    let renamed = CStream::rename(&old, &new);
    let reopened = CStream::open(&new, "rb").is_open();
    let removed = CStream::remove(&new);
    let gone = !CStream::open(&new, "rb").is_open();

    observe(
        "rename_remove_lifecycle",
        "rename/remove",
        "renamed=0 reopened=true removed=0 gone=true",
        format!("renamed={renamed} reopened={reopened} removed={removed} gone={gone}"),
    )
}

fn line_read(workdir: &Path) -> ScenarioResult {
    let path = scratch(workdir, "lines");
    let mut writer = CStream::open(&path, "w");
    write!(writer, "alpha\nbeta\n");
    writer.fclose();

    let mut reader = CStream::open(&path, "r");
    let line = reader.read_line(32);
    drop(reader);
    CStream::remove(&path);

    observe(
        "line_read",
        "fgets",
        "alpha\\n",
        line.map_or_else(
            || "no line".to_string(),
            |l| String::from_utf8_lossy(&l).escape_default().to_string(),
        ),
    )
}

fn scan_formatted_integers(workdir: &Path) -> ScenarioResult {
    let path = scratch(workdir, "scan");
    let mut writer = CStream::open(&path, "w");
    write!(writer, "42 -7");
    writer.fclose();

    let mut reader = CStream::open(&path, "r");
    let first = reader.scan_long();
    let second = reader.scan_long();
    let third = reader.scan_long();
    drop(reader);
    CStream::remove(&path);

    observe(
        "scan_formatted_integers",
        "fscanf",
        "Some(42) Some(-7) None",
        format!("{first:?} {second:?} {third:?}"),
    )
}
