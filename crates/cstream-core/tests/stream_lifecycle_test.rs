//! Path-based lifecycle coverage: open/close/reopen, ownership transfer,
//! block transfer contracts, and file-system operations.

// Raw-handle adoption is part of the surface under test.
#![allow(unsafe_code)]

use std::mem;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use cstream_core::CStream;

fn unique_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("cstream-{tag}-{}-{nanos}", std::process::id()))
}

#[test]
fn open_missing_path_is_empty() {
    let stream = CStream::open(unique_path("missing"), "r");
    assert!(!stream.is_open());
}

#[test]
fn open_write_close_then_read_back() {
    let path = unique_path("roundtrip");
    let mut writer = CStream::open(&path, "wb");
    assert!(writer.is_open());
    assert_eq!(writer.write_block(b"payload".as_slice()), 7);
    assert_eq!(writer.fclose(), 0);
    assert!(!writer.is_open());

    let mut reader = CStream::open(&path, "rb");
    assert!(reader.is_open());
    assert_eq!(reader.read_block::<u8>(7), b"payload");
    drop(reader);
    assert_eq!(CStream::remove(&path), 0);
}

#[test]
fn read_block_shrinks_to_actual_count() {
    let path = unique_path("shrink");
    let records: Vec<u32> = (0..10).map(|i| i * 3).collect();
    let mut writer = CStream::open(&path, "wb");
    assert_eq!(writer.write_block(&records), 10);
    assert_eq!(writer.fclose(), 0);

    let mut reader = CStream::open(&path, "rb");
    let got = reader.read_block::<u32>(20);
    assert_eq!(got.len(), 10);
    assert_eq!(got, records);
    drop(reader);
    assert_eq!(CStream::remove(&path), 0);
}

#[test]
fn freopen_retargets_stream() {
    let first = unique_path("freopen-a");
    let second = unique_path("freopen-b");
    let mut stream = CStream::open(&first, "wb");
    assert!(stream.is_open());
    assert_eq!(stream.write_block(b"one".as_slice()), 3);
    assert!(stream.freopen(&second, "wb"));
    assert!(stream.is_open());
    assert_eq!(stream.write_block(b"two".as_slice()), 3);
    assert_eq!(stream.fclose(), 0);

    let mut reader = CStream::open(&second, "rb");
    assert_eq!(reader.read_block::<u8>(3), b"two");
    drop(reader);
    assert_eq!(CStream::remove(&first), 0);
    assert_eq!(CStream::remove(&second), 0);
}

#[test]
fn rename_moves_the_file() {
    let old = unique_path("rename-old");
    let new = unique_path("rename-new");
    let mut writer = CStream::open(&old, "wb");
    assert_eq!(writer.write_block(b"moved".as_slice()), 5);
    assert_eq!(writer.fclose(), 0);

    assert_eq!(CStream::rename(&old, &new), 0);
    assert!(!CStream::open(&old, "rb").is_open());
    let mut reader = CStream::open(&new, "rb");
    assert_eq!(reader.read_block::<u8>(5), b"moved");
    drop(reader);
    assert_eq!(CStream::remove(&new), 0);
}

#[test]
fn moved_out_wrapper_drops_as_noop() {
    let path = unique_path("move-out");
    let mut source = CStream::open(&path, "wb");
    assert!(source.is_open());
    let raw = source.as_ptr();

    let mut target = mem::take(&mut source);
    assert!(!source.is_open());
    assert_eq!(target.as_ptr(), raw);

    // Dropping the emptied source must not close the handle out from under
    // the new owner.
    drop(source);
    assert_eq!(target.write_block(b"still open".as_slice()), 10);
    assert_eq!(target.fclose(), 0);
    assert_eq!(CStream::remove(&path), 0);
}

#[test]
fn release_transfers_ownership_to_caller() {
    let path = unique_path("release");
    let mut writer = CStream::open(&path, "wb");
    assert_eq!(writer.write_block(b"kept".as_slice()), 4);
    let raw = writer.release();
    assert!(!writer.is_open());
    assert!(!raw.is_null());

    // SAFETY: raw was just released above; re-adopting restores single
    // ownership and closes it on drop.
    let mut adopted = unsafe { CStream::from_raw(raw) };
    assert_eq!(adopted.fflush(), 0);
    assert_eq!(adopted.fclose(), 0);
    assert_eq!(CStream::remove(&path), 0);
}

#[test]
fn tmpfile_is_open_and_seekable() {
    let mut stream = CStream::tmpfile();
    assert!(stream.is_open());
    assert_eq!(stream.write_block(b"0123456789".as_slice()), 10);
    assert_eq!(stream.fseek(4, cstream_core::Whence::Set), 0);
    assert_eq!(stream.ftell(), 4);
    assert_eq!(stream.read_block::<u8>(3), b"456");
}
