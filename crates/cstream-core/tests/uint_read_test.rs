//! Byte-order-aware integer reads against real streams.

use cstream_core::{ByteOrder, CStream};

fn stream_with_bytes(bytes: &[u8]) -> CStream {
    let mut stream = CStream::tmpfile();
    assert!(stream.is_open());
    assert_eq!(stream.write_block(bytes), bytes.len());
    stream.rewind();
    stream
}

#[test]
fn little_endian_read_is_host_independent() {
    // 0x01020304 encoded little-endian.
    let mut stream = stream_with_bytes(&[0x04, 0x03, 0x02, 0x01]);
    assert_eq!(stream.read_uint_little::<u32>(), Some(0x0102_0304));
}

#[test]
fn big_endian_read_is_host_independent() {
    let mut stream = stream_with_bytes(&[0x01, 0x02, 0x03, 0x04]);
    assert_eq!(stream.read_uint_big::<u32>(), Some(0x0102_0304));
}

#[test]
fn swapped_read_reverses_the_host_read() {
    let mut stream = stream_with_bytes(&[0x04, 0x03, 0x02, 0x01]);
    let host = stream.read_uint_host::<u32>().expect("host read");
    stream.rewind();
    let swapped = stream.read_uint_swapped::<u32>().expect("swapped read");
    assert_eq!(swapped, host.swap_bytes());
    // On the file the bytes are the little-endian encoding of 0x01020304, so
    // the swapped read equals that value's big-endian interpretation.
    let expected = if cfg!(target_endian = "little") {
        u32::from_be_bytes([0x04, 0x03, 0x02, 0x01])
    } else {
        u32::from_le_bytes([0x04, 0x03, 0x02, 0x01])
    };
    assert_eq!(swapped, expected);
}

#[test]
fn sixteen_and_sixty_four_bit_widths() {
    let mut stream = stream_with_bytes(&[0x22, 0x11]);
    assert_eq!(stream.read_uint_little::<u16>(), Some(0x1122));

    let mut stream = stream_with_bytes(&[0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
    assert_eq!(
        stream.read_uint_little::<u64>(),
        Some(0x0102_0304_0506_0708)
    );
}

#[test]
fn short_read_yields_none() {
    let mut stream = stream_with_bytes(&[0xAA, 0xBB]);
    assert_eq!(stream.read_uint_little::<u32>(), None);
}

#[test]
fn short_read_into_reports_false() {
    let mut stream = stream_with_bytes(&[0xAA]);
    let mut value: u16 = 0x5555;
    assert!(!stream.read_uint_into(&mut value, ByteOrder::LittleEndian));
}

#[test]
fn reference_form_matches_value_form() {
    let bytes = [0x78, 0x56, 0x34, 0x12];
    let mut stream = stream_with_bytes(&bytes);
    let mut by_ref: u32 = 0;
    assert!(stream.read_uint_little_into(&mut by_ref));
    stream.rewind();
    assert_eq!(stream.read_uint_little::<u32>(), Some(by_ref));
    assert_eq!(by_ref, 0x1234_5678);
}

#[test]
fn typed_scalar_read_value() {
    let mut stream = CStream::tmpfile();
    let written: f64 = 2.5;
    assert!(stream.write_value(&written));
    stream.rewind();
    assert_eq!(stream.read_value::<f64>(), Some(2.5));
    assert_eq!(stream.read_value::<f64>(), None);
}
