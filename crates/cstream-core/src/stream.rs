//! Owned C stream handles.
//!
//! [`CStream`] wraps a `*mut libc::FILE` with single-owner semantics: the
//! handle is closed exactly once, on drop or explicit close, and ownership
//! moves rather than copies. Forwarded operations keep their C names and
//! return the primitive's raw result.
//!
//! # Empty streams
//!
//! Open and create operations signal failure by leaving the wrapper empty
//! (null handle) rather than returning an error; callers test
//! [`CStream::is_open`]. Forwarding an operation to an empty wrapper does
//! not touch libc — the C primitives have undefined behavior on a null
//! `FILE *` — and instead returns the primitive's own failure sentinel:
//! `EOF` for character and flush operations, `0` elements for block
//! transfer, `-1` for positioning, `None`/`false` for the option and bool
//! forms, and a no-op for `rewind`/`clearerr`.

use std::ffi::{CStr, CString};
use std::fmt;
use std::mem::{self, MaybeUninit};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr;
use std::slice;

use libc::{c_int, c_long, c_ulong};

use crate::byte_order::{ByteOrder, Uint};
use crate::scalar::Scalar;

/// Seek origin for [`CStream::fseek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// From the beginning of the stream (`SEEK_SET`).
    Set,
    /// From the current position (`SEEK_CUR`).
    Current,
    /// From the end of the stream (`SEEK_END`).
    End,
}

impl Whence {
    /// The raw `SEEK_*` constant.
    #[must_use]
    pub const fn as_raw(self) -> c_int {
        match self {
            Self::Set => libc::SEEK_SET,
            Self::Current => libc::SEEK_CUR,
            Self::End => libc::SEEK_END,
        }
    }
}

/// Buffering discipline for [`CStream::set_buffer`].
///
/// The buffer itself is always allocated and owned by the C library; the
/// caller-supplied-buffer form of `setvbuf` is not exposed because the
/// buffer would have to outlive the stream, which cannot be expressed
/// safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferMode {
    /// Fully buffered with a buffer of the given size (`_IOFBF`).
    Full(usize),
    /// Line buffered with a buffer of the given size (`_IOLBF`).
    Line(usize),
    /// Unbuffered (`_IONBF`).
    Unbuffered,
}

/// An opaque stream position captured by [`CStream::fgetpos`].
#[derive(Clone, Copy)]
pub struct StreamPosition(libc::fpos_t);

impl fmt::Debug for StreamPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StreamPosition(..)")
    }
}

/// A single-owner wrapper around a C stream handle.
///
/// The wrapper is either open (owning one `*mut libc::FILE`) or empty.
/// Dropping an open wrapper closes the handle; dropping an empty one is a
/// no-op. The type is deliberately not `Clone`: the underlying resource has
/// single-owner close semantics, and duplicating an owning handle would
/// make a double close reachable. Ownership transfers by Rust move
/// (`mem::take` and `mem::swap` compose with the empty state).
///
/// The raw pointer member makes the type `!Send` and `!Sync`; a single
/// instance cannot be used from multiple threads.
#[derive(Debug)]
pub struct CStream {
    handle: *mut libc::FILE,
}

fn c_path(path: &Path) -> Option<CString> {
    CString::new(path.as_os_str().as_bytes()).ok()
}

fn c_mode(mode: &str) -> Option<CString> {
    CString::new(mode).ok()
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

impl CStream {
    /// Creates an empty wrapper owning no handle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handle: ptr::null_mut(),
        }
    }

    /// Opens `path` with the given C mode string (`"r"`, `"wb"`, `"a+"`, ...).
    ///
    /// On failure — including a path or mode that cannot be represented as a
    /// C string — the returned wrapper is empty. There is no error value;
    /// test with [`is_open`](Self::is_open).
    #[must_use]
    pub fn open<P: AsRef<Path>>(path: P, mode: &str) -> Self {
        let (Some(cpath), Some(cmode)) = (c_path(path.as_ref()), c_mode(mode)) else {
            return Self::new();
        };
        // SAFETY: both pointers reference valid NUL-terminated strings for
        // the duration of the call.
        let handle = unsafe { libc::fopen(cpath.as_ptr(), cmode.as_ptr()) };
        Self { handle }
    }

    /// Takes ownership of an existing raw handle unconditionally.
    ///
    /// # Safety
    ///
    /// `handle` must be null or a valid open stream that no other code will
    /// close. The wrapper closes it on drop.
    #[must_use]
    pub const unsafe fn from_raw(handle: *mut libc::FILE) -> Self {
        Self { handle }
    }

    /// Returns `true` if the wrapper owns a handle.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.handle.is_null()
    }

    /// Returns the owned handle without transferring ownership.
    #[must_use]
    pub fn as_ptr(&self) -> *mut libc::FILE {
        self.handle
    }

    /// Closes the currently owned handle (if any) and adopts `handle`.
    ///
    /// This is the single "close old, adopt new" site; drop routes through
    /// it with a null replacement.
    ///
    /// # Safety
    ///
    /// `handle` must be null or a valid open stream that no other code will
    /// close.
    pub unsafe fn reset(&mut self, handle: *mut libc::FILE) {
        let old = mem::replace(&mut self.handle, handle);
        if !old.is_null() {
            // SAFETY: `old` was owned by this wrapper and is closed exactly
            // once here.
            unsafe { libc::fclose(old) };
        }
    }

    /// Relinquishes ownership of the handle without closing it.
    ///
    /// The wrapper becomes empty; the caller is responsible for the
    /// returned handle's lifetime thereafter.
    #[must_use = "the returned handle must be closed or re-adopted, or it leaks"]
    pub fn release(&mut self) -> *mut libc::FILE {
        mem::replace(&mut self.handle, ptr::null_mut())
    }

    /// Exchanges owned handles with `other`. No I/O side effects.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.handle, &mut other.handle);
    }
}

impl Default for CStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CStream {
    fn drop(&mut self) {
        // SAFETY: replacing with null; the owned handle (if any) is closed
        // exactly once.
        unsafe { self.reset(ptr::null_mut()) };
    }
}

impl PartialEq for CStream {
    /// Two wrappers are equal iff they reference the identical handle,
    /// including both being empty.
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for CStream {}

// ---------------------------------------------------------------------------
// File access
// ---------------------------------------------------------------------------

impl CStream {
    /// Closes the owned handle and returns the raw `fclose` status.
    ///
    /// The wrapper becomes empty. Returns `EOF` if it already was.
    pub fn fclose(&mut self) -> c_int {
        let handle = self.release();
        if handle.is_null() {
            return libc::EOF;
        }
        // SAFETY: the handle was owned by this wrapper and is closed exactly
        // once here.
        unsafe { libc::fclose(handle) }
    }

    /// Flushes buffered output. Equivalent to C `fflush`.
    pub fn fflush(&mut self) -> c_int {
        if self.handle.is_null() {
            return libc::EOF;
        }
        // SAFETY: handle is non-null and owned by this wrapper.
        unsafe { libc::fflush(self.handle) }
    }

    /// Re-targets the stream at `path` under `mode`, reusing the handle.
    ///
    /// Returns `true` on success. On primitive failure the wrapper becomes
    /// empty, because `freopen` frees the handle whether or not the reopen
    /// succeeds. If the path or mode cannot be represented as a C string the
    /// stream is left untouched and `false` is returned.
    pub fn freopen<P: AsRef<Path>>(&mut self, path: P, mode: &str) -> bool {
        if self.handle.is_null() {
            return false;
        }
        let (Some(cpath), Some(cmode)) = (c_path(path.as_ref()), c_mode(mode)) else {
            return false;
        };
        // SAFETY: handle is non-null and owned; freopen consumes it on both
        // success and failure, so ownership passes to the returned pointer.
        self.handle = unsafe { libc::freopen(cpath.as_ptr(), cmode.as_ptr(), self.handle) };
        !self.handle.is_null()
    }

    /// Sets the buffering discipline. Equivalent to C `setvbuf` with a
    /// library-managed buffer.
    ///
    /// Must be called before the first I/O operation on the stream, per the
    /// C contract. Returns `0` on success.
    pub fn set_buffer(&mut self, mode: BufferMode) -> c_int {
        if self.handle.is_null() {
            return libc::EOF;
        }
        let (flag, size) = match mode {
            BufferMode::Full(size) => (libc::_IOFBF, size),
            BufferMode::Line(size) => (libc::_IOLBF, size),
            BufferMode::Unbuffered => (libc::_IONBF, 0),
        };
        // SAFETY: a null buffer asks the implementation to manage its own
        // storage of the requested size.
        unsafe { libc::setvbuf(self.handle, ptr::null_mut(), flag, size) }
    }
}

// ---------------------------------------------------------------------------
// Direct input/output
// ---------------------------------------------------------------------------

impl CStream {
    /// Reads up to `buf.len()` whole elements into `buf`.
    ///
    /// Equivalent to C `fread(buf, size_of::<T>(), buf.len())`. Returns the
    /// number of whole elements read; a trailing partial element is not
    /// surfaced.
    pub fn fread<T: Scalar>(&mut self, buf: &mut [T]) -> usize {
        if self.handle.is_null() || buf.is_empty() {
            return 0;
        }
        // SAFETY: `buf` is valid for writes of `buf.len()` elements of
        // `size_of::<T>()` bytes each; fread writes at most that many whole
        // elements, and every bit pattern is a valid `T` (Scalar is sealed
        // to plain-data types).
        unsafe {
            libc::fread(
                buf.as_mut_ptr().cast(),
                mem::size_of::<T>(),
                buf.len(),
                self.handle,
            )
        }
    }

    /// Writes every element of `data`.
    ///
    /// Equivalent to C `fwrite(data, size_of::<T>(), data.len())`. Returns
    /// the number of whole elements written.
    pub fn fwrite<T: Scalar>(&mut self, data: &[T]) -> usize {
        if self.handle.is_null() || data.is_empty() {
            return 0;
        }
        // SAFETY: `data` is valid for reads of `data.len()` elements.
        unsafe {
            libc::fwrite(
                data.as_ptr().cast(),
                mem::size_of::<T>(),
                data.len(),
                self.handle,
            )
        }
    }

    /// Reads a block of up to `count` elements into a freshly allocated
    /// buffer, sized down to the number of elements actually read.
    ///
    /// `count == 0` returns an empty buffer immediately, with no I/O.
    /// Allocation failure aborts through the standard allocation failure
    /// path; it is not a recoverable result.
    #[must_use]
    pub fn read_block<T: Scalar>(&mut self, count: usize) -> Vec<T> {
        if count == 0 {
            return Vec::new();
        }
        let mut buf = vec![T::ZERO; count];
        let got = self.fread(&mut buf);
        buf.truncate(got);
        buf
    }

    /// Writes every element of `data`, returning the count actually written.
    pub fn write_block<T: Scalar>(&mut self, data: &[T]) -> usize {
        self.fwrite(data)
    }

    /// Reads exactly one element into `value`.
    ///
    /// Returns `true` iff one whole element was read. On failure `value`
    /// holds whatever the raw read left there.
    pub fn read_into<T: Scalar>(&mut self, value: &mut T) -> bool {
        self.fread(slice::from_mut(value)) == 1
    }

    /// Reads one element by value, or `None` if exactly one element could
    /// not be read. Never returns a partially-initialized value.
    pub fn read_value<T: Scalar>(&mut self) -> Option<T> {
        let mut value = T::ZERO;
        self.read_into(&mut value).then_some(value)
    }

    /// Writes a single element. Returns `true` iff it was written whole.
    pub fn write_value<T: Scalar>(&mut self, value: &T) -> bool {
        self.fwrite(slice::from_ref(value)) == 1
    }
}

// ---------------------------------------------------------------------------
// Byte-order-aware reads
// ---------------------------------------------------------------------------

impl CStream {
    /// Reads one unsigned integer and applies the byte-order transform for
    /// `order`.
    ///
    /// Returns `false` without applying any transform if the raw read did
    /// not consume exactly one element.
    pub fn read_uint_into<T: Uint>(&mut self, value: &mut T, order: ByteOrder) -> bool {
        if !self.read_into(value) {
            return false;
        }
        *value = value.decode(order);
        true
    }

    /// Reads one unsigned integer in the given byte order, or `None` on a
    /// short read.
    pub fn read_uint<T: Uint>(&mut self, order: ByteOrder) -> Option<T> {
        let mut value = T::ZERO;
        self.read_uint_into(&mut value, order).then_some(value)
    }

    /// Reads a little-endian unsigned integer and converts it to host order.
    pub fn read_uint_little_into<T: Uint>(&mut self, value: &mut T) -> bool {
        self.read_uint_into(value, ByteOrder::LittleEndian)
    }

    /// Reads a big-endian unsigned integer and converts it to host order.
    pub fn read_uint_big_into<T: Uint>(&mut self, value: &mut T) -> bool {
        self.read_uint_into(value, ByteOrder::BigEndian)
    }

    /// Reads an unsigned integer and unconditionally reverses its bytes.
    pub fn read_uint_swapped_into<T: Uint>(&mut self, value: &mut T) -> bool {
        self.read_uint_into(value, ByteOrder::Swapped)
    }

    /// Reads an unsigned integer already in host order.
    pub fn read_uint_host_into<T: Uint>(&mut self, value: &mut T) -> bool {
        self.read_uint_into(value, ByteOrder::Host)
    }

    /// Value form of [`read_uint_little_into`](Self::read_uint_little_into).
    pub fn read_uint_little<T: Uint>(&mut self) -> Option<T> {
        self.read_uint(ByteOrder::LittleEndian)
    }

    /// Value form of [`read_uint_big_into`](Self::read_uint_big_into).
    pub fn read_uint_big<T: Uint>(&mut self) -> Option<T> {
        self.read_uint(ByteOrder::BigEndian)
    }

    /// Value form of [`read_uint_swapped_into`](Self::read_uint_swapped_into).
    pub fn read_uint_swapped<T: Uint>(&mut self) -> Option<T> {
        self.read_uint(ByteOrder::Swapped)
    }

    /// Value form of [`read_uint_host_into`](Self::read_uint_host_into).
    pub fn read_uint_host<T: Uint>(&mut self) -> Option<T> {
        self.read_uint(ByteOrder::Host)
    }
}

// ---------------------------------------------------------------------------
// Unformatted input/output
// ---------------------------------------------------------------------------

impl CStream {
    /// Reads one character. Equivalent to C `fgetc`; returns `EOF` at end of
    /// stream or on error.
    pub fn fgetc(&mut self) -> c_int {
        if self.handle.is_null() {
            return libc::EOF;
        }
        // SAFETY: handle is non-null and owned by this wrapper.
        unsafe { libc::fgetc(self.handle) }
    }

    /// Reads at most `buf.len() - 1` bytes, stopping after a newline.
    ///
    /// Equivalent to C `fgets`. Returns the line bytes (newline included,
    /// NUL excluded), or `None` at end of stream, on error, or if `buf` has
    /// fewer than two bytes.
    pub fn fgets<'a>(&mut self, buf: &'a mut [u8]) -> Option<&'a [u8]> {
        if self.handle.is_null() || buf.len() < 2 {
            return None;
        }
        let count = c_int::try_from(buf.len()).unwrap_or(c_int::MAX);
        // SAFETY: `buf` holds at least `count` writable bytes; fgets writes
        // at most `count - 1` bytes plus a terminating NUL.
        let ret = unsafe { libc::fgets(buf.as_mut_ptr().cast(), count, self.handle) };
        if ret.is_null() {
            return None;
        }
        let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
        Some(&buf[..len])
    }

    /// Reads one line of at most `max` bytes into an owned buffer.
    ///
    /// Convenience form of [`fgets`](Self::fgets).
    pub fn read_line(&mut self, max: usize) -> Option<Vec<u8>> {
        let mut buf = vec![0u8; max.max(2)];
        let len = self.fgets(&mut buf)?.len();
        buf.truncate(len);
        Some(buf)
    }

    /// Writes one byte. Equivalent to C `fputc`; returns the byte written or
    /// `EOF` on error.
    pub fn fputc(&mut self, byte: u8) -> c_int {
        if self.handle.is_null() {
            return libc::EOF;
        }
        // SAFETY: handle is non-null and owned by this wrapper.
        unsafe { libc::fputc(c_int::from(byte), self.handle) }
    }

    /// Writes a NUL-terminated string. Equivalent to C `fputs`.
    pub fn fputs(&mut self, text: &CStr) -> c_int {
        if self.handle.is_null() {
            return libc::EOF;
        }
        // SAFETY: handle is non-null; `text` is NUL-terminated.
        unsafe { libc::fputs(text.as_ptr(), self.handle) }
    }

    /// Pushes one byte back onto the stream. Equivalent to C `ungetc`; one
    /// byte of push-back is guaranteed.
    pub fn ungetc(&mut self, byte: u8) -> c_int {
        if self.handle.is_null() {
            return libc::EOF;
        }
        // SAFETY: handle is non-null and owned by this wrapper.
        unsafe { libc::ungetc(c_int::from(byte), self.handle) }
    }
}

// ---------------------------------------------------------------------------
// Formatted input/output
// ---------------------------------------------------------------------------

impl CStream {
    /// Writes formatted text, the `format_args!` rendition of C `fprintf`.
    ///
    /// Usable through the `write!` macro. Returns the byte count written, or
    /// `EOF` if the stream is empty or the write came up short. The text is
    /// rendered in Rust and pushed through the block-write primitive, so C
    /// format-string semantics do not apply.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> c_int {
        if self.handle.is_null() {
            return libc::EOF;
        }
        let text = fmt::format(args);
        let written = self.fwrite(text.as_bytes());
        if written == text.len() {
            c_int::try_from(written).unwrap_or(c_int::MAX)
        } else {
            libc::EOF
        }
    }

    /// Scans one whitespace-delimited signed integer, the `%ld` conversion
    /// of C `fscanf`.
    pub fn scan_long(&mut self) -> Option<c_long> {
        if self.handle.is_null() {
            return None;
        }
        let mut value: c_long = 0;
        // SAFETY: the %ld conversion stores exactly one c_long through the
        // pointer; the call is a concrete variadic invocation.
        let matched =
            unsafe { libc::fscanf(self.handle, c"%ld".as_ptr(), &mut value as *mut c_long) };
        (matched == 1).then_some(value)
    }

    /// Scans one whitespace-delimited unsigned integer, the `%lu` conversion
    /// of C `fscanf`.
    pub fn scan_ulong(&mut self) -> Option<c_ulong> {
        if self.handle.is_null() {
            return None;
        }
        let mut value: c_ulong = 0;
        // SAFETY: the %lu conversion stores exactly one c_ulong through the
        // pointer.
        let matched =
            unsafe { libc::fscanf(self.handle, c"%lu".as_ptr(), &mut value as *mut c_ulong) };
        (matched == 1).then_some(value)
    }

    /// Scans one whitespace-delimited floating-point value, the `%lf`
    /// conversion of C `fscanf`.
    pub fn scan_double(&mut self) -> Option<f64> {
        if self.handle.is_null() {
            return None;
        }
        let mut value: f64 = 0.0;
        // SAFETY: the %lf conversion stores exactly one double through the
        // pointer.
        let matched =
            unsafe { libc::fscanf(self.handle, c"%lf".as_ptr(), &mut value as *mut f64) };
        (matched == 1).then_some(value)
    }
}

// ---------------------------------------------------------------------------
// File positioning
// ---------------------------------------------------------------------------

impl CStream {
    /// Returns the current position, or `-1` on failure. Equivalent to C
    /// `ftell`.
    #[must_use]
    pub fn ftell(&self) -> c_long {
        if self.handle.is_null() {
            return -1;
        }
        // SAFETY: handle is non-null and owned by this wrapper.
        unsafe { libc::ftell(self.handle) }
    }

    /// Seeks to `offset` relative to `whence`. Equivalent to C `fseek`;
    /// returns `0` on success.
    pub fn fseek(&mut self, offset: c_long, whence: Whence) -> c_int {
        if self.handle.is_null() {
            return -1;
        }
        // SAFETY: handle is non-null and owned by this wrapper.
        unsafe { libc::fseek(self.handle, offset, whence.as_raw()) }
    }

    /// Captures the current position as an opaque marker. Equivalent to C
    /// `fgetpos`.
    #[must_use]
    pub fn fgetpos(&self) -> Option<StreamPosition> {
        if self.handle.is_null() {
            return None;
        }
        let mut pos = MaybeUninit::<libc::fpos_t>::uninit();
        // SAFETY: fgetpos initializes `*pos` when it returns 0.
        let rc = unsafe { libc::fgetpos(self.handle, pos.as_mut_ptr()) };
        if rc != 0 {
            return None;
        }
        // SAFETY: rc == 0, so the position was written.
        Some(StreamPosition(unsafe { pos.assume_init() }))
    }

    /// Restores a position captured by [`fgetpos`](Self::fgetpos).
    /// Equivalent to C `fsetpos`; returns `0` on success.
    pub fn fsetpos(&mut self, pos: &StreamPosition) -> c_int {
        if self.handle.is_null() {
            return -1;
        }
        // SAFETY: handle is non-null; `pos` was produced by fgetpos.
        unsafe { libc::fsetpos(self.handle, &pos.0) }
    }

    /// Rewinds to the start of the stream and clears the error flags.
    /// Equivalent to C `rewind`.
    pub fn rewind(&mut self) {
        if self.handle.is_null() {
            return;
        }
        // SAFETY: handle is non-null and owned by this wrapper.
        unsafe { libc::rewind(self.handle) };
    }
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

impl CStream {
    /// Clears the end-of-file and error flags. Equivalent to C `clearerr`.
    pub fn clearerr(&mut self) {
        if self.handle.is_null() {
            return;
        }
        // SAFETY: handle is non-null and owned by this wrapper.
        unsafe { libc::clearerr(self.handle) };
    }

    /// Returns `true` if the end-of-file flag is set. Equivalent to C
    /// `feof`; an empty wrapper reports `false`.
    #[must_use]
    pub fn feof(&self) -> bool {
        if self.handle.is_null() {
            return false;
        }
        // SAFETY: handle is non-null and owned by this wrapper.
        unsafe { libc::feof(self.handle) != 0 }
    }

    /// Returns `true` if the error flag is set. Equivalent to C `ferror`;
    /// an empty wrapper reports `false`.
    #[must_use]
    pub fn ferror(&self) -> bool {
        if self.handle.is_null() {
            return false;
        }
        // SAFETY: handle is non-null and owned by this wrapper.
        unsafe { libc::ferror(self.handle) != 0 }
    }

    /// Prints `prefix` and the last error to standard error. Equivalent to C
    /// `perror`.
    pub fn perror(prefix: &CStr) {
        // SAFETY: `prefix` is NUL-terminated.
        unsafe { libc::perror(prefix.as_ptr()) };
    }
}

// ---------------------------------------------------------------------------
// Operations on files
// ---------------------------------------------------------------------------

impl CStream {
    /// Removes a path. Equivalent to C `remove`; returns its raw status
    /// (`0` on success).
    pub fn remove<P: AsRef<Path>>(path: P) -> c_int {
        let Some(cpath) = c_path(path.as_ref()) else {
            return -1;
        };
        // SAFETY: the pointer references a valid NUL-terminated string.
        unsafe { libc::remove(cpath.as_ptr()) }
    }

    /// Renames a path. Equivalent to C `rename`; returns its raw status
    /// (`0` on success).
    pub fn rename<P: AsRef<Path>, Q: AsRef<Path>>(old: P, new: Q) -> c_int {
        let (Some(cold), Some(cnew)) = (c_path(old.as_ref()), c_path(new.as_ref())) else {
            return -1;
        };
        // SAFETY: both pointers reference valid NUL-terminated strings.
        unsafe { libc::rename(cold.as_ptr(), cnew.as_ptr()) }
    }

    /// Creates a uniquely named temporary stream, removed automatically when
    /// closed. Equivalent to C `tmpfile`; the wrapper is empty on failure.
    ///
    /// There is deliberately no `tmpnam`-style name generator: generated
    /// names race against other processes between generation and use.
    #[must_use]
    pub fn tmpfile() -> Self {
        // SAFETY: tmpfile returns an owned handle or null; both are valid
        // wrapper states.
        let handle = unsafe { libc::tmpfile() };
        Self { handle }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stream_reports_sentinels() {
        let mut stream = CStream::new();
        assert!(!stream.is_open());
        assert_eq!(stream.fgetc(), libc::EOF);
        assert_eq!(stream.fputc(b'x'), libc::EOF);
        let mut buf = [0u8; 4];
        assert_eq!(stream.fread(buf.as_mut_slice()), 0);
        assert_eq!(stream.fwrite(buf.as_slice()), 0);
        assert_eq!(stream.ftell(), -1);
        assert_eq!(stream.fseek(0, Whence::Set), -1);
        assert!(stream.fgetpos().is_none());
        assert!(!stream.feof());
        assert!(!stream.ferror());
        assert_eq!(stream.fflush(), libc::EOF);
        assert_eq!(stream.fclose(), libc::EOF);
    }

    #[test]
    fn default_equals_empty() {
        assert_eq!(CStream::default(), CStream::new());
    }

    #[test]
    fn tmpfile_roundtrips_bytes() {
        let mut stream = CStream::tmpfile();
        assert!(stream.is_open());
        assert_eq!(stream.write_block(b"hello".as_slice()), 5);
        stream.rewind();
        assert_eq!(stream.read_block::<u8>(5), b"hello");
    }

    #[test]
    fn read_block_zero_is_empty_without_io() {
        let mut stream = CStream::tmpfile();
        assert_eq!(stream.write_block(b"abc".as_slice()), 3);
        stream.rewind();
        let before = stream.ftell();
        assert!(stream.read_block::<u8>(0).is_empty());
        assert_eq!(stream.ftell(), before);
    }

    #[test]
    fn release_leaves_stream_open() {
        let mut stream = CStream::tmpfile();
        assert!(stream.is_open());
        let raw = stream.release();
        assert!(!stream.is_open());
        assert!(!raw.is_null());
        // SAFETY: raw was just released; re-adopting restores single
        // ownership.
        let mut adopted = unsafe { CStream::from_raw(raw) };
        assert_eq!(adopted.write_block(b"x".as_slice()), 1);
    }

    #[test]
    fn reset_adopts_new_handle() {
        let mut stream = CStream::tmpfile();
        let replacement = CStream::tmpfile().release();
        // SAFETY: replacement is an owned open handle.
        unsafe { stream.reset(replacement) };
        assert_eq!(stream.as_ptr(), replacement);
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut source = CStream::tmpfile();
        let raw = source.as_ptr();
        let taken = mem::take(&mut source);
        assert!(!source.is_open());
        assert_eq!(taken.as_ptr(), raw);
    }

    #[test]
    fn swap_exchanges_handles() {
        let mut a = CStream::tmpfile();
        let mut b = CStream::new();
        let raw = a.as_ptr();
        a.swap(&mut b);
        assert!(!a.is_open());
        assert_eq!(b.as_ptr(), raw);
    }

    #[test]
    fn equality_is_handle_identity() {
        let a = CStream::new();
        let b = CStream::new();
        assert_eq!(a, b);
        let c = CStream::tmpfile();
        assert_ne!(a, c);
    }

    #[test]
    fn write_fmt_reports_byte_count() {
        let mut stream = CStream::tmpfile();
        let n = write!(stream, "n={}", 42);
        assert_eq!(n, 4);
        stream.rewind();
        assert_eq!(stream.read_block::<u8>(4), b"n=42");
    }

    #[test]
    fn scan_long_reads_back_formatted_value() {
        let mut stream = CStream::tmpfile();
        write!(stream, "-137 junk");
        stream.rewind();
        assert_eq!(stream.scan_long(), Some(-137));
        assert_eq!(stream.scan_long(), None);
    }

    #[test]
    fn fgets_includes_newline() {
        let mut stream = CStream::tmpfile();
        write!(stream, "alpha\nbeta\n");
        stream.rewind();
        let mut buf = [0u8; 32];
        assert_eq!(stream.fgets(&mut buf), Some(b"alpha\n".as_slice()));
        assert_eq!(stream.fgets(&mut buf), Some(b"beta\n".as_slice()));
        assert_eq!(stream.fgets(&mut buf), None);
    }

    #[test]
    fn ungetc_pushes_one_byte_back() {
        let mut stream = CStream::tmpfile();
        write!(stream, "ab");
        stream.rewind();
        assert_eq!(stream.fgetc(), c_int::from(b'a'));
        assert_eq!(stream.ungetc(b'z'), c_int::from(b'z'));
        assert_eq!(stream.fgetc(), c_int::from(b'z'));
        assert_eq!(stream.fgetc(), c_int::from(b'b'));
    }

    #[test]
    fn fgetpos_fsetpos_restore_position() {
        let mut stream = CStream::tmpfile();
        write!(stream, "0123456789");
        stream.rewind();
        assert_eq!(stream.fgetc(), c_int::from(b'0'));
        let pos = stream.fgetpos().expect("position captured");
        assert_eq!(stream.fgetc(), c_int::from(b'1'));
        assert_eq!(stream.fsetpos(&pos), 0);
        assert_eq!(stream.fgetc(), c_int::from(b'1'));
    }

    #[test]
    fn feof_after_reading_past_end() {
        let mut stream = CStream::tmpfile();
        write!(stream, "x");
        stream.rewind();
        assert!(!stream.feof());
        assert_eq!(stream.fgetc(), c_int::from(b'x'));
        assert_eq!(stream.fgetc(), libc::EOF);
        assert!(stream.feof());
        stream.clearerr();
        assert!(!stream.feof());
    }
}
