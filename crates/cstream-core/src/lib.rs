//! # cstream-core
//!
//! Owned C stream handles.
//!
//! This crate wraps the C stdio stream handle (`*mut libc::FILE`) in a
//! single-owner type, [`CStream`], that closes the handle exactly once and
//! transfers ownership by move only. On top of the raw forwarding layer it
//! adds typed block and scalar reads restricted to plain-data element types,
//! and byte-order-aware unsigned integer decoding.
//!
//! No `unsafe` code is permitted outside the FFI-facing stream module.

#![deny(unsafe_code)]

#[cfg(not(unix))]
compile_error!("cstream-core only supports Unix platforms.");

pub mod byte_order;
pub mod scalar;
#[allow(unsafe_code)]
pub mod stream;

pub use byte_order::{ByteOrder, Uint};
pub use scalar::Scalar;
pub use stream::{BufferMode, CStream, StreamPosition, Whence};
