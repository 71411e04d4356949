//! # codec-utils
//!
//! Byte-level building blocks shared by the RLP, ABI and ECDSA crates:
//! a bounds-checked read/write cursor, strict hex conversion, and Ethereum
//! address helpers.

pub mod address;
pub mod cursor;
pub mod error;
pub mod hex;

pub use cursor::{Cursor, CursorMut};
pub use error::BytesError;
