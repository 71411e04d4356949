//! # eth-codec
//!
//! One entry point for the Ethereum codec and signing crates:
//!
//! - [`bytes`]: hex conversion, cursors and addresses
//! - [`rlp`]: Recursive-Length-Prefix encoding
//! - [`abi`]: contract ABI parameters, selectors and reverts
//! - [`ecdsa`]: secp256k1 and P-256 signatures
//!
//! Each crate keeps its own error type. [`Error`] wraps all of them and
//! classifies them with [`ErrorKind`].

pub mod error;
pub mod message;

pub use abi_codec as abi;
pub use codec_utils as bytes;
pub use ecdsa_signer as ecdsa;
pub use rlp_codec as rlp;

pub use alloy_primitives::{Address, I256, U256};
pub use error::{Error, ErrorKind};
pub use message::{
    keccak256, personal_message_hash, recover_personal_message_signer, sign_personal_message,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;
