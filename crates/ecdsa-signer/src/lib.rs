//! # ecdsa-signer
//!
//! ECDSA key generation, signing, verification and public key recovery
//! over secp256k1 and NIST P-256.
//!
//! Curves are unit structs implementing [`Curve`]. Recovery is only
//! available on [`RecoverableCurve`]s, which rules it out for P-256 at
//! compile time.
//!
//! ```
//! use ecdsa_signer::{get_public_key, sign, verify, PrivateKey, Secp256k1, SignOptions, VerifyOptions};
//!
//! let key = PrivateKey::new([0x42; 32]);
//! let public = get_public_key(&Secp256k1, &key).unwrap();
//! let sig = sign(&Secp256k1, b"hello", &key, &SignOptions::hashed()).unwrap();
//! assert!(verify(&Secp256k1, b"hello", &public, &sig, &VerifyOptions::hashed()).unwrap());
//! ```

pub mod curve;
pub mod ecdsa;
pub mod error;
pub mod keys;
pub mod random;
pub mod secp256k1;
pub mod secp256r1;
pub mod signature;

pub use curve::{Curve, CurveParams, RecoverableCurve};
pub use ecdsa::{
    decompress, generate_private_key, generate_private_key_with, get_public_key,
    recover_address, recover_public_key, sign, verify, SignOptions, VerifyOptions,
};
pub use error::EcdsaError;
pub use keys::{PrivateKey, PublicKey};
pub use secp256k1::Secp256k1;
pub use secp256r1::P256;
pub use signature::{v_to_y_parity, y_parity_to_eip155_v, y_parity_to_v, Signature};
