//! seedkit - codec and account-secret toolkit for Bitcoin wallets
//!
//! The correctness-critical utility core a wallet needs around an external
//! signing toolkit: base-85 transport encoding, BIP-39 wordlist conversion,
//! tag-embedded labels with BIP-329 interchange, address script
//! classification and PIN-rotation of encrypted account secrets. Key
//! derivation, signing and networking stay with external libraries.

pub mod address;
pub mod cipher;
pub mod codec;
pub mod error;
pub mod label;
pub mod rekey;
pub mod storage;
pub mod types;
pub mod wordlist;

pub use address::{classify, ScriptVersion};
pub use cipher::{CipherPort, PinCipher};
pub use error::{Result, SeedkitError};
pub use label::LabelRecord;
pub use rekey::{re_encrypt_all, ReEncryptOutcome};
pub use types::{Account, AccountKeyRecord, EncryptedSecret, PlainSecret, Secret};
