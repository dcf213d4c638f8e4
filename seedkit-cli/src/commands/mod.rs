pub mod account;
pub mod address;
pub mod codec;
pub mod label;
pub mod mnemonic;

pub use account::{handle_account_command, AccountCommands};
pub use address::{handle_address_command, AddressCommands};
pub use codec::{handle_codec_command, CodecCommands};
pub use label::{handle_label_command, LabelCommands};
pub use mnemonic::{handle_mnemonic_command, MnemonicCommands};
