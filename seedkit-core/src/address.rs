//! Heuristic script-version classification of Bitcoin address strings.
//!
//! Classification is prefix/length based and deliberately does not verify
//! checksums: it is meant for display grouping, not consensus validation.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptVersion {
    P2pkh,
    P2sh,
    P2wpkh,
    P2wsh,
    P2tr,
    Unknown,
}

impl fmt::Display for ScriptVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScriptVersion::P2pkh => "P2PKH",
            ScriptVersion::P2sh => "P2SH",
            ScriptVersion::P2wpkh => "P2WPKH",
            ScriptVersion::P2wsh => "P2WSH",
            ScriptVersion::P2tr => "P2TR",
            ScriptVersion::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

/// Classify an address string by the output script it implies.
///
/// Pure function of the string; unknown or malformed inputs map to
/// `ScriptVersion::Unknown`, never an error.
pub fn classify(address: &str) -> ScriptVersion {
    let lower = address.to_lowercase();

    // bech32 branch is case-insensitive
    if lower.starts_with("bc1") || lower.starts_with("tb1") {
        return match lower[3..].chars().next() {
            Some('p') => ScriptVersion::P2tr,
            Some('q') => match lower.chars().count() {
                42..=44 => ScriptVersion::P2wpkh,
                60..=62 => ScriptVersion::P2wsh,
                _ => ScriptVersion::Unknown,
            },
            _ => ScriptVersion::Unknown,
        };
    }

    if !address.is_empty() && address.chars().all(is_base58) {
        return match address.chars().next() {
            Some('1') | Some('m') | Some('n') => ScriptVersion::P2pkh,
            Some('3') | Some('2') => ScriptVersion::P2sh,
            _ => ScriptVersion::Unknown,
        };
    }

    ScriptVersion::Unknown
}

// Base58 drops 0, O, I and l
fn is_base58(c: char) -> bool {
    c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l')
}
