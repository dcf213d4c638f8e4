//! Base-85 byte/text codec used for QR-friendly binary transport.
//!
//! Every 4-byte big-endian group maps to 5 alphabet characters. Inputs that
//! are not a multiple of 4 bytes are zero-padded before encoding and the
//! output is shortened by one character per padding byte, so encoded length
//! carries the exact byte length and `decode(encode(b)) == b` for all `b`.

pub mod fragment;

use crate::error::{Result, SeedkitError};

/// Z85 character set. The last character doubles as the decode pad digit.
pub const ALPHABET: &[u8; 85] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ.-:+=^!/*?&<>()[]{}@%$#";

const GROUP_BYTES: usize = 4;
const GROUP_CHARS: usize = 5;

/// Encode bytes into base-85 text. Infallible and deterministic.
pub fn encode(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    let pad = (GROUP_BYTES - bytes.len() % GROUP_BYTES) % GROUP_BYTES;
    let mut padded = bytes.to_vec();
    padded.resize(bytes.len() + pad, 0);

    let mut out = String::with_capacity(padded.len() / GROUP_BYTES * GROUP_CHARS);
    for chunk in padded.chunks_exact(GROUP_BYTES) {
        let mut value = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let mut group = [0u8; GROUP_CHARS];
        for slot in group.iter_mut().rev() {
            *slot = ALPHABET[(value % 85) as usize];
            value /= 85;
        }
        for digit in group {
            out.push(digit as char);
        }
    }

    // each padding byte shrinks the output by one character
    out.truncate(out.len() - pad);
    out
}

/// Decode base-85 text back into bytes.
///
/// Fails with `InvalidLength` when the length is congruent to 1 modulo 5
/// (no byte count encodes to such a string) and with `InvalidCharacter` for
/// anything outside the alphabet.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut chars: Vec<char> = text.chars().collect();
    if chars.len() % GROUP_CHARS == 1 {
        return Err(SeedkitError::InvalidLength { length: chars.len() });
    }

    let pad = (GROUP_CHARS - chars.len() % GROUP_CHARS) % GROUP_CHARS;
    chars.resize(chars.len() + pad, ALPHABET[84] as char);

    let mut out = Vec::with_capacity(chars.len() / GROUP_CHARS * GROUP_BYTES);
    for (group_index, group) in chars.chunks_exact(GROUP_CHARS).enumerate() {
        // accumulate in u64: a padded top group can sit above u32::MAX even
        // though every value produced by `encode` fits
        let mut value: u64 = 0;
        for (offset, &ch) in group.iter().enumerate() {
            let digit = digit_of(ch).ok_or(SeedkitError::InvalidCharacter {
                character: ch,
                position: group_index * GROUP_CHARS + offset,
            })?;
            value = value * 85 + digit as u64;
        }
        out.extend_from_slice(&(value as u32).to_be_bytes());
    }

    out.truncate(out.len() - pad);
    Ok(out)
}

fn digit_of(ch: char) -> Option<usize> {
    if !ch.is_ascii() {
        return None;
    }
    ALPHABET.iter().position(|&b| b == ch as u8)
}
