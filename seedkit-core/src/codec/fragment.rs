//! Multipart fragment encoding for animated-QR transport of PSBTs.
//!
//! A binary payload is base-85 encoded and split into fixed-size parts, each
//! wrapped as `ur:psbt/<seq>of<total>/<body>` so a scanner can reassemble
//! them in any order.

use crate::codec;
use crate::error::{Result, SeedkitError};
use base64::{engine::general_purpose, Engine as _};
use std::collections::BTreeMap;

const SCHEME: &str = "ur:psbt/";

/// Split a payload into displayable fragments of at most `fragment_len`
/// encoded characters each.
pub fn fragments(payload: &[u8], fragment_len: usize) -> Result<Vec<String>> {
    if fragment_len == 0 {
        return Err(SeedkitError::config("Fragment length must be non-zero"));
    }

    let encoded = codec::encode(payload);
    let chars: Vec<char> = encoded.chars().collect();
    let total = chars.chunks(fragment_len).count().max(1);

    let mut out = Vec::with_capacity(total);
    if chars.is_empty() {
        out.push(format!("{}1of1/", SCHEME));
        return Ok(out);
    }
    for (index, chunk) in chars.chunks(fragment_len).enumerate() {
        let body: String = chunk.iter().collect();
        out.push(format!("{}{}of{}/{}", SCHEME, index + 1, total, body));
    }
    Ok(out)
}

/// Split a base64 PSBT the way wallets hand them over.
pub fn fragments_from_base64(psbt: &str, fragment_len: usize) -> Result<Vec<String>> {
    let payload = general_purpose::STANDARD
        .decode(psbt.trim())
        .map_err(|e| SeedkitError::config(format!("Invalid base64 payload: {}", e)))?;
    fragments(&payload, fragment_len)
}

/// Drop repeated fragments, preserving first-seen order. Animated-QR
/// capture usually yields the same part many times.
pub fn dedup_fragments(fragments: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    fragments
        .iter()
        .filter(|f| seen.insert(f.as_str()))
        .cloned()
        .collect()
}

/// Reassemble a fragment set back into the original payload.
///
/// Accepts duplicates and arbitrary order; fails with `InvalidLength` when
/// a sequence number is missing from the set.
pub fn reassemble(fragments: &[String]) -> Result<Vec<u8>> {
    let mut parts: BTreeMap<usize, String> = BTreeMap::new();
    let mut total: usize = 0;

    for fragment in fragments {
        let (seq, count, body) = parse_fragment(fragment)?;
        if total == 0 {
            total = count;
        } else if total != count {
            return Err(SeedkitError::config(format!(
                "Fragment count mismatch: {} vs {}",
                total, count
            )));
        }
        parts.entry(seq).or_insert_with(|| body.to_string());
    }

    if total == 0 || parts.len() != total {
        return Err(SeedkitError::InvalidLength {
            length: parts.len(),
        });
    }

    let mut encoded = String::new();
    for seq in 1..=total {
        match parts.get(&seq) {
            Some(body) => encoded.push_str(body),
            None => return Err(SeedkitError::InvalidLength { length: parts.len() }),
        }
    }
    codec::decode(&encoded)
}

fn parse_fragment(fragment: &str) -> Result<(usize, usize, &str)> {
    let rest = fragment
        .strip_prefix(SCHEME)
        .ok_or_else(|| SeedkitError::config(format!("Not a psbt fragment: {}", fragment)))?;
    let (header, body) = rest
        .split_once('/')
        .ok_or_else(|| SeedkitError::config(format!("Malformed fragment header: {}", fragment)))?;
    let (seq, count) = header
        .split_once("of")
        .ok_or_else(|| SeedkitError::config(format!("Malformed fragment header: {}", fragment)))?;
    let seq: usize = seq
        .parse()
        .map_err(|_| SeedkitError::config(format!("Bad sequence number in: {}", fragment)))?;
    let count: usize = count
        .parse()
        .map_err(|_| SeedkitError::config(format!("Bad fragment count in: {}", fragment)))?;
    if seq == 0 || seq > count {
        return Err(SeedkitError::config(format!(
            "Sequence {} out of range 1..={}",
            seq, count
        )));
    }
    Ok((seq, count, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_and_reassemble() {
        let payload: Vec<u8> = (0u16..200).map(|i| (i % 256) as u8).collect();
        let frags = fragments(&payload, 40).unwrap();
        assert!(frags.len() > 1);
        assert!(frags[0].starts_with("ur:psbt/1of"));
        assert_eq!(reassemble(&frags).unwrap(), payload);
    }

    #[test]
    fn test_reassemble_out_of_order_with_duplicates() {
        let payload = b"partially signed bitcoin transaction".to_vec();
        let mut frags = fragments(&payload, 10).unwrap();
        frags.reverse();
        frags.push(frags[0].clone());
        assert_eq!(reassemble(&frags).unwrap(), payload);
    }

    #[test]
    fn test_missing_part_fails() {
        let payload = vec![0xabu8; 64];
        let mut frags = fragments(&payload, 20).unwrap();
        frags.remove(1);
        match reassemble(&frags) {
            Err(SeedkitError::InvalidLength { .. }) => {}
            other => panic!("expected InvalidLength, got {:?}", other),
        }
    }

    #[test]
    fn test_dedup_preserves_order() {
        let frags = vec![
            "ur:psbt/2of2/bb".to_string(),
            "ur:psbt/1of2/aa".to_string(),
            "ur:psbt/2of2/bb".to_string(),
        ];
        let unique = dedup_fragments(&frags);
        assert_eq!(unique.len(), 2);
        assert!(unique[0].ends_with("/bb"));
        assert!(unique[1].ends_with("/aa"));
    }

    #[test]
    fn test_base64_input() {
        let payload = b"cHNidP8BAHECAAAA";
        let encoded = general_purpose::STANDARD.encode(payload);
        let frags = fragments_from_base64(&encoded, 64).unwrap();
        assert_eq!(reassemble(&frags).unwrap(), payload.to_vec());
    }

    #[test]
    fn test_foreign_string_rejected() {
        let frags = vec!["bc1qsomething".to_string()];
        assert!(matches!(
            reassemble(&frags),
            Err(SeedkitError::Config(_))
        ));
    }
}
