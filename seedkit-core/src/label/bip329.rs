//! BIP-329 label interchange: newline-delimited JSON, one object per line,
//! as exported and imported by other wallets.

use crate::error::{Result, SeedkitError};
use crate::label::{parse, LabelRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bip329Label {
    #[serde(rename = "type")]
    pub kind: LabelKind,
    #[serde(rename = "ref")]
    pub reference: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spendable: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    Tx,
    Address,
    Output,
    Input,
}

impl Bip329Label {
    /// The embedded text/tags view of this label.
    pub fn record(&self) -> LabelRecord {
        parse(&self.label)
    }
}

/// Serialize labels to the NDJSON interchange form.
pub fn export(labels: &[Bip329Label]) -> Result<String> {
    let mut lines = Vec::with_capacity(labels.len());
    for label in labels {
        lines.push(serde_json::to_string(label)?);
    }
    Ok(lines.join("\n"))
}

/// Parse an import defensively.
///
/// Control characters are stripped and objects are recovered by scanning
/// flat `{...}` spans, so files with concatenated objects and no separators
/// still import. Nested JSON objects are not supported by this recovery
/// scan; a label whose object contains another object is skipped. Fails
/// with `NoValidLabels` when nothing parses.
pub fn parse_import(raw: &str) -> Result<Vec<Bip329Label>> {
    let cleaned: String = raw.chars().filter(|c| !c.is_control()).collect();

    let mut labels = Vec::new();
    let mut rest = cleaned.as_str();
    while let Some(open) = rest.find('{') {
        let candidate = &rest[open..];
        match candidate.find('}') {
            Some(close) => {
                if let Ok(label) = serde_json::from_str::<Bip329Label>(&candidate[..=close]) {
                    labels.push(label);
                }
                rest = &candidate[close + 1..];
            }
            None => break,
        }
    }

    if labels.is_empty() {
        tracing::warn!("label import contained no parseable objects");
        return Err(SeedkitError::NoValidLabels);
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_shape() {
        let labels = vec![
            Bip329Label {
                kind: LabelKind::Tx,
                reference: "f91d0a8a78462bc59398f2c5d7a84fcff491c26ba54c4833478b202796c8aafd"
                    .to_string(),
                label: "Transaction".to_string(),
                spendable: None,
            },
            Bip329Label {
                kind: LabelKind::Output,
                reference: "f91d0a8a78462bc59398f2c5d7a84fcff491c26ba54c4833478b202796c8aafd:1"
                    .to_string(),
                label: "Change".to_string(),
                spendable: Some(false),
            },
        ];
        let out = export(&labels).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"type\":\"tx\""));
        assert!(lines[0].contains("\"ref\":"));
        assert!(!lines[0].contains("spendable"));
        assert!(lines[1].contains("\"spendable\":false"));
    }

    #[test]
    fn test_import_round_trip() {
        let labels = vec![Bip329Label {
            kind: LabelKind::Address,
            reference: "bc1q8d968eg8ua3dk8mkql9d0vj35nzplsd4zmulus".to_string(),
            label: "Donations #nokyc".to_string(),
            spendable: None,
        }];
        let exported = export(&labels).unwrap();
        let imported = parse_import(&exported).unwrap();
        assert_eq!(imported, labels);
        assert_eq!(imported[0].record().tags, vec!["nokyc"]);
    }

    #[test]
    fn test_import_concatenated_objects() {
        let raw = r#"{"type":"tx","ref":"aa","label":"one"}{"type":"tx","ref":"bb","label":"two"}"#;
        let imported = parse_import(raw).unwrap();
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[1].reference, "bb");
    }

    #[test]
    fn test_import_strips_control_characters() {
        let raw = "{\"type\":\"tx\",\"ref\":\u{0000}\"aa\",\"label\":\"one\"}\u{0007}";
        let imported = parse_import(raw).unwrap();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].reference, "aa");
    }

    #[test]
    fn test_import_skips_garbage_between_objects() {
        let raw = r#"garbage {"type":"address","ref":"x","label":"y"} trailing"#;
        let imported = parse_import(raw).unwrap();
        assert_eq!(imported.len(), 1);
    }

    #[test]
    fn test_import_nothing_valid() {
        for raw in ["", "not json at all", "{\"type\":\"nope\"}"] {
            assert!(matches!(
                parse_import(raw),
                Err(SeedkitError::NoValidLabels)
            ));
        }
    }
}
