use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A key's secret material, either ciphertext at rest or plain structured
/// data that is never persisted encrypted (watch-only imports).
///
/// Readers match exhaustively; there is no stringly-typed fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Secret {
    Encrypted(EncryptedSecret),
    Plain(PlainSecret),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSecret {
    pub ciphertext: String,
    /// Hex nonce tied to this record's identity. Never reused across
    /// different plaintexts under the same key.
    pub iv: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainSecret {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_descriptor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_descriptor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_public_key: Option<String>,
}

/// One key of an account, with whatever secret it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountKeyRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    pub secret: Secret,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub keys: Vec<AccountKeyRecord>,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: Utc::now(),
            keys: Vec::new(),
        }
    }

    /// True when every stored secret is in encrypted form.
    pub fn is_locked(&self) -> bool {
        self.keys
            .iter()
            .all(|key| matches!(key.secret, Secret::Encrypted(_)))
    }
}
