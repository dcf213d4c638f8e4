//! Key-rotation pipeline: decrypt every stored secret with the old key and
//! re-encrypt it with the new one.
//!
//! Each record keeps its IV across the rotation: the IV belongs to the
//! record's identity, and reuse is acceptable here only because the
//! plaintext is unchanged while the key changes. Accounts are processed
//! strictly one at a time so a failure never leaves an account with a mix
//! of old- and new-key ciphertexts.

use crate::cipher::CipherPort;
use crate::error::{Result, SeedkitError};
use crate::types::{Account, EncryptedSecret, PlainSecret, Secret};

#[derive(Debug)]
pub struct ReEncryptOutcome {
    /// Same order and length as the input: processed accounts carry
    /// new-key ciphertexts, the failing and later accounts are returned
    /// exactly as given.
    pub accounts: Vec<Account>,
    pub failure: Option<ReEncryptFailure>,
}

impl ReEncryptOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

#[derive(Debug)]
pub struct ReEncryptFailure {
    pub account_index: usize,
    pub key_index: usize,
    pub error: SeedkitError,
}

/// Rotate every encrypted secret in `accounts` from `old_key` to `new_key`.
///
/// Source records are never mutated; a new collection is produced. The
/// pipeline stops at the first failing record and reports the failing
/// account and key index. No retry: retrying with a wrong key cannot
/// succeed, and a partial account must not be committed.
pub async fn re_encrypt_all(
    accounts: &[Account],
    old_key: &str,
    new_key: &str,
    cipher: &dyn CipherPort,
) -> ReEncryptOutcome {
    let mut rotated = Vec::with_capacity(accounts.len());

    for (account_index, account) in accounts.iter().enumerate() {
        match re_encrypt_account(account, old_key, new_key, cipher).await {
            Ok(account) => {
                tracing::debug!(account = %account.name, "account re-encrypted");
                rotated.push(account);
            }
            Err((key_index, error)) => {
                tracing::warn!(
                    account = %account.name,
                    key_index,
                    "re-encryption stopped: {}",
                    error
                );
                rotated.extend(accounts[account_index..].iter().cloned());
                return ReEncryptOutcome {
                    accounts: rotated,
                    failure: Some(ReEncryptFailure {
                        account_index,
                        key_index,
                        error,
                    }),
                };
            }
        }
    }

    tracing::info!(count = rotated.len(), "all accounts re-encrypted");
    ReEncryptOutcome {
        accounts: rotated,
        failure: None,
    }
}

/// Rotate a single account. On failure reports the offending key index and
/// leaves the caller's record untouched.
pub async fn re_encrypt_account(
    account: &Account,
    old_key: &str,
    new_key: &str,
    cipher: &dyn CipherPort,
) -> std::result::Result<Account, (usize, SeedkitError)> {
    let mut rotated = account.clone();
    for (key_index, record) in account.keys.iter().enumerate() {
        match &record.secret {
            // never persisted encrypted, nothing to rotate
            Secret::Plain(_) => {}
            Secret::Encrypted(secret) => {
                let secret = rotate_record(secret, old_key, new_key, cipher)
                    .await
                    .map_err(|e| (key_index, e))?;
                rotated.keys[key_index].secret = Secret::Encrypted(secret);
            }
        }
    }
    Ok(rotated)
}

async fn rotate_record(
    secret: &EncryptedSecret,
    old_key: &str,
    new_key: &str,
    cipher: &dyn CipherPort,
) -> Result<EncryptedSecret> {
    let plaintext = cipher.decrypt(&secret.ciphertext, old_key, &secret.iv).await?;
    // parse into the structured form so a garbage decrypt fails here
    // instead of being re-encrypted as-is
    let parsed: PlainSecret = serde_json::from_str(&plaintext)?;
    let payload = serde_json::to_string(&parsed)?;
    let ciphertext = cipher.encrypt(&payload, new_key, &secret.iv).await?;
    Ok(EncryptedSecret {
        ciphertext,
        iv: secret.iv.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::PinCipher;
    use crate::types::AccountKeyRecord;
    use async_trait::async_trait;

    const OLD_KEY: &str = "old-key";
    const NEW_KEY: &str = "new-key";

    /// Cipher stand-in that "encrypts" by tagging the payload with the key
    /// and can be told to fail on a specific ciphertext.
    struct FakeCipher {
        fail_on: Option<String>,
    }

    fn seal(plaintext: &str, key: &str, iv: &str) -> String {
        format!("{}|{}|{}", key, iv, plaintext)
    }

    #[async_trait]
    impl CipherPort for FakeCipher {
        async fn encrypt(&self, plaintext: &str, key: &str, iv: &str) -> Result<String> {
            Ok(seal(plaintext, key, iv))
        }

        async fn decrypt(&self, ciphertext: &str, key: &str, iv: &str) -> Result<String> {
            if self.fail_on.as_deref() == Some(ciphertext) {
                return Err(SeedkitError::cipher("authentication failed"));
            }
            ciphertext
                .strip_prefix(&format!("{}|{}|", key, iv))
                .map(str::to_string)
                .ok_or_else(|| SeedkitError::cipher("authentication failed"))
        }
    }

    fn plain(index: u32) -> PlainSecret {
        PlainSecret {
            mnemonic: Some(format!("mnemonic {}", index)),
            passphrase: Some("hodl".to_string()),
            ..Default::default()
        }
    }

    fn encrypted_account(name: &str, key_count: u32) -> Account {
        let mut account = Account::new(name);
        for i in 0..key_count {
            let payload = serde_json::to_string(&plain(i)).unwrap();
            let iv = format!("iv-{}-{}", name, i);
            account.keys.push(AccountKeyRecord {
                fingerprint: None,
                secret: Secret::Encrypted(EncryptedSecret {
                    ciphertext: seal(&payload, OLD_KEY, &iv),
                    iv,
                }),
            });
        }
        account
    }

    #[tokio::test]
    async fn test_full_rotation() {
        let accounts = vec![encrypted_account("a", 2), encrypted_account("b", 2)];
        let cipher = FakeCipher { fail_on: None };

        let outcome = re_encrypt_all(&accounts, OLD_KEY, NEW_KEY, &cipher).await;
        assert!(outcome.is_complete());
        assert_eq!(outcome.accounts.len(), 2);

        for (account, source) in outcome.accounts.iter().zip(&accounts) {
            for (record, source_record) in account.keys.iter().zip(&source.keys) {
                let (sealed, iv) = match &record.secret {
                    Secret::Encrypted(s) => (s.ciphertext.clone(), s.iv.clone()),
                    Secret::Plain(_) => panic!("secret lost its encryption"),
                };
                let source_iv = match &source_record.secret {
                    Secret::Encrypted(s) => s.iv.clone(),
                    Secret::Plain(_) => unreachable!(),
                };
                // IV still tied to the record, ciphertext now under the new key
                assert_eq!(iv, source_iv);
                let plaintext = cipher.decrypt(&sealed, NEW_KEY, &iv).await.unwrap();
                let old_sealed = match &source_record.secret {
                    Secret::Encrypted(s) => s.ciphertext.clone(),
                    Secret::Plain(_) => unreachable!(),
                };
                let old_plain = cipher.decrypt(&old_sealed, OLD_KEY, &iv).await.unwrap();
                assert_eq!(
                    serde_json::from_str::<PlainSecret>(&plaintext).unwrap(),
                    serde_json::from_str::<PlainSecret>(&old_plain).unwrap()
                );
            }
        }
    }

    #[tokio::test]
    async fn test_failure_leaves_later_accounts_untouched() {
        let accounts = vec![encrypted_account("a", 2), encrypted_account("b", 2)];
        let fail_on = match &accounts[1].keys[0].secret {
            Secret::Encrypted(s) => s.ciphertext.clone(),
            Secret::Plain(_) => unreachable!(),
        };
        let cipher = FakeCipher {
            fail_on: Some(fail_on),
        };

        let outcome = re_encrypt_all(&accounts, OLD_KEY, NEW_KEY, &cipher).await;
        let failure = outcome.failure.expect("expected a failure");
        assert_eq!(failure.account_index, 1);
        assert_eq!(failure.key_index, 0);
        assert!(matches!(failure.error, SeedkitError::Cipher(_)));

        // first account fully rotated
        for record in &outcome.accounts[0].keys {
            match &record.secret {
                Secret::Encrypted(s) => assert!(s.ciphertext.starts_with(NEW_KEY)),
                Secret::Plain(_) => panic!("secret lost its encryption"),
            }
        }
        // failing account returned exactly as given
        assert_eq!(outcome.accounts[1], accounts[1]);
        // sources untouched
        for record in &accounts[0].keys {
            match &record.secret {
                Secret::Encrypted(s) => assert!(s.ciphertext.starts_with(OLD_KEY)),
                Secret::Plain(_) => unreachable!(),
            }
        }
    }

    #[tokio::test]
    async fn test_plain_secrets_pass_through() {
        let mut account = encrypted_account("a", 1);
        account.keys.push(AccountKeyRecord {
            fingerprint: Some("0c1627ed".to_string()),
            secret: Secret::Plain(PlainSecret {
                external_descriptor: Some("wpkh(xpub.../0/*)".to_string()),
                ..Default::default()
            }),
        });
        let cipher = FakeCipher { fail_on: None };

        let outcome = re_encrypt_all(&[account.clone()], OLD_KEY, NEW_KEY, &cipher).await;
        assert!(outcome.is_complete());
        assert_eq!(outcome.accounts[0].keys[1], account.keys[1]);
    }

    #[tokio::test]
    async fn test_real_cipher_end_to_end() {
        let cipher = PinCipher;
        let salt = PinCipher::generate_salt();
        let old_key = PinCipher::derive_key("1234", &salt);
        let new_key = PinCipher::derive_key("5678", &salt);

        let mut account = Account::new("hardware");
        let payload = serde_json::to_string(&plain(0)).unwrap();
        let iv = PinCipher::generate_iv();
        let ciphertext = cipher.encrypt(&payload, &old_key, &iv).await.unwrap();
        account.keys.push(AccountKeyRecord {
            fingerprint: None,
            secret: Secret::Encrypted(EncryptedSecret { ciphertext, iv: iv.clone() }),
        });

        let outcome = re_encrypt_all(&[account], &old_key, &new_key, &cipher).await;
        assert!(outcome.is_complete());

        let rotated = match &outcome.accounts[0].keys[0].secret {
            Secret::Encrypted(s) => s.clone(),
            Secret::Plain(_) => panic!("secret lost its encryption"),
        };
        assert_eq!(rotated.iv, iv);
        let plaintext = cipher.decrypt(&rotated.ciphertext, &new_key, &iv).await.unwrap();
        assert_eq!(serde_json::from_str::<PlainSecret>(&plaintext).unwrap(), plain(0));
    }
}
