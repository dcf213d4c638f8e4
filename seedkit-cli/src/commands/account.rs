use bip39::{Language, Mnemonic};
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::{Confirm, Password};
use seedkit_core::storage::{AccountStore, Storage};
use seedkit_core::{
    re_encrypt_all, Account, AccountKeyRecord, CipherPort, EncryptedSecret, PinCipher,
    PlainSecret, Result, Secret, SeedkitError,
};

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create an account with a freshly generated, PIN-encrypted mnemonic
    Create {
        /// Account name
        name: String,
        /// Watch-only: store this descriptor instead of generating a secret
        #[arg(long)]
        descriptor: Option<String>,
    },
    /// List stored accounts
    List,
    /// Delete an account
    Delete {
        /// Account name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Re-encrypt every account secret under a new PIN
    RotatePin,
}

pub async fn handle_account_command(cmd: AccountCommands, storage: &Storage) -> Result<()> {
    let store = AccountStore::new(storage);

    match cmd {
        AccountCommands::Create { name, descriptor } => {
            if store.account_exists(&name).await? {
                return Err(SeedkitError::config(format!(
                    "Account '{}' already exists",
                    name
                )));
            }

            let mut account = Account::new(&name);

            if let Some(descriptor) = descriptor {
                // watch-only secrets are never persisted encrypted
                account.keys.push(AccountKeyRecord {
                    fingerprint: None,
                    secret: Secret::Plain(PlainSecret {
                        external_descriptor: Some(descriptor),
                        ..Default::default()
                    }),
                });
                store.save_account(&account).await?;
                println!("Watch-only account '{}' created", name);
                return Ok(());
            }

            let pin = Password::new()
                .with_prompt("Choose a PIN")
                .with_confirmation("Confirm PIN", "PINs don't match")
                .interact()?;

            let mnemonic = generate_mnemonic()?;
            let secret = PlainSecret {
                mnemonic: Some(mnemonic.clone()),
                ..Default::default()
            };

            let salt = storage.kdf_salt().await?;
            let key = PinCipher::derive_key(&pin, &salt);
            let iv = PinCipher::generate_iv();
            let cipher = PinCipher;
            let payload = serde_json::to_string(&secret)?;
            let ciphertext = cipher.encrypt(&payload, &key, &iv).await?;

            account.keys.push(AccountKeyRecord {
                fingerprint: None,
                secret: Secret::Encrypted(EncryptedSecret { ciphertext, iv }),
            });
            store.save_account(&account).await?;

            println!("Account created successfully!");
            println!();
            println!("IMPORTANT: Save your mnemonic phrase securely!");
            println!("Mnemonic: {}", mnemonic);
            println!();
            println!("Account Details:");
            println!("  Name: {}", account.name);
            println!("  ID: {}", account.id);
        }

        AccountCommands::List => {
            let accounts = store.list_accounts().await?;
            if accounts.is_empty() {
                println!("No accounts stored.");
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Name", "ID", "Keys", "Locked", "Created"]);
            for account in &accounts {
                table.add_row(vec![
                    account.name.clone(),
                    account.id.clone(),
                    account.keys.len().to_string(),
                    if account.is_locked() { "yes" } else { "no" }.to_string(),
                    account.created_at.format("%Y-%m-%d %H:%M").to_string(),
                ]);
            }
            println!("{table}");
        }

        AccountCommands::Delete { name, force } => {
            if !store.account_exists(&name).await? {
                return Err(SeedkitError::AccountNotFound { name });
            }

            if !force {
                let confirm = Confirm::new()
                    .with_prompt(format!("Delete account '{}' and its secrets?", name))
                    .default(false)
                    .interact()?;
                if !confirm {
                    println!("Delete cancelled.");
                    return Ok(());
                }
            }

            store.delete_account(&name).await?;
            println!("Account '{}' deleted", name);
        }

        AccountCommands::RotatePin => {
            let old_pin = Password::new().with_prompt("Enter current PIN").interact()?;
            let new_pin = Password::new()
                .with_prompt("Choose a new PIN")
                .with_confirmation("Confirm new PIN", "PINs don't match")
                .interact()?;

            let accounts = store.list_accounts().await?;
            if accounts.is_empty() {
                println!("No accounts stored.");
                return Ok(());
            }

            let salt = storage.kdf_salt().await?;
            let old_key = PinCipher::derive_key(&old_pin, &salt);
            let new_key = PinCipher::derive_key(&new_pin, &salt);
            let cipher = PinCipher;

            println!("Re-encrypting {} accounts...", accounts.len());
            let outcome = re_encrypt_all(&accounts, &old_key, &new_key, &cipher).await;

            // processed accounts are committed either way; the failing and
            // later accounts keep their old-key ciphertexts
            store.save_accounts(&outcome.accounts).await?;

            match outcome.failure {
                None => println!("PIN rotated for {} accounts", outcome.accounts.len()),
                Some(failure) => {
                    eprintln!(
                        "PIN rotation stopped at account '{}' (key {}): {}",
                        accounts[failure.account_index].name, failure.key_index, failure.error
                    );
                    eprintln!(
                        "{} of {} accounts rotated; the rest still use the old PIN",
                        failure.account_index,
                        accounts.len()
                    );
                    return Err(failure.error);
                }
            }
        }
    }

    Ok(())
}

fn generate_mnemonic() -> Result<String> {
    let mut rng = bip39::rand::thread_rng();
    let mnemonic = Mnemonic::generate_in_with(&mut rng, Language::English, 24)
        .map_err(|e| SeedkitError::internal(format!("Failed to generate mnemonic: {}", e)))?;
    Ok(mnemonic.to_string())
}
