use crate::error::{Result, SeedkitError};
use crate::storage::Storage;
use crate::types::{Account, AccountKeyRecord};
use rusqlite::params;

pub struct AccountStore<'a> {
    storage: &'a Storage,
}

impl<'a> AccountStore<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub async fn save_account(&self, account: &Account) -> Result<()> {
        let conn = self.storage.get_connection().await;
        let keys = serde_json::to_string(&account.keys)?;

        conn.execute(
            "INSERT OR REPLACE INTO accounts (id, name, created_at, keys)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                account.id,
                account.name,
                account.created_at.timestamp(),
                keys,
            ],
        )?;

        Ok(())
    }

    /// Save a whole collection atomically, e.g. after a PIN rotation.
    pub async fn save_accounts(&self, accounts: &[Account]) -> Result<()> {
        let conn = self.storage.get_connection().await;
        let tx = conn.unchecked_transaction()?;

        for account in accounts {
            let keys = serde_json::to_string(&account.keys)?;
            tx.execute(
                "INSERT OR REPLACE INTO accounts (id, name, created_at, keys)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    account.id,
                    account.name,
                    account.created_at.timestamp(),
                    keys,
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    pub async fn load_account(&self, name: &str) -> Result<Account> {
        let conn = self.storage.get_connection().await;

        let mut stmt =
            conn.prepare("SELECT id, name, created_at, keys FROM accounts WHERE name = ?1")?;

        let account = stmt
            .query_row(params![name], row_to_account)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => SeedkitError::AccountNotFound {
                    name: name.to_string(),
                },
                other => SeedkitError::Storage(other),
            })?;

        Ok(account)
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let conn = self.storage.get_connection().await;

        let mut stmt =
            conn.prepare("SELECT id, name, created_at, keys FROM accounts ORDER BY created_at")?;

        let account_iter = stmt.query_map([], row_to_account)?;

        let mut accounts = Vec::new();
        for account in account_iter {
            accounts.push(account?);
        }

        Ok(accounts)
    }

    pub async fn delete_account(&self, name: &str) -> Result<()> {
        let conn = self.storage.get_connection().await;
        conn.execute("DELETE FROM accounts WHERE name = ?1", params![name])?;
        Ok(())
    }

    pub async fn account_exists(&self, name: &str) -> Result<bool> {
        let conn = self.storage.get_connection().await;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM accounts WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}

fn row_to_account(row: &rusqlite::Row<'_>) -> rusqlite::Result<Account> {
    let keys_json: String = row.get(3)?;
    let keys: Vec<AccountKeyRecord> = serde_json::from_str(&keys_json).map_err(|_| {
        rusqlite::Error::InvalidColumnType(3, "keys".to_string(), rusqlite::types::Type::Text)
    })?;

    Ok(Account {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: chrono::DateTime::from_timestamp(row.get(2)?, 0)
            .unwrap_or_else(chrono::Utc::now),
        keys,
    })
}
