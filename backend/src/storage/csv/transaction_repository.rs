//! # CSV Transaction Repository
//!
//! Stores every transaction in `{data_directory}/transactions.csv`:
//!
//! ```csv
//! id,amount,currency,category,date,description,merchant,transaction_type,notes
//! 9b1d...,-4.5,EUR,Food,2025-03-01,Coffee,Bäckerei,expense,
//! ```
//!
//! The whole file is rewritten through a temp file on every change.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{Currency, Transaction, TransactionType};
use tracing::{debug, warn};

use super::connection::CsvConnection;
use crate::storage::TransactionStorage;

pub(super) const TRANSACTIONS_FILE: &str = "transactions.csv";
const TRANSACTIONS_HEADER: &str =
    "id,amount,currency,category,date,description,merchant,transaction_type,notes";

/// CSV record structure for transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransactionRecord {
    id: String,
    amount: f64,
    currency: Currency,
    category: String,
    date: String,
    description: String,
    merchant: Option<String>,
    transaction_type: TransactionType,
    notes: Option<String>,
}

impl From<&Transaction> for TransactionRecord {
    fn from(transaction: &Transaction) -> Self {
        TransactionRecord {
            id: transaction.id.clone(),
            amount: transaction.amount,
            currency: transaction.currency,
            category: transaction.category.clone(),
            date: transaction.date.clone(),
            description: transaction.description.clone(),
            merchant: transaction.merchant.clone(),
            transaction_type: transaction.transaction_type,
            notes: transaction.notes.clone(),
        }
    }
}

impl From<TransactionRecord> for Transaction {
    fn from(record: TransactionRecord) -> Self {
        Transaction {
            id: record.id,
            amount: record.amount,
            currency: record.currency,
            category: record.category,
            date: record.date,
            description: record.description,
            merchant: record.merchant,
            transaction_type: record.transaction_type,
            notes: record.notes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransactionRepository {
    connection: CsvConnection,
}

impl TransactionRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    pub(super) fn read_all(&self) -> Result<Vec<Transaction>> {
        let records: Vec<TransactionRecord> = self
            .connection
            .read_records(TRANSACTIONS_FILE, TRANSACTIONS_HEADER)?;
        Ok(records.into_iter().map(Transaction::from).collect())
    }

    pub(super) fn write_all(&self, transactions: &[Transaction]) -> Result<()> {
        let records: Vec<TransactionRecord> = transactions.iter().map(TransactionRecord::from).collect();
        self.connection
            .write_records(TRANSACTIONS_FILE, TRANSACTIONS_HEADER, &records)
    }
}

#[async_trait]
impl TransactionStorage for TransactionRepository {
    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.read_all()
    }

    async fn add_transaction(&self, transaction: &Transaction) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut transactions = self.read_all()?;
        transactions.push(transaction.clone());
        self.write_all(&transactions)?;
        debug!("Stored transaction {}", transaction.id);
        Ok(())
    }

    async fn update_transaction(&self, transaction: &Transaction) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut transactions = self.read_all()?;
        match transactions.iter_mut().find(|t| t.id == transaction.id) {
            Some(existing) => *existing = transaction.clone(),
            None => {
                warn!("Transaction {} not found in storage; nothing to update", transaction.id);
                return Ok(());
            }
        }
        self.write_all(&transactions)
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut transactions = self.read_all()?;
        let before = transactions.len();
        transactions.retain(|t| t.id != transaction_id);
        if transactions.len() == before {
            debug!("Transaction {} was not stored", transaction_id);
            return Ok(());
        }
        self.write_all(&transactions)
    }
}
