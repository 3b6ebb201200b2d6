use crate::error::Result;
use crate::models::{
    LedgerStats, PaymentResponse, Transaction, TransactionKind, TransactionStatus,
};
use chrono::Utc;
use std::path::Path;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Fold a transaction list into balances.
///
/// Order does not matter and nothing outside the slice is read.
pub fn compute_stats(transactions: &[Transaction]) -> LedgerStats {
    transactions
        .iter()
        .fold(LedgerStats::default(), |mut stats, tx| {
            let amount = tx.amount as i64;
            match (tx.kind, tx.status) {
                (TransactionKind::Collection, TransactionStatus::Completed) => {
                    stats.available_balance += amount - tx.fee.unwrap_or(0) as i64;
                }
                (TransactionKind::Payout, TransactionStatus::Completed) => {
                    stats.available_balance -= amount;
                    stats.total_spent += amount;
                }
                (TransactionKind::Payout, TransactionStatus::Pending) => {
                    stats.pending_payouts += amount;
                }
                _ => {}
            }
            stats
        })
}

/// Shared transaction list, newest first.
#[derive(Debug, Default)]
pub struct Ledger {
    transactions: Mutex<Vec<Transaction>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Mutex::new(transactions),
        }
    }

    pub async fn record(&self, transaction: Transaction) {
        tracing::debug!(id = %transaction.id, kind = ?transaction.kind, amount = transaction.amount, "ledger entry");
        self.transactions.lock().await.insert(0, transaction);
    }

    /// Book a successful collection.
    pub async fn record_collection(
        &self,
        response: &PaymentResponse,
        user_id: Option<String>,
    ) -> Transaction {
        let transaction = Transaction {
            id: response.id.clone(),
            amount: response.amount,
            phone: response.phone_number.clone(),
            date: response.created_at_utc().unwrap_or_else(Utc::now),
            provider: response.telecom_operator.to_uppercase(),
            status: TransactionStatus::Completed,
            kind: TransactionKind::Collection,
            fee: response.fee,
            user_id,
        };
        self.record(transaction.clone()).await;
        transaction
    }

    /// Book a withdrawal to a mobile-money account.
    pub async fn record_payout(
        &self,
        amount: u64,
        phone: &str,
        provider: &str,
        status: TransactionStatus,
        user_id: Option<String>,
    ) -> Transaction {
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            amount,
            phone: phone.to_string(),
            date: Utc::now(),
            provider: provider.to_string(),
            status,
            kind: TransactionKind::Payout,
            fee: None,
            user_id,
        };
        self.record(transaction.clone()).await;
        transaction
    }

    pub async fn transactions(&self) -> Vec<Transaction> {
        self.transactions.lock().await.clone()
    }

    pub async fn stats(&self) -> LedgerStats {
        compute_stats(&self.transactions.lock().await)
    }

    /// Read a ledger saved with [`Ledger::save`]; a missing file is an empty ledger.
    pub async fn load(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            return Ok(Self::new());
        }
        let contents = tokio::fs::read_to_string(path).await?;
        let transactions: Vec<Transaction> = serde_json::from_str(&contents)?;
        Ok(Self::from_transactions(transactions))
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&*self.transactions.lock().await)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}
