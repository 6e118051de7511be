//! PostgreSQL bookkeeping store implementation.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

use crate::domain::error::{AppError, DatabaseError};
use crate::domain::traits::LedgerStore;
use crate::domain::types::{AccountSnapshot, AffectedNode, NodeDiffType, TransactionRecord};

/// PostgreSQL connection pool configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(3),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// PostgreSQL store with connection pooling
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store with custom pool configuration
    pub async fn new(database_url: &str, config: PostgresConfig) -> Result<Self, AppError> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect(database_url)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;
        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Create a new store with default pool configuration
    pub async fn with_defaults(database_url: &str) -> Result<Self, AppError> {
        Self::new(database_url, PostgresConfig::default()).await
    }

    /// Run database migrations using sqlx migrate
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Migration(e.to_string())))?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get the underlying connection pool (for testing)
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_snapshot(row: &sqlx::postgres::PgRow) -> AccountSnapshot {
        AccountSnapshot {
            address: row.get("address"),
            balance_drops: row.get("balance_drops"),
            sequence: row.get("sequence"),
            owner_count: row.get("owner_count"),
            flags: row.get("flags"),
            ledger_hash: row.get("ledger_hash"),
            ledger_index: row.get("ledger_index"),
            validated: row.get("validated"),
            fetched_at: row.get("fetched_at"),
        }
    }

    fn row_to_record(row: &sqlx::postgres::PgRow) -> TransactionRecord {
        TransactionRecord {
            hash: row.get("hash"),
            transaction_type: row.get("transaction_type"),
            account: row.get("account"),
            engine_result: row.get("engine_result"),
            ledger_hash: row.get("ledger_hash"),
            ledger_index: row.get("ledger_index"),
            close_time_iso: row.get("close_time_iso"),
            validated: row.get("validated"),
            tx_json: row.get::<Value, _>("tx_json"),
            recorded_at: row.get("recorded_at"),
            updated_at: row.get("updated_at"),
        }
    }

    fn row_to_node(row: &sqlx::postgres::PgRow) -> Result<AffectedNode, AppError> {
        let node_type_str: String = row.get("node_type");
        let node_type: NodeDiffType = node_type_str
            .parse()
            .map_err(|e: String| AppError::Database(DatabaseError::Query(e)))?;
        Ok(AffectedNode {
            node_type,
            ledger_entry_type: row.get("ledger_entry_type"),
            ledger_index: row.get("ledger_index"),
            node_json: row.get::<Value, _>("node_json"),
        })
    }
}

#[async_trait]
impl LedgerStore for PostgresStore {
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;
        Ok(())
    }

    #[instrument(skip(self, snapshot), fields(address = %snapshot.address))]
    async fn save_account_snapshot(&self, snapshot: &AccountSnapshot) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO account_snapshots (
                address, balance_drops, sequence, owner_count, flags,
                ledger_hash, ledger_index, validated, fetched_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (address) DO UPDATE SET
                balance_drops = EXCLUDED.balance_drops,
                sequence = EXCLUDED.sequence,
                owner_count = EXCLUDED.owner_count,
                flags = EXCLUDED.flags,
                ledger_hash = EXCLUDED.ledger_hash,
                ledger_index = EXCLUDED.ledger_index,
                validated = EXCLUDED.validated,
                fetched_at = EXCLUDED.fetched_at
            "#,
        )
        .bind(&snapshot.address)
        .bind(snapshot.balance_drops)
        .bind(snapshot.sequence)
        .bind(snapshot.owner_count)
        .bind(snapshot.flags)
        .bind(&snapshot.ledger_hash)
        .bind(snapshot.ledger_index)
        .bind(snapshot.validated)
        .bind(snapshot.fetched_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(DatabaseError::from(e)))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_account_snapshot(
        &self,
        address: &str,
    ) -> Result<Option<AccountSnapshot>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT address, balance_drops, sequence, owner_count, flags,
                   ledger_hash, ledger_index, validated, fetched_at
            FROM account_snapshots
            WHERE address = $1
            "#,
        )
        .bind(address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(DatabaseError::Query(e.to_string())))?;

        Ok(row.as_ref().map(Self::row_to_snapshot))
    }

    /// Parent row is upserted by hash; children are replaced wholesale.
    /// Everything happens inside one database transaction so a failure
    /// leaves the previous state intact.
    #[instrument(skip(self, record, nodes), fields(hash = %record.hash, node_count = nodes.len()))]
    async fn upsert_transaction(
        &self,
        record: &TransactionRecord,
        nodes: &[AffectedNode],
    ) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;

        sqlx::query(
            r#"
            INSERT INTO transaction_records (
                hash, transaction_type, account, engine_result,
                ledger_hash, ledger_index, close_time_iso, validated,
                tx_json, recorded_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (hash) DO UPDATE SET
                transaction_type = EXCLUDED.transaction_type,
                account = EXCLUDED.account,
                engine_result = EXCLUDED.engine_result,
                ledger_hash = EXCLUDED.ledger_hash,
                ledger_index = EXCLUDED.ledger_index,
                close_time_iso = EXCLUDED.close_time_iso,
                validated = EXCLUDED.validated,
                tx_json = EXCLUDED.tx_json,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&record.hash)
        .bind(&record.transaction_type)
        .bind(&record.account)
        .bind(&record.engine_result)
        .bind(&record.ledger_hash)
        .bind(record.ledger_index)
        .bind(&record.close_time_iso)
        .bind(record.validated)
        .bind(&record.tx_json)
        .bind(record.recorded_at)
        .bind(record.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Database(DatabaseError::from(e)))?;

        sqlx::query("DELETE FROM affected_nodes WHERE transaction_hash = $1")
            .bind(&record.hash)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Query(e.to_string())))?;

        for (position, node) in nodes.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO affected_nodes (
                    transaction_hash, position, node_type,
                    ledger_entry_type, ledger_index, node_json
                )
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(&record.hash)
            .bind(position as i32)
            .bind(node.node_type.as_str())
            .bind(&node.ledger_entry_type)
            .bind(&node.ledger_index)
            .bind(&node.node_json)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(DatabaseError::from(e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Database(DatabaseError::Query(e.to_string())))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_transaction(
        &self,
        hash: &str,
    ) -> Result<Option<(TransactionRecord, Vec<AffectedNode>)>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT hash, transaction_type, account, engine_result,
                   ledger_hash, ledger_index, close_time_iso, validated,
                   tx_json, recorded_at, updated_at
            FROM transaction_records
            WHERE hash = $1
            "#,
        )
        .bind(hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(DatabaseError::Query(e.to_string())))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let record = Self::row_to_record(&row);

        let node_rows = sqlx::query(
            r#"
            SELECT node_type, ledger_entry_type, ledger_index, node_json
            FROM affected_nodes
            WHERE transaction_hash = $1
            ORDER BY position
            "#,
        )
        .bind(hash)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(DatabaseError::Query(e.to_string())))?;

        let nodes = node_rows
            .iter()
            .map(Self::row_to_node)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some((record, nodes)))
    }

    #[instrument(skip(self))]
    async fn list_transactions_for_account(
        &self,
        account: &str,
        limit: i64,
    ) -> Result<Vec<TransactionRecord>, AppError> {
        let limit = limit.clamp(1, 100);
        let rows = sqlx::query(
            r#"
            SELECT hash, transaction_type, account, engine_result,
                   ledger_hash, ledger_index, close_time_iso, validated,
                   tx_json, recorded_at, updated_at
            FROM transaction_records
            WHERE account = $1
            ORDER BY recorded_at DESC
            LIMIT $2
            "#,
        )
        .bind(account)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(DatabaseError::Query(e.to_string())))?;

        Ok(rows.iter().map(Self::row_to_record).collect())
    }
}
