//! XRPL Ledger Relay
//!
//! A REST service in front of an XRP Ledger JSON-RPC node. Transactions
//! are signed and submitted by the node itself; the relay validates
//! requests, shapes transaction JSON, classifies engine results and keeps
//! a Postgres bookkeeping trail of accounts and transactions.
//!
//! # Architecture Overview
//!
//! This crate is organized into four main layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   API Layer                  │
//! │  HTTP handlers, routing, request validation  │
//! ├─────────────────────────────────────────────┤
//! │               Application Layer              │
//! │    Business logic, service orchestration     │
//! ├─────────────────────────────────────────────┤
//! │                 Domain Layer                 │
//! │   Traits, types, errors (no dependencies)    │
//! ├─────────────────────────────────────────────┤
//! │             Infrastructure Layer             │
//! │   Postgres store, JSON-RPC gateway, faucet   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use xrpl_ledger_relay::api::create_router;
//! use xrpl_ledger_relay::app::AppState;
//! use xrpl_ledger_relay::config::LedgerConfig;
//! use xrpl_ledger_relay::infra::{HttpFaucetClient, JsonRpcGateway, PostgresStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = LedgerConfig::from_env()?;
//!     let gateway = Arc::new(JsonRpcGateway::new(&config)?);
//!     let faucet = Arc::new(HttpFaucetClient::new(faucet_url, config.http_timeout)?);
//!     let store = Arc::new(PostgresStore::with_defaults(&database_url).await?);
//!
//!     let state = Arc::new(AppState::new(gateway, faucet, store, config));
//!
//!     let router = create_router(state);
//!     axum::serve(listener, router).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod infra;

// Test utilities are available in tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
