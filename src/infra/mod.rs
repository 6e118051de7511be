//! Infrastructure layer implementations.

pub mod database;
pub mod ledger;

pub use database::{PostgresConfig, PostgresStore};
pub use ledger::{HttpFaucetClient, JsonRpcGateway, NoFaucet};
