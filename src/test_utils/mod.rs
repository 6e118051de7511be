//! Shared test utilities.

pub mod mocks;

pub use mocks::{MockConfig, MockFaucetClient, MockLedgerGateway, MockLedgerStore};
