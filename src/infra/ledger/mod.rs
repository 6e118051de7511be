//! Ledger node infrastructure.

pub mod faucet;
pub mod jsonrpc;

pub use faucet::{HttpFaucetClient, NoFaucet};
pub use jsonrpc::JsonRpcGateway;
