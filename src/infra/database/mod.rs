//! Database infrastructure.

pub mod postgres;

pub use postgres::{PostgresConfig, PostgresStore};
