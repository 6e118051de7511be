//! The API layer, containing web handlers and routing.

pub mod accounts;
pub mod handlers;
pub mod objects;
pub mod payments;
pub mod router;

pub use handlers::ApiDoc;
pub use router::{RateLimitConfig, create_router, create_router_with_rate_limit};
