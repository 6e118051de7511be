//! HTTP routing configuration with rate limiting and OpenAPI documentation.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{Request, Response, StatusCode},
    middleware::{self, Next},
    response::IntoResponse,
    routing::{get, post},
};
use governor::{Quota, RateLimiter};
use tower::ServiceBuilder;
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::app::AppState;
use crate::domain::{ErrorDetail, ErrorResponse, RateLimitResponse};

use super::accounts::{
    account_settings_handler, blackhole_account_handler, create_account_handler,
    delete_account_handler, get_account_handler, list_escrows_handler, list_nfts_handler,
    list_objects_handler, list_offers_handler, list_trust_lines_handler,
};
use super::handlers::{ApiDoc, health_check_handler, liveness_handler, readiness_handler};
use super::objects::{
    burn_nft_handler, cancel_escrow_handler, cancel_offer_handler, create_escrow_handler,
    create_offer_handler, delete_did_handler, delete_oracle_handler, finish_escrow_handler,
    get_did_handler, get_fee_handler, get_ledger_handler, get_oracle_handler, mint_nft_handler,
    set_did_handler, set_oracle_handler,
};
use super::payments::{
    create_trust_line_handler, get_transaction_handler, send_cross_currency_payment_handler,
    send_payment_handler,
};

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests per second for general endpoints
    pub general_rps: u32,
    /// Burst size for general endpoints
    pub general_burst: u32,
    /// Requests per second for health endpoints
    pub health_rps: u32,
    /// Burst size for health endpoints
    pub health_burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            general_rps: 10,
            general_burst: 20,
            health_rps: 100,
            health_burst: 100,
        }
    }
}

impl RateLimitConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let general_rps = std::env::var("RATE_LIMIT_RPS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        let general_burst = std::env::var("RATE_LIMIT_BURST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(20);

        Self {
            general_rps,
            general_burst,
            health_rps: 100,
            health_burst: 100,
        }
    }
}

fn quota(rps: u32, burst: u32) -> Quota {
    let rps = NonZeroU32::new(rps.max(1)).unwrap_or(NonZeroU32::MIN);
    let burst = NonZeroU32::new(burst.max(1)).unwrap_or(NonZeroU32::MIN);
    Quota::per_second(rps).allow_burst(burst)
}

/// Shared rate limiter state (keyed by client IP to prevent global DoS)
pub struct RateLimitState {
    general_limiter: governor::RateLimiter<
        IpAddr,
        governor::state::keyed::DashMapStateStore<IpAddr>,
        governor::clock::DefaultClock,
    >,
    health_limiter: governor::RateLimiter<
        IpAddr,
        governor::state::keyed::DashMapStateStore<IpAddr>,
        governor::clock::DefaultClock,
    >,
    config: RateLimitConfig,
}

impl RateLimitState {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            general_limiter: RateLimiter::dashmap(quota(config.general_rps, config.general_burst)),
            health_limiter: RateLimiter::dashmap(quota(config.health_rps, config.health_burst)),
            config,
        }
    }
}

/// Extract client IP from request (X-Forwarded-For, X-Real-IP, or ConnectInfo).
/// Falls back to 0.0.0.0 when unknown to avoid blocking; unknown clients share one bucket.
fn client_ip_from_request<B>(request: &Request<B>) -> IpAddr {
    // Prefer proxy headers (client is first in X-Forwarded-For)
    if let Some(forwarded) = request.headers().get("x-forwarded-for") {
        if let Ok(s) = forwarded.to_str() {
            if let Some(first) = s.split(',').next() {
                let trimmed = first.trim();
                if let Ok(ip) = trimmed.parse::<IpAddr>() {
                    return ip;
                }
            }
        }
    }
    if let Some(real_ip) = request.headers().get("x-real-ip") {
        if let Ok(s) = real_ip.to_str() {
            if let Ok(ip) = s.trim().parse::<IpAddr>() {
                return ip;
            }
        }
    }
    // ConnectInfo may inject SocketAddr when using into_make_service_with_connect_info
    if let Some(addr) = request.extensions().get::<SocketAddr>() {
        return addr.ip();
    }
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

/// Rate limit middleware for ledger-facing endpoints (per-IP)
async fn rate_limit_general_middleware(
    State(rate_limit): State<Arc<RateLimitState>>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let client_ip = client_ip_from_request(&request);
    match rate_limit.general_limiter.check_key(&client_ip) {
        Ok(_) => {
            let mut response = next.run(request).await;
            if let Ok(limit) = rate_limit.config.general_rps.to_string().parse() {
                response.headers_mut().insert("X-RateLimit-Limit", limit);
            }
            response
        }
        Err(not_until) => {
            let wait_time = not_until.wait_time_from(governor::clock::Clock::now(
                &governor::clock::DefaultClock::default(),
            ));
            let retry_after = wait_time.as_secs();

            let body = RateLimitResponse {
                error: ErrorDetail {
                    r#type: "rate_limited".to_string(),
                    message: "Rate limit exceeded. Please slow down your requests.".to_string(),
                },
                retry_after,
            };

            let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
            let headers = response.headers_mut();
            if let Ok(limit) = rate_limit.config.general_rps.to_string().parse() {
                headers.insert("X-RateLimit-Limit", limit);
            }
            if let Ok(zero) = "0".parse() {
                headers.insert("X-RateLimit-Remaining", zero);
            }
            if let Ok(retry) = retry_after.to_string().parse() {
                headers.insert("Retry-After", retry);
            }
            response
        }
    }
}

/// Rate limit middleware for health endpoints (per-IP)
async fn rate_limit_health_middleware(
    State(rate_limit): State<Arc<RateLimitState>>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let client_ip = client_ip_from_request(&request);
    match rate_limit.health_limiter.check_key(&client_ip) {
        Ok(_) => next.run(request).await,
        Err(not_until) => {
            let wait_time = not_until.wait_time_from(governor::clock::Clock::now(
                &governor::clock::DefaultClock::default(),
            ));
            let retry_after = wait_time.as_secs();

            let body = ErrorResponse {
                error: ErrorDetail {
                    r#type: "rate_limited".to_string(),
                    message: "Rate limit exceeded".to_string(),
                },
            };

            let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
            if let Ok(retry) = retry_after.to_string().parse() {
                response.headers_mut().insert("Retry-After", retry);
            }
            response
        }
    }
}

fn ledger_routes() -> Router<Arc<AppState>> {
    let account_routes = Router::new()
        .route("/", post(create_account_handler))
        .route(
            "/{address}",
            get(get_account_handler).delete(delete_account_handler),
        )
        .route("/{address}/blackhole", post(blackhole_account_handler))
        .route("/{address}/settings", post(account_settings_handler))
        .route("/{address}/lines", get(list_trust_lines_handler))
        .route("/{address}/offers", get(list_offers_handler))
        .route("/{address}/objects", get(list_objects_handler))
        .route("/{address}/escrows", get(list_escrows_handler))
        .route("/{address}/nfts", get(list_nfts_handler));

    Router::new()
        .nest("/accounts", account_routes)
        .route("/payments", post(send_payment_handler))
        .route(
            "/payments/cross-currency",
            post(send_cross_currency_payment_handler),
        )
        .route("/trustlines", post(create_trust_line_handler))
        .route("/transactions/{hash}", get(get_transaction_handler))
        .route("/offers", post(create_offer_handler))
        .route("/offers/cancel", post(cancel_offer_handler))
        .route("/escrows", post(create_escrow_handler))
        .route("/escrows/finish", post(finish_escrow_handler))
        .route("/escrows/cancel", post(cancel_escrow_handler))
        .route("/nfts/mint", post(mint_nft_handler))
        .route("/nfts/burn", post(burn_nft_handler))
        .route("/oracles", post(set_oracle_handler))
        .route("/oracles/delete", post(delete_oracle_handler))
        .route("/oracles/{address}/{document_id}", get(get_oracle_handler))
        .route("/did", post(set_did_handler))
        .route("/did/delete", post(delete_did_handler))
        .route("/did/{address}", get(get_did_handler))
        .route("/ledger", get(get_ledger_handler))
        .route("/ledger/fee", get(get_fee_handler))
}

fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health_check_handler))
        .route("/live", get(liveness_handler))
        .route("/ready", get(readiness_handler))
}

/// Create router without rate limiting
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ));

    Router::new()
        .merge(ledger_routes())
        .nest("/health", health_routes())
        .layer(middleware)
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Create router with rate limiting enabled
pub fn create_router_with_rate_limit(app_state: Arc<AppState>, config: RateLimitConfig) -> Router {
    let rate_limit_state = Arc::new(RateLimitState::new(config));

    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ));

    let limited_ledger = ledger_routes().layer(middleware::from_fn_with_state(
        Arc::clone(&rate_limit_state),
        rate_limit_general_middleware,
    ));
    let limited_health = health_routes().layer(middleware::from_fn_with_state(
        Arc::clone(&rate_limit_state),
        rate_limit_health_middleware,
    ));

    Router::new()
        .merge(limited_ledger)
        .nest("/health", limited_health)
        .layer(middleware)
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
