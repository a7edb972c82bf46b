//! Web server adapter.
//!
//! JSON API over axum exposing the trade listing, the signals view and
//! single-trade lookup.

mod error;
mod handlers;

pub use error::WebError;
pub use handlers::*;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::ports::trade_port::TradePort;

pub struct AppState {
    pub trades: Arc<dyn TradePort + Send + Sync>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/trades", get(handlers::list_trades))
        .route("/api/trades/{id}", get(handlers::get_trade))
        .route("/api/signals", get(handlers::list_signals))
        .fallback(handlers::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .with_state(Arc::new(state))
}
