//! HTTP request handlers for web adapter.

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error};

use crate::domain::error::TradewatchError;
use crate::domain::query::{self, SignalFilter, TradeFilter, TradeQuery};
use crate::domain::trade::TradeRecord;

use super::{AppState, WebError};

/// Raw query string of the listing and signals endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct TradeParams {
    pub ticker: Option<String>,
    pub party: Option<String>,
    pub transaction: Option<String>,
    #[serde(rename = "bullishOnly")]
    pub bullish_only: Option<String>,
    #[serde(rename = "donchianBreakoutsOnly")]
    pub donchian_breakouts_only: Option<String>,
}

impl TradeParams {
    fn trade_filter(&self) -> TradeFilter {
        TradeFilter::from_params(
            self.ticker.as_deref(),
            self.party.as_deref(),
            self.transaction.as_deref(),
        )
    }

    fn signal_filter(&self) -> SignalFilter {
        SignalFilter::from_params(
            self.bullish_only.as_deref(),
            self.donchian_breakouts_only.as_deref(),
        )
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "tradewatch",
    }))
}

pub async fn list_trades(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TradeParams>,
) -> Result<Json<Value>, WebError> {
    let records = load_records(&state).await?;
    let query = TradeQuery::listing(params.trade_filter());
    respond(&records, &query)
}

pub async fn list_signals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TradeParams>,
) -> Result<Json<Value>, WebError> {
    let records = load_records(&state).await?;
    let query = TradeQuery::signals(params.trade_filter(), params.signal_filter());
    respond(&records, &query)
}

pub async fn get_trade(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, WebError> {
    let id: u64 = raw_id
        .parse()
        .map_err(|_| WebError::bad_request(format!("invalid trade id '{raw_id}'")))?;

    let records = load_records(&state).await?;
    let trade = query::find_by_id(&records, id).ok_or(TradewatchError::TradeNotFound { id })?;
    Ok(Json(serde_json::to_value(trade).map_err(TradewatchError::from)?))
}

pub async fn not_found() -> WebError {
    WebError::not_found("no such route")
}

/// Take a fresh snapshot of the trade source off the async executor.
async fn load_records(state: &Arc<AppState>) -> Result<Vec<TradeRecord>, WebError> {
    let source = Arc::clone(&state.trades);
    tokio::task::spawn_blocking(move || source.load_trades())
        .await
        .map_err(|e| {
            error!(error = %e, "trade loading task failed");
            WebError::internal("trade loading task failed")
        })?
        .map_err(|e| {
            error!(error = %e, "failed to load trades");
            WebError::from(e)
        })
}

fn respond(records: &[TradeRecord], query: &TradeQuery) -> Result<Json<Value>, WebError> {
    let trades = query::filter(records, query);
    debug!(
        total = records.len(),
        matched = trades.len(),
        mode = ?query.mode,
        "trade query"
    );
    Ok(Json(serde_json::to_value(trades).map_err(TradewatchError::from)?))
}
