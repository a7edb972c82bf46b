//! CSV file trade source.
//!
//! Reads a trades file and an optional indicators file, then pairs each
//! trade with the snapshot sharing its ticker and traded date.

use crate::domain::error::TradewatchError;
use crate::domain::indicator::IndicatorSnapshot;
use crate::domain::trade::{Filer, Trade, TradeRecord, Transaction, UnknownTransaction};
use crate::ports::config_port::ConfigPort;
use crate::ports::trade_port::TradePort;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct CsvAdapter {
    trades_path: PathBuf,
    indicators_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct TradeRow {
    id: u64,
    ticker: Option<String>,
    security_name: String,
    asset_type: String,
    transaction: String,
    amount_min: Option<f64>,
    amount_max: Option<f64>,
    filer_name: String,
    office: String,
    party: String,
    state: Option<String>,
    district: Option<String>,
    filed_date: NaiveDate,
    traded_date: NaiveDate,
    ownership: Option<String>,
    description: Option<String>,
    performance_pct: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct IndicatorRow {
    ticker: String,
    date: NaiveDate,
    rsi14: Option<f64>,
    macd: Option<f64>,
    macd_signal: Option<f64>,
    macd_hist: Option<f64>,
    sma20: Option<f64>,
    sma50: Option<f64>,
    sma200: Option<f64>,
    bb_upper: Option<f64>,
    bb_lower: Option<f64>,
    donchian_high20: Option<f64>,
    donchian_low20: Option<f64>,
    donchian_mid20: Option<f64>,
}

type SnapshotKey = (String, NaiveDate);

impl CsvAdapter {
    pub fn new(trades_path: PathBuf, indicators_path: Option<PathBuf>) -> Self {
        Self {
            trades_path,
            indicators_path,
        }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TradewatchError> {
        let trades_path =
            config
                .get_string("data", "trades_path")
                .ok_or_else(|| TradewatchError::ConfigMissing {
                    section: "data".into(),
                    key: "trades_path".into(),
                })?;
        let indicators_path = config.get_string("data", "indicators_path");

        Ok(Self::new(
            PathBuf::from(trades_path),
            indicators_path.map(PathBuf::from),
        ))
    }

    fn read_trades(&self) -> Result<Vec<Trade>, TradewatchError> {
        let rows: Vec<(u64, TradeRow)> = read_rows(&self.trades_path)?;
        let mut seen = HashSet::with_capacity(rows.len());
        let mut trades = Vec::with_capacity(rows.len());

        for (line, row) in rows {
            if !seen.insert(row.id) {
                return Err(TradewatchError::DuplicateTradeId { id: row.id });
            }
            let transaction: Transaction =
                row.transaction
                    .parse()
                    .map_err(|e: UnknownTransaction| TradewatchError::InvalidRecord {
                        line,
                        reason: e.to_string(),
                    })?;

            trades.push(Trade {
                id: row.id,
                ticker: row.ticker,
                security_name: row.security_name,
                asset_type: row.asset_type,
                transaction,
                amount_min: row.amount_min,
                amount_max: row.amount_max,
                filer: Filer {
                    name: row.filer_name,
                    office: row.office,
                    party: row.party,
                    state: row.state,
                    district: row.district,
                },
                filed_date: row.filed_date,
                traded_date: row.traded_date,
                ownership: row.ownership,
                description: row.description,
                performance_since_trade: row.performance_pct,
            });
        }

        Ok(trades)
    }

    fn read_snapshots(&self) -> Result<HashMap<SnapshotKey, IndicatorSnapshot>, TradewatchError> {
        let Some(path) = &self.indicators_path else {
            return Ok(HashMap::new());
        };

        let rows: Vec<(u64, IndicatorRow)> = read_rows(path)?;
        let mut snapshots = HashMap::with_capacity(rows.len());

        for (line, row) in rows {
            let key = (row.ticker.to_uppercase(), row.date);
            if snapshots.contains_key(&key) {
                warn!(
                    line,
                    ticker = %key.0,
                    date = %key.1,
                    "duplicate indicator snapshot, keeping the first"
                );
                continue;
            }
            snapshots.insert(
                key.clone(),
                IndicatorSnapshot {
                    ticker: key.0,
                    date: key.1,
                    rsi14: row.rsi14,
                    macd: row.macd,
                    macd_signal: row.macd_signal,
                    macd_hist: row.macd_hist,
                    sma20: row.sma20,
                    sma50: row.sma50,
                    sma200: row.sma200,
                    bb_upper: row.bb_upper,
                    bb_lower: row.bb_lower,
                    donchian_high20: row.donchian_high20,
                    donchian_low20: row.donchian_low20,
                    donchian_mid20: row.donchian_mid20,
                },
            );
        }

        Ok(snapshots)
    }
}

impl TradePort for CsvAdapter {
    fn load_trades(&self) -> Result<Vec<TradeRecord>, TradewatchError> {
        let trades = self.read_trades()?;
        let snapshots = self.read_snapshots()?;

        let records: Vec<TradeRecord> = trades
            .into_iter()
            .map(|trade| {
                // Several trades can share one snapshot.
                let indicators = trade
                    .ticker
                    .as_ref()
                    .and_then(|ticker| snapshots.get(&(ticker.to_uppercase(), trade.traded_date)))
                    .cloned();
                TradeRecord::new(trade, indicators)
            })
            .collect();

        debug!(
            path = %self.trades_path.display(),
            trades = records.len(),
            with_indicators = records.iter().filter(|r| r.indicators.is_some()).count(),
            "loaded trades"
        );
        Ok(records)
    }
}

/// Read and deserialize every row of a headed CSV file, tagging each with
/// its line number.
fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<(u64, T)>, TradewatchError> {
    let content = fs::read_to_string(path).map_err(|e| TradewatchError::DataSource {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let headers = rdr
        .headers()
        .map_err(|e| TradewatchError::DataSource {
            reason: format!("CSV header error in {}: {}", path.display(), e),
        })?
        .clone();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| match e.position() {
            Some(pos) => TradewatchError::InvalidRecord {
                line: pos.line(),
                reason: e.to_string(),
            },
            None => TradewatchError::DataSource {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            },
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row = record
            .deserialize(Some(&headers))
            .map_err(|e| TradewatchError::InvalidRecord {
                line,
                reason: e.to_string(),
            })?;
        rows.push((line, row));
    }

    Ok(rows)
}
