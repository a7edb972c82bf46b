#![allow(dead_code)]

use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
pub use tradewatch::domain::indicator::IndicatorSnapshot;
use tradewatch::domain::error::TradewatchError;
pub use tradewatch::domain::trade::{Filer, Trade, TradeRecord, Transaction};
use tradewatch::ports::trade_port::TradePort;

pub struct MockTradePort {
    pub records: Vec<TradeRecord>,
    pub error: Option<String>,
    pub loads: AtomicUsize,
}

impl MockTradePort {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            error: None,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn with_records(mut self, records: Vec<TradeRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl TradePort for MockTradePort {
    fn load_trades(&self) -> Result<Vec<TradeRecord>, TradewatchError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.error {
            return Err(TradewatchError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.records.clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_trade(id: u64, ticker: Option<&str>, party: &str, transaction: Transaction) -> Trade {
    Trade {
        id,
        ticker: ticker.map(str::to_string),
        security_name: format!("Security {id}"),
        asset_type: "Stock".to_string(),
        transaction,
        amount_min: Some(1_001.0),
        amount_max: Some(15_000.0),
        filer: Filer {
            name: format!("Filer {id}"),
            office: "House".to_string(),
            party: party.to_string(),
            state: Some("TX".to_string()),
            district: None,
        },
        filed_date: date(2024, 6, 20),
        traded_date: date(2024, 6, 3),
        ownership: None,
        description: None,
        performance_since_trade: None,
    }
}

pub fn snapshot(ticker: &str) -> IndicatorSnapshot {
    IndicatorSnapshot::empty(ticker, date(2024, 6, 3))
}

/// Snapshot on the 90 / 100 / 110 channel with the given SMA-20.
pub fn channel_snapshot(ticker: &str, sma20: f64) -> IndicatorSnapshot {
    snapshot(ticker)
        .with_sma20(sma20)
        .with_donchian(110.0, 100.0, 90.0)
}

pub fn record(trade: Trade, indicators: Option<IndicatorSnapshot>) -> TradeRecord {
    TradeRecord::new(trade, indicators)
}

/// A small mixed book used across suites:
/// 1 MSFT purchase, breakout, bullish
/// 2 AAPL sale, breakdown, not bullish
/// 3 no ticker, no snapshot
/// 4 NVDA purchase, mid zone, bullish
/// 5 msft sale above the high, no zone
pub fn sample_records() -> Vec<TradeRecord> {
    vec![
        record(
            make_trade(1, Some("MSFT"), "Democrat", Transaction::Purchase),
            Some(channel_snapshot("MSFT", 111.0).with_rsi(62.0).with_macd(1.2, 0.9, 0.3)),
        ),
        record(
            make_trade(2, Some("AAPL"), "Republican", Transaction::Sale),
            Some(channel_snapshot("AAPL", 89.0).with_rsi(38.0).with_macd(-0.5, -0.2, -0.3)),
        ),
        record(make_trade(3, None, "Democrat", Transaction::Purchase), None),
        record(
            make_trade(4, Some("NVDA"), "Republican", Transaction::Purchase),
            Some(channel_snapshot("NVDA", 95.0).with_rsi(58.0).with_macd(2.0, 1.5, 0.5)),
        ),
        record(
            make_trade(5, Some("MSFT"), "Democrat", Transaction::Sale),
            Some(channel_snapshot("MSFT", 111.0)),
        ),
    ]
}
