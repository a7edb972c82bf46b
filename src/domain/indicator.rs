//! Per-ticker, per-date technical indicator readings.
//!
//! Readings are computed upstream; every field is independently optional
//! because short price histories leave some of them undefined.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub ticker: String,
    pub date: NaiveDate,
    pub rsi14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub donchian_high20: Option<f64>,
    pub donchian_low20: Option<f64>,
    pub donchian_mid20: Option<f64>,
}

impl IndicatorSnapshot {
    /// A snapshot with every reading absent.
    pub fn empty(ticker: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            ticker: ticker.into(),
            date,
            rsi14: None,
            macd: None,
            macd_signal: None,
            macd_hist: None,
            sma20: None,
            sma50: None,
            sma200: None,
            bb_upper: None,
            bb_lower: None,
            donchian_high20: None,
            donchian_low20: None,
            donchian_mid20: None,
        }
    }

    pub fn with_rsi(mut self, rsi14: f64) -> Self {
        self.rsi14 = Some(rsi14);
        self
    }

    pub fn with_macd(mut self, line: f64, signal: f64, histogram: f64) -> Self {
        self.macd = Some(line);
        self.macd_signal = Some(signal);
        self.macd_hist = Some(histogram);
        self
    }

    pub fn with_sma20(mut self, sma20: f64) -> Self {
        self.sma20 = Some(sma20);
        self
    }

    pub fn with_donchian(mut self, high: f64, mid: f64, low: f64) -> Self {
        self.donchian_high20 = Some(high);
        self.donchian_mid20 = Some(mid);
        self.donchian_low20 = Some(low);
        self
    }

    /// The 20-period SMA stands in for the trade price when positioning a
    /// trade inside the channel.
    pub fn reference_price(&self) -> Option<f64> {
        self.sma20
    }
}
