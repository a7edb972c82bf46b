//! Trade query engine.
//!
//! Narrows a read-only trade collection by attribute filters and, in
//! signals mode, by predicates over the indicator snapshot. Every trade
//! handed back is annotated with its channel tag. Input order is kept.

use serde::Serialize;

use crate::domain::channel::{classify, ChannelTag};
use crate::domain::indicator::IndicatorSnapshot;
use crate::domain::trade::{Trade, TradeRecord};

pub const BULLISH_RSI_THRESHOLD: f64 = 55.0;

/// Attribute filters. `None` means "not provided"; comparisons ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeFilter {
    pub ticker: Option<String>,
    pub party: Option<String>,
    pub transaction: Option<String>,
}

impl TradeFilter {
    /// Build a filter from raw boundary values, dropping blank ones.
    pub fn from_params(
        ticker: Option<&str>,
        party: Option<&str>,
        transaction: Option<&str>,
    ) -> Self {
        Self {
            ticker: normalize_param(ticker),
            party: normalize_param(party),
            transaction: normalize_param(transaction),
        }
    }

    pub fn matches(&self, trade: &Trade) -> bool {
        if let Some(ticker) = &self.ticker {
            match &trade.ticker {
                Some(t) if eq_ignore_case(t, ticker) => {}
                _ => return false,
            }
        }
        if let Some(party) = &self.party {
            if !eq_ignore_case(&trade.filer.party, party) {
                return false;
            }
        }
        if let Some(transaction) = &self.transaction {
            if !eq_ignore_case(trade.transaction.as_str(), transaction) {
                return false;
            }
        }
        true
    }
}

/// Predicates available only in signals mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalFilter {
    pub bullish_only: bool,
    pub donchian_breakouts_only: bool,
}

impl SignalFilter {
    pub fn from_params(bullish_only: Option<&str>, donchian_breakouts_only: Option<&str>) -> Self {
        Self {
            bullish_only: parse_flag(bullish_only),
            donchian_breakouts_only: parse_flag(donchian_breakouts_only),
        }
    }

    fn matches(&self, trade: &Trade, snapshot: &IndicatorSnapshot) -> bool {
        if self.bullish_only && !is_bullish(snapshot) {
            return false;
        }
        if self.donchian_breakouts_only
            && !classify(trade, Some(snapshot)).is_some_and(|tag| tag.is_breakout())
        {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// General listing: attribute filters only.
    Listing,
    /// Only trades with a snapshot, further narrowed by signal predicates.
    Signals(SignalFilter),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeQuery {
    pub filter: TradeFilter,
    pub mode: QueryMode,
}

impl TradeQuery {
    pub fn listing(filter: TradeFilter) -> Self {
        Self {
            filter,
            mode: QueryMode::Listing,
        }
    }

    pub fn signals(filter: TradeFilter, signals: SignalFilter) -> Self {
        Self {
            filter,
            mode: QueryMode::Signals(signals),
        }
    }
}

impl Default for TradeQuery {
    fn default() -> Self {
        Self::listing(TradeFilter::default())
    }
}

/// A trade as returned to callers: the record plus its computed tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedTrade<'a> {
    #[serde(flatten)]
    pub trade: &'a Trade,
    pub indicators: Option<&'a IndicatorSnapshot>,
    pub channel: Option<ChannelTag>,
}

impl<'a> AnnotatedTrade<'a> {
    pub fn annotate(record: &'a TradeRecord) -> Self {
        let indicators = record.indicators.as_ref();
        Self {
            trade: &record.trade,
            indicators,
            channel: classify(&record.trade, indicators),
        }
    }
}

/// Run a query over `records`, keeping input order.
pub fn filter<'a>(records: &'a [TradeRecord], query: &TradeQuery) -> Vec<AnnotatedTrade<'a>> {
    records
        .iter()
        .filter(|record| query.filter.matches(&record.trade))
        .filter(|record| match query.mode {
            QueryMode::Listing => true,
            QueryMode::Signals(signals) => record
                .indicators
                .as_ref()
                .is_some_and(|snapshot| signals.matches(&record.trade, snapshot)),
        })
        .map(AnnotatedTrade::annotate)
        .collect()
}

/// Look up one trade by identifier. `None` means no trade has that id.
pub fn find_by_id(records: &[TradeRecord], id: u64) -> Option<AnnotatedTrade<'_>> {
    records
        .iter()
        .find(|record| record.trade.id == id)
        .map(AnnotatedTrade::annotate)
}

/// RSI above threshold with a positive MACD histogram. Missing readings
/// count as zero, so either one missing fails the test.
pub fn is_bullish(snapshot: &IndicatorSnapshot) -> bool {
    snapshot.rsi14.unwrap_or(0.0) > BULLISH_RSI_THRESHOLD
        && snapshot.macd_hist.unwrap_or(0.0) > 0.0
}

/// Trim a raw parameter; blank means "not provided".
pub fn normalize_param(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Flags are set only by the literal `true`.
pub fn parse_flag(raw: Option<&str>) -> bool {
    raw == Some("true")
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
