//! Disclosed trade records.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::indicator::IndicatorSnapshot;

/// Direction of a disclosed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Transaction {
    Purchase,
    Sale,
}

impl Transaction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transaction::Purchase => "Purchase",
            Transaction::Sale => "Sale",
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction type: {0}")]
pub struct UnknownTransaction(pub String);

impl FromStr for Transaction {
    type Err = UnknownTransaction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "purchase" => Ok(Transaction::Purchase),
            "sale" => Ok(Transaction::Sale),
            _ => Err(UnknownTransaction(s.to_string())),
        }
    }
}

/// The official who filed the disclosure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filer {
    pub name: String,
    pub office: String,
    pub party: String,
    pub state: Option<String>,
    pub district: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: u64,
    pub ticker: Option<String>,
    pub security_name: String,
    pub asset_type: String,
    pub transaction: Transaction,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    pub filer: Filer,
    pub filed_date: NaiveDate,
    pub traded_date: NaiveDate,
    pub ownership: Option<String>,
    pub description: Option<String>,
    pub performance_since_trade: Option<f64>,
}

/// A trade paired with the indicator snapshot the data source correlated to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    #[serde(flatten)]
    pub trade: Trade,
    pub indicators: Option<IndicatorSnapshot>,
}

impl TradeRecord {
    pub fn new(trade: Trade, indicators: Option<IndicatorSnapshot>) -> Self {
        Self { trade, indicators }
    }
}
