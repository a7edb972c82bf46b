//! Trade data source port trait.

use crate::domain::error::TradewatchError;
use crate::domain::trade::TradeRecord;

pub trait TradePort {
    /// Load every disclosed trade, each paired with its correlated
    /// indicator snapshot if one exists. Order is the source's order.
    fn load_trades(&self) -> Result<Vec<TradeRecord>, TradewatchError>;
}
