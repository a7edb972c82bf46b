//! Donchian channel position tagging.
//!
//! A trade is placed inside the 20-period Donchian channel of its ticker
//! using the 20-period SMA as the price. Classification runs in two passes
//! over fixed rule tables:
//! - base rules assign a zone; the first matching rule wins
//! - override rules flag breakouts and may replace the zone
//!
//! Tags are derived on every read and never stored.

use serde::Serialize;

use crate::domain::indicator::IndicatorSnapshot;
use crate::domain::trade::{Trade, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Upper,
    Mid,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTag {
    pub breakout_long: bool,
    pub breakdown_short: bool,
    pub zone: Option<Zone>,
}

impl ChannelTag {
    pub fn is_breakout(&self) -> bool {
        self.breakout_long || self.breakdown_short
    }
}

/// Channel bounds and reference price, all present.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ChannelInputs {
    price: f64,
    high: f64,
    mid: f64,
    low: f64,
}

impl ChannelInputs {
    fn from_snapshot(snapshot: &IndicatorSnapshot) -> Option<Self> {
        Some(Self {
            price: snapshot.reference_price()?,
            high: snapshot.donchian_high20?,
            mid: snapshot.donchian_mid20?,
            low: snapshot.donchian_low20?,
        })
    }
}

struct ZoneRule {
    zone: Zone,
    matches: fn(&ChannelInputs) -> bool,
}

// Order matters: p == mid lands in Upper, p == low lands in Lower.
const BASE_RULES: [ZoneRule; 3] = [
    ZoneRule {
        zone: Zone::Upper,
        matches: |c| c.mid <= c.price && c.price <= c.high,
    },
    ZoneRule {
        zone: Zone::Mid,
        matches: |c| c.low < c.price && c.price < c.mid,
    },
    ZoneRule {
        zone: Zone::Lower,
        matches: |c| c.price <= c.low,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    BreakoutLong,
    BreakdownShort,
}

struct OverrideRule {
    transaction: Transaction,
    matches: fn(&ChannelInputs) -> bool,
    flag: Flag,
    zone: Zone,
}

const OVERRIDE_RULES: [OverrideRule; 2] = [
    OverrideRule {
        transaction: Transaction::Purchase,
        matches: |c| c.price > c.high,
        flag: Flag::BreakoutLong,
        zone: Zone::Upper,
    },
    OverrideRule {
        transaction: Transaction::Sale,
        matches: |c| c.price < c.low,
        flag: Flag::BreakdownShort,
        zone: Zone::Lower,
    },
];

/// Tag a trade with its channel position.
///
/// Returns `None` when the snapshot is absent or lacks any of the channel
/// high, mid, low or the 20-period SMA. A sale above the channel high (or a
/// purchase below the low) gets neither a flag nor a fallback zone.
pub fn classify(trade: &Trade, snapshot: Option<&IndicatorSnapshot>) -> Option<ChannelTag> {
    let inputs = ChannelInputs::from_snapshot(snapshot?)?;

    let mut tag = ChannelTag {
        breakout_long: false,
        breakdown_short: false,
        zone: BASE_RULES
            .iter()
            .find(|rule| (rule.matches)(&inputs))
            .map(|rule| rule.zone),
    };

    if let Some(rule) = OVERRIDE_RULES
        .iter()
        .find(|rule| rule.transaction == trade.transaction && (rule.matches)(&inputs))
    {
        match rule.flag {
            Flag::BreakoutLong => tag.breakout_long = true,
            Flag::BreakdownShort => tag.breakdown_short = true,
        }
        tag.zone = Some(rule.zone);
    }

    Some(tag)
}
