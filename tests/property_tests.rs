//! Property tests for channel tagging and trade filtering.

mod common;

use common::*;
use proptest::prelude::*;
use tradewatch::domain::channel::{classify, Zone};
use tradewatch::domain::query::{filter, SignalFilter, TradeFilter, TradeQuery};

fn arb_price() -> impl Strategy<Value = f64> {
    (50.0..150.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    prop_oneof![Just(Transaction::Purchase), Just(Transaction::Sale)]
}

/// Ordered channel bounds: low <= mid <= high.
fn arb_channel() -> impl Strategy<Value = (f64, f64, f64)> {
    (arb_price(), arb_price(), arb_price()).prop_map(|(a, b, c)| {
        let mut v = [a, b, c];
        v.sort_by(|x, y| x.partial_cmp(y).unwrap());
        (v[2], v[1], v[0])
    })
}

fn arb_optional(value: impl Strategy<Value = f64>) -> impl Strategy<Value = Option<f64>> {
    prop_oneof![Just(None), value.prop_map(Some)]
}

// ── Tagging ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn missing_input_never_tags(
        transaction in arb_transaction(),
        (high, mid, low) in arb_channel(),
        price in arb_price(),
        missing in 0usize..4,
    ) {
        let mut snap = snapshot("X").with_sma20(price).with_donchian(high, mid, low);
        match missing {
            0 => snap.donchian_high20 = None,
            1 => snap.donchian_mid20 = None,
            2 => snap.donchian_low20 = None,
            _ => snap.sma20 = None,
        }
        let trade = make_trade(1, Some("X"), "Democrat", transaction);
        prop_assert_eq!(classify(&trade, Some(&snap)), None);
    }

    #[test]
    fn classify_is_idempotent(
        transaction in arb_transaction(),
        high in arb_optional(arb_price()),
        mid in arb_optional(arb_price()),
        low in arb_optional(arb_price()),
        price in arb_optional(arb_price()),
    ) {
        let mut snap = snapshot("X");
        snap.donchian_high20 = high;
        snap.donchian_mid20 = mid;
        snap.donchian_low20 = low;
        snap.sma20 = price;
        let trade = make_trade(1, Some("X"), "Democrat", transaction);

        let first = classify(&trade, Some(&snap));
        let second = classify(&trade, Some(&snap));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn flags_match_direction_and_zone(
        transaction in arb_transaction(),
        (high, mid, low) in arb_channel(),
        price in arb_price(),
    ) {
        let snap = snapshot("X").with_sma20(price).with_donchian(high, mid, low);
        let trade = make_trade(1, Some("X"), "Democrat", transaction);
        let tag = classify(&trade, Some(&snap)).unwrap();

        prop_assert!(!(tag.breakout_long && tag.breakdown_short));
        if tag.breakout_long {
            prop_assert_eq!(transaction, Transaction::Purchase);
            prop_assert!(price > high);
            prop_assert_eq!(tag.zone, Some(Zone::Upper));
        }
        if tag.breakdown_short {
            prop_assert_eq!(transaction, Transaction::Sale);
            prop_assert!(price < low);
            prop_assert_eq!(tag.zone, Some(Zone::Lower));
        }
        if tag.zone.is_none() {
            prop_assert_eq!(transaction, Transaction::Sale);
            prop_assert!(price > high);
        }
    }
}

// ── Filtering ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn filter_output_is_an_ordered_subsequence(
        ticker in prop_oneof![Just(None), Just(Some("msft")), Just(Some("AAPL")), Just(Some("zzz"))],
        party in prop_oneof![Just(None), Just(Some("democrat")), Just(Some("Republican"))],
        signals in prop::bool::ANY,
        bullish_only in prop::bool::ANY,
        donchian_breakouts_only in prop::bool::ANY,
    ) {
        let records = sample_records();
        let trade_filter = TradeFilter::from_params(ticker, party, None);
        let query = if signals {
            TradeQuery::signals(trade_filter, SignalFilter { bullish_only, donchian_breakouts_only })
        } else {
            TradeQuery::listing(trade_filter)
        };

        let out = filter(&records, &query);
        let positions: Vec<usize> = out
            .iter()
            .map(|t| records.iter().position(|r| r.trade.id == t.trade.id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

        for annotated in &out {
            let source = &records[records.iter().position(|r| r.trade.id == annotated.trade.id).unwrap()];
            prop_assert_eq!(annotated.channel, classify(&source.trade, source.indicators.as_ref()));
            if signals {
                prop_assert!(annotated.indicators.is_some());
            }
        }
    }
}
