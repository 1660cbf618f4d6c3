use serde_json::Value;

use crate::clients::simmer_api::RawPayloads;

/// Canonical values pulled out of the upstream payloads, before formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub balance: Option<f64>,
    pub exposure: Option<f64>,
    pub positions_count: u64,
    pub total_pnl: Option<f64>,
    pub trades: Vec<TradeFields>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeFields {
    pub action: Option<String>,
    pub side: Option<String>,
    pub symbol: Option<String>,
    pub price: Option<f64>,
    pub size: Option<f64>,
}

const BALANCE_KEYS: &[&str] = &["balance_usd", "balanceUsd"];
const EXPOSURE_KEYS: &[&str] = &["exposure_usd", "exposureUsd"];
const PNL_KEYS: &[&str] = &["total_pnl_usd", "totalPnlUsd"];
const POSITIONS_VALUE_KEYS: &[&str] = &["total_value", "totalValue"];
const POSITIONS_PNL_KEYS: &[&str] = &["polymarket_pnl", "sim_pnl", "pnl"];

const TRADES_WRAPPERS: &[&str] = &["trades", "data"];
const POSITIONS_WRAPPERS: &[&str] = &["positions", "data"];

const SYMBOL_KEYS: &[&str] = &["market_question", "question", "symbol", "market", "asset"];
const PRICE_KEYS: &[&str] = &["price_before", "price"];
const SIZE_KEYS: &[&str] = &["shares", "size"];

/// Never fails: every lookup ends in `None`, zero or an empty list.
pub fn normalize(raw: &RawPayloads, max_trades: usize) -> Normalized {
    let RawPayloads {
        portfolio,
        trades,
        positions,
    } = raw;

    let positions_list = list(positions, POSITIONS_WRAPPERS);
    let positions_count = match positions_list.len() {
        0 => count(positions),
        n => n as u64,
    };

    Normalized {
        balance: first_number(portfolio, BALANCE_KEYS),
        // A zero primary figure counts as absent.
        exposure: non_zero(first_number(portfolio, EXPOSURE_KEYS))
            .or_else(|| first_number(positions, POSITIONS_VALUE_KEYS)),
        positions_count,
        total_pnl: non_zero(first_number(portfolio, PNL_KEYS))
            .or_else(|| first_number(positions, POSITIONS_PNL_KEYS)),
        trades: list(trades, TRADES_WRAPPERS)
            .iter()
            .take(max_trades)
            .map(trade_fields)
            .collect(),
    }
}

fn trade_fields(trade: &Value) -> TradeFields {
    TradeFields {
        action: label(trade, "action"),
        side: label(trade, "side"),
        symbol: SYMBOL_KEYS.iter().find_map(|key| text(trade.get(key)?)),
        price: first_number(trade, PRICE_KEYS),
        size: first_number(trade, SIZE_KEYS),
    }
}

/// A bare array is the list; an object is searched for its wrapper keys in order.
fn list<'a>(payload: &'a Value, wrappers: &[&str]) -> &'a [Value] {
    match payload {
        Value::Array(items) => items,
        Value::Object(_) => wrappers
            .iter()
            .find_map(|key| payload.get(key).and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

fn count(payload: &Value) -> u64 {
    payload
        .get("count")
        .and_then(number)
        .filter(|c| *c >= 0.0)
        .map(|c| c.trunc() as u64)
        .unwrap_or(0)
}

fn first_number(obj: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| number(obj.get(key)?))
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// JSON numbers and numeric strings; anything non-finite is treated as absent.
fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn label(obj: &Value, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}
