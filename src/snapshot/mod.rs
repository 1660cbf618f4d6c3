pub mod format;
pub mod normalize;

use serde::{Deserialize, Serialize};

pub use normalize::{normalize, Normalized, TradeFields};

/// What the ticker page displays. Key names and order are part of the
/// `data.json` / `data.js` contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSnapshot {
    pub balance_usd: String,
    pub exposure_usd: String,
    pub positions_count: u64,
    pub total_pnl_usd: String,
    pub last_trades: Vec<TradeView>,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeView {
    pub side: String,
    pub symbol: String,
    pub price: String,
    pub size: String,
}

impl TickerSnapshot {
    pub fn build(normalized: &Normalized, updated_at: String) -> Self {
        Self {
            balance_usd: format::format_usd(normalized.balance),
            exposure_usd: format::format_usd(normalized.exposure),
            positions_count: normalized.positions_count,
            total_pnl_usd: format::format_usd(normalized.total_pnl),
            last_trades: normalized.trades.iter().map(TradeView::from_fields).collect(),
            updated_at,
        }
    }
}

impl TradeView {
    pub fn from_fields(fields: &TradeFields) -> Self {
        let side = [fields.action.as_deref(), fields.side.as_deref()]
            .into_iter()
            .flatten()
            .map(str::to_uppercase)
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            side: if side.is_empty() {
                "TRADE".to_string()
            } else {
                side
            },
            symbol: fields
                .symbol
                .clone()
                .unwrap_or_else(|| "UNKNOWN".to_string()),
            price: format::format_price(fields.price),
            size: format::format_size(fields.size),
        }
    }

    /// One ticker entry: `BUY YES Will X happen? $0.555 (12.00)`.
    pub fn ticker_entry(&self) -> String {
        format!("{} {} {} ({})", self.side, self.symbol, self.price, self.size)
    }
}
