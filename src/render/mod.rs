pub mod template;

use crate::config::OutputConfig;
use crate::error::TickerResult;
use crate::snapshot::TickerSnapshot;
use crate::store::OutputFile;

use template::{Page, INLINE_DATA_PREFIX};

pub const STATS_SLOT: &str = "STATS_HTML";
pub const TICKER_SLOT: &str = "TICKER_TEXT";
pub const UPDATED_AT_SLOT: &str = "UPDATED_AT";

const TICKER_SEPARATOR: &str = "  •  ";
const NO_TRADES: &str = "NO RECENT TRADES";

pub fn data_json(snapshot: &TickerSnapshot) -> TickerResult<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn data_js(snapshot: &TickerSnapshot) -> TickerResult<String> {
    Ok(format!(
        "{INLINE_DATA_PREFIX}{};",
        serde_json::to_string(snapshot)?
    ))
}

/// Same statement as `data.js`, with `/` and `<` escaped so it can sit inside
/// a `<script>` element without closing it or forging a slot marker.
fn inline_data(snapshot: &TickerSnapshot) -> TickerResult<String> {
    let json = serde_json::to_string(snapshot)?
        .replace('/', "\\/")
        .replace('<', "\\u003c");
    Ok(format!("{INLINE_DATA_PREFIX}{json};"))
}

pub fn stats_html(snapshot: &TickerSnapshot) -> String {
    let positions = snapshot.positions_count.to_string();
    [
        ("Balance", snapshot.balance_usd.as_str()),
        ("Exposure", snapshot.exposure_usd.as_str()),
        ("Positions", positions.as_str()),
        ("PnL", snapshot.total_pnl_usd.as_str()),
    ]
    .iter()
    .map(|(label, value)| {
        format!(
            r#"<div class="card"><div class="label">{label}</div><div class="value">{}</div></div>"#,
            escape_html(value)
        )
    })
    .collect()
}

pub fn ticker_text(snapshot: &TickerSnapshot) -> String {
    if snapshot.last_trades.is_empty() {
        return NO_TRADES.to_string();
    }
    snapshot
        .last_trades
        .iter()
        .map(|t| t.ticker_entry())
        .collect::<Vec<_>>()
        .join(TICKER_SEPARATOR)
}

/// Fills every slot of the current page. Nothing is written here; a slot
/// error leaves the caller with nothing to commit.
pub fn render_page(
    html: String,
    snapshot: &TickerSnapshot,
    embed_inline_data: bool,
) -> TickerResult<String> {
    let mut page = Page::new(html);
    if embed_inline_data {
        page.fill_inline_data(&inline_data(snapshot)?)?;
    }
    page.fill_region(STATS_SLOT, &stats_html(snapshot))?;
    page.fill_region(TICKER_SLOT, &escape_html(&ticker_text(snapshot)))?;
    page.fill_region(UPDATED_AT_SLOT, &escape_html(&snapshot.updated_at))?;
    Ok(page.into_html())
}

/// All three artifacts, fully rendered in memory.
pub fn render_outputs(
    cfg: &OutputConfig,
    snapshot: &TickerSnapshot,
    current_html: String,
) -> TickerResult<Vec<OutputFile>> {
    Ok(vec![
        OutputFile::new(&cfg.json_path, data_json(snapshot)?),
        OutputFile::new(&cfg.js_path, data_js(snapshot)?),
        OutputFile::new(
            &cfg.html_path,
            render_page(current_html, snapshot, cfg.embed_inline_data)?,
        ),
    ])
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' | '\r' | '\t' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TickerError;
    use crate::snapshot::TradeView;

    const PAGE: &str = "<html><head><script>\n// __TICKER_DATA__\n</script></head><body>\n\
<div class=\"stats\"><!-- STATS_HTML --><!-- /STATS_HTML --></div>\n\
<div class=\"ticker\"><!-- TICKER_TEXT -->loading<!-- /TICKER_TEXT --></div>\n\
<small><!-- UPDATED_AT -->never<!-- /UPDATED_AT --></small>\n</body></html>";

    fn trade(side: &str, symbol: &str) -> TradeView {
        TradeView {
            side: side.to_string(),
            symbol: symbol.to_string(),
            price: "$0.555".to_string(),
            size: "12.00".to_string(),
        }
    }

    fn snapshot(last_trades: Vec<TradeView>) -> TickerSnapshot {
        TickerSnapshot {
            balance_usd: "$1,234.50".to_string(),
            exposure_usd: "$500.00".to_string(),
            positions_count: 3,
            total_pnl_usd: "-$2.00".to_string(),
            last_trades,
            updated_at: "10/18/2026, 3:04:05 PM ET".to_string(),
        }
    }

    #[test]
    fn empty_trades_render_placeholder_text() {
        assert_eq!(ticker_text(&snapshot(Vec::new())), "NO RECENT TRADES");
    }

    #[test]
    fn trades_are_joined_with_bullets() {
        let s = snapshot(vec![trade("BUY YES", "A"), trade("SELL NO", "B")]);
        assert_eq!(
            ticker_text(&s),
            "BUY YES A $0.555 (12.00)  •  SELL NO B $0.555 (12.00)"
        );
    }

    #[test]
    fn stats_cards_follow_fixed_order() {
        let html = stats_html(&snapshot(Vec::new()));
        assert_eq!(
            html,
            "<div class=\"card\"><div class=\"label\">Balance</div><div class=\"value\">$1,234.50</div></div>\
<div class=\"card\"><div class=\"label\">Exposure</div><div class=\"value\">$500.00</div></div>\
<div class=\"card\"><div class=\"label\">Positions</div><div class=\"value\">3</div></div>\
<div class=\"card\"><div class=\"label\">PnL</div><div class=\"value\">-$2.00</div></div>"
        );
    }

    #[test]
    fn json_and_js_encode_identical_data() {
        let s = snapshot(vec![trade("BUY YES", "Will X happen?")]);
        let json = data_json(&s).unwrap();
        let js = data_js(&s).unwrap();

        assert!(json.starts_with("{\n  \"balanceUsd\""), "{json}");
        let body = js
            .strip_prefix("window.TICKER_DATA = ")
            .and_then(|rest| rest.strip_suffix(';'))
            .expect("js wrapper");
        let from_json: serde_json::Value = serde_json::from_str(&json).unwrap();
        let from_js: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(from_json, from_js);
        let back: TickerSnapshot = serde_json::from_str(body).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn page_render_fills_every_slot_and_is_repeatable() {
        let s = snapshot(vec![trade("BUY YES", "Rates </script> & <b>cuts</b>?")]);
        let first = render_page(PAGE.to_string(), &s, true).unwrap();

        assert!(!first.contains("// __TICKER_DATA__"));
        assert!(first.contains("window.TICKER_DATA = {\"balanceUsd\""));
        assert!(first.contains("\\u003c\\/script>"), "{first}");
        assert!(first.contains("<!-- STATS_HTML --><div class=\"card\">"));
        assert!(first.contains(
            "<!-- TICKER_TEXT -->BUY YES Rates &lt;/script&gt; &amp; &lt;b&gt;cuts&lt;/b&gt;? $0.555 (12.00)<!-- /TICKER_TEXT -->"
        ));
        assert!(first.contains("<!-- UPDATED_AT -->10/18/2026, 3:04:05 PM ET<!-- /UPDATED_AT -->"));
        assert_eq!(first.matches("</script>").count(), 1);

        let second = render_page(first.clone(), &s, true).unwrap();
        assert_eq!(second, first);

        let empty = render_page(first, &snapshot(Vec::new()), true).unwrap();
        assert!(empty.contains("<!-- TICKER_TEXT -->NO RECENT TRADES<!-- /TICKER_TEXT -->"));
        assert_eq!(empty.matches("window.TICKER_DATA = ").count(), 1);
    }

    #[test]
    fn inline_data_can_be_disabled() {
        let page = PAGE.replace("// __TICKER_DATA__\n", "");
        let html = render_page(page, &snapshot(Vec::new()), false).unwrap();
        assert!(!html.contains("window.TICKER_DATA"));
    }

    #[test]
    fn missing_region_is_reported() {
        let page = PAGE.replace("<!-- UPDATED_AT -->", "");
        let err = render_page(page, &snapshot(Vec::new()), true).unwrap_err();
        match err {
            TickerError::Template(msg) => assert!(msg.contains("UPDATED_AT"), "{msg}"),
            other => panic!("expected template error, got {other}"),
        }
    }
}
