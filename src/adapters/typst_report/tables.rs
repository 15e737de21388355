//! Table formatting for reports.
//!
//! Provides functions to generate Typst markup for:
//! - Headline summary (net profit, final value, win rate, trade count)
//! - Detailed trade log (one row per trade, numbered from 1)

use crate::domain::performance::{EnrichedTrade, Summary};

/// Formats a currency amount with thousands separators and two decimals,
/// e.g. `-1234567.891` → `-1,234,567.89`.
pub fn format_money(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && rounded.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, frac)
}

/// Formats a fraction as a percentage with two decimals, e.g. `0.0123` → `1.23%`.
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Escapes characters that Typst markup would interpret, so names render as
/// plain text.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '#' | '*' | '_' | '[' | ']' | '$' | '`' | '<' | '>' | '@' | '~') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn signed_color(value: f64) -> &'static str {
    if value >= 0.0 { "green" } else { "red" }
}

pub fn format_summary_table(summary: &Summary) -> String {
    let mut output = String::new();
    output.push_str("#table(\n");
    output.push_str("  columns: 4,\n");
    output.push_str("  [*Net Profit*], [*Final Portfolio Value*], [*Win Rate*], [*Total Trades*],\n");
    output.push_str(&format!(
        "  text(fill: {}, [{} ({})]), [{}], [{}], [{}],\n",
        signed_color(summary.total_profit_value),
        format_money(summary.total_profit_value),
        format_pct(summary.total_return_pct),
        format_money(summary.final_equity),
        format_pct(summary.win_rate),
        summary.trade_count,
    ));
    output.push_str(")\n\n");
    output
}

pub fn format_trade_log(trades: &[EnrichedTrade]) -> String {
    if trades.is_empty() {
        return "// No trades recorded\n".to_string();
    }

    let mut output = String::new();
    output.push_str("#table(\n");
    output.push_str("  columns: 7,\n");
    output.push_str("  align: (right, left, left, left, right, right, right),\n");
    output.push_str("  [*Trade \\#*], [*Date*], [*Stock1*], [*Stock2*], ");
    output.push_str("[*Net Return*], [*Trade Profit*], [*Equity*],\n");

    for enriched in trades {
        let trade = &enriched.selected.trade;
        output.push_str(&format!(
            "  [{}], [{}], [{}], [{}], text(fill: {}, [{}]), [{}], [{}],\n",
            enriched.selected.trade_number(),
            trade.date.format("%Y-%m-%d"),
            escape_markup(&trade.instrument_1),
            escape_markup(&trade.instrument_2),
            signed_color(trade.net_return),
            format_pct(trade.net_return),
            format_money(enriched.trade_profit),
            format_money(enriched.equity),
        ));
    }

    output.push_str(")\n\n");
    output
}
