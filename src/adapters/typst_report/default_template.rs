//! Default Typst report template.
//!
//! Built-in Typst report markup with `{{PLACEHOLDER}}` substitution.

const DEFAULT_TEMPLATE: &str = r#"#set page(paper: "a4", margin: 2cm)
#set text(size: 10pt)

= Pairs Trading Report

*Pair:* {{PAIR}} #h(1em) *Instrument filter:* {{INSTRUMENT_FILTER}} #h(1em) *Investment:* {{INVESTMENT}}

== Results for {{PAIR}}

{{SUMMARY_TABLE}}

== Profit Growth (Equity Curve)

{{EQUITY_CURVE_SVG}}

== Trade Outcome Distribution

{{RETURN_HISTOGRAM_SVG}}

== Detailed Trade Log

{{TRADE_LOG}}
"#;

pub fn template() -> &'static str {
    DEFAULT_TEMPLATE
}
