//! Performance calculation over one pair's trade sequence.
//!
//! Returns accumulate additively: the cumulative return after trade `i` is the
//! plain sum of net returns `0..=i`, and equity is the investment scaled by
//! `1 + cumulative_return`. Nothing is compounded.

use crate::domain::error::PairsimError;
use crate::domain::trade::SelectedTrade;

/// One selected trade with its running totals.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTrade {
    pub selected: SelectedTrade,
    pub cumulative_return: f64,
    pub equity: f64,
    pub trade_profit: f64,
}

impl EnrichedTrade {
    pub fn net_return(&self) -> f64 {
        self.selected.trade.net_return
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_return_pct: f64,
    pub total_profit_value: f64,
    pub final_equity: f64,
    pub win_rate: f64,
    pub trade_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    pub investment: f64,
    pub trades: Vec<EnrichedTrade>,
    pub summary: Summary,
}

impl PerformanceReport {
    pub fn equity_curve(&self) -> impl Iterator<Item = f64> + '_ {
        self.trades.iter().map(|t| t.equity)
    }

    pub fn net_returns(&self) -> impl Iterator<Item = f64> + '_ {
        self.trades.iter().map(|t| t.net_return())
    }
}

pub fn validate_investment(investment: f64) -> Result<f64, PairsimError> {
    if investment.is_finite() && investment > 0.0 {
        Ok(investment)
    } else {
        Err(PairsimError::InvalidInvestment { value: investment })
    }
}

/// Enriches `pair_trades` with running totals and derives the summary.
pub fn compute(
    pair_trades: &[SelectedTrade],
    investment: f64,
) -> Result<PerformanceReport, PairsimError> {
    let investment = validate_investment(investment)?;

    if pair_trades.is_empty() {
        return Err(PairsimError::EmptySelection {
            filter: "empty trade sequence".into(),
        });
    }

    let mut running_cumulative_return = 0.0_f64;
    let mut wins = 0usize;
    let mut trades = Vec::with_capacity(pair_trades.len());

    for selected in pair_trades {
        let net_return = selected.trade.net_return;
        running_cumulative_return += net_return;
        if selected.trade.is_win() {
            wins += 1;
        }

        trades.push(EnrichedTrade {
            selected: selected.clone(),
            cumulative_return: running_cumulative_return,
            equity: investment * (1.0 + running_cumulative_return),
            trade_profit: investment * net_return,
        });
    }

    let trade_count = trades.len();
    let total_return_pct = running_cumulative_return;
    let total_profit_value = investment * total_return_pct;

    Ok(PerformanceReport {
        investment,
        trades,
        summary: Summary {
            total_return_pct,
            total_profit_value,
            final_equity: investment + total_profit_value,
            win_rate: wins as f64 / trade_count as f64,
            trade_count,
        },
    })
}
