//! Performance metrics over the marked-to-market value series.

use gridsim_core::TimestampMs;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// One point on the equity curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityPoint {
    pub ts_ms: TimestampMs,
    pub value: f64,
    pub drawdown: f64,
    pub drawdown_pct: f64,
}

/// Summary statistics for a completed (or partially completed) run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Steps covered by the summary.
    pub steps: usize,
    /// Starting capital.
    pub initial_cash: f64,
    /// Portfolio value at the last covered step.
    pub final_value: f64,
    /// Total return over the run, in percent.
    pub total_return_pct: f64,
    /// Maximum peak-to-trough drawdown (absolute).
    pub max_drawdown: f64,
    /// Maximum drawdown as a percentage of the peak.
    pub max_drawdown_pct: f64,
    /// Mean single-step return.
    pub step_return_mean: f64,
    /// Standard deviation of single-step returns.
    pub step_return_std: f64,
    /// Mean over stddev of step returns (not annualized).
    pub sharpe_per_step: f64,
}

/// Build the equity curve with running drawdown from the value series.
pub fn equity_curve(index: &[TimestampMs], pf_value: ArrayView1<f64>) -> Vec<EquityPoint> {
    let mut curve = Vec::with_capacity(pf_value.len());
    let mut peak = f64::MIN;

    for (&ts_ms, &value) in index.iter().zip(pf_value.iter()) {
        peak = peak.max(value);
        let drawdown = peak - value;
        let drawdown_pct = if peak > 0.0 {
            (drawdown / peak) * 100.0
        } else {
            0.0
        };
        curve.push(EquityPoint {
            ts_ms,
            value,
            drawdown,
            drawdown_pct,
        });
    }

    curve
}

/// Summarize a value series against the starting capital.
pub fn summarize(
    initial_cash: f64,
    index: &[TimestampMs],
    pf_value: ArrayView1<f64>,
) -> PerformanceSummary {
    let steps = pf_value.len();
    if steps == 0 {
        return PerformanceSummary {
            initial_cash,
            ..Default::default()
        };
    }

    let final_value = pf_value[steps - 1];
    let total_return_pct = if initial_cash != 0.0 {
        (final_value - initial_cash) / initial_cash * 100.0
    } else {
        0.0
    };

    // Single-step simple returns; steps with a zero base are skipped.
    let mut returns = Vec::with_capacity(steps.saturating_sub(1));
    for t in 1..steps {
        let prev = pf_value[t - 1];
        if prev != 0.0 {
            returns.push(pf_value[t] / prev - 1.0);
        }
    }

    let (step_return_mean, step_return_std) = mean_std(&returns);
    let sharpe_per_step = if step_return_std > 0.0 {
        step_return_mean / step_return_std
    } else {
        0.0
    };

    let mut max_drawdown = 0.0_f64;
    let mut max_drawdown_pct = 0.0_f64;
    for point in equity_curve(index, pf_value) {
        if point.drawdown > max_drawdown {
            max_drawdown = point.drawdown;
            max_drawdown_pct = point.drawdown_pct;
        }
    }

    PerformanceSummary {
        steps,
        initial_cash,
        final_value,
        total_return_pct,
        max_drawdown,
        max_drawdown_pct,
        step_return_mean,
        step_return_std,
        sharpe_per_step,
    }
}

fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}
