//! The simulation engine.
//!
//! Owns every time-indexed state grid and drives the per-step loop: assemble
//! the order from the carried signal and any deferred remainder, execute it
//! against the step's liquidity (or skip when empty), mark the portfolio to
//! market, then hand the strategy a packet and collect its next signal.

use gridsim_core::{ts_to_datetime, Error, Frame, Result};
use ndarray::{s, Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, info_span};

use crate::execution::fill_with_deferral;
use crate::market::MarketData;
use crate::metrics::{summarize, PerformanceSummary};
use crate::store::{DataStore, VariableStore};
use crate::strategy::{StepContext, Strategy};
use crate::valuation::portfolio_value;

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Starting cash balance, seeded into the first step.
    pub initial_cash: f64,
    /// Run name, used only for progress reporting.
    pub name: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_cash: 10000.0,
            name: String::new(),
        }
    }
}

/// Discrete-time backtesting engine.
///
/// All account grids are allocated once at construction with the market
/// grid's shape and written strictly forward, one row per step. Strategies
/// never touch them directly; they observe history through a `StepContext`
/// and influence future rows only via the signal they return.
pub struct Backtester {
    config: SimConfig,
    market: MarketData,
    data: DataStore,
    vars: VariableStore,
    cash: Array1<f64>,
    pf_value: Array1<f64>,
    order: Array2<f64>,
    order_adjusted: Array2<f64>,
    position: Array2<f64>,
    cashflow: Array2<f64>,
    completed_steps: usize,
}

/// Labeled result tables for a run.
#[derive(Debug, Clone)]
pub struct BacktestResult {
    /// Cash balance per step (single column).
    pub cash: Frame,
    /// Per-security cash flow per step.
    pub cashflow: Frame,
    /// Requested order per step (signal plus deferral).
    pub order: Frame,
    /// Executed portion of each order.
    pub order_adjusted: Frame,
    /// Marked-to-market portfolio value per step (single column).
    pub pf_value: Frame,
    /// Position per step.
    pub position: Frame,
}

impl BacktestResult {
    /// The result tables keyed by name.
    pub fn tables(&self) -> BTreeMap<&'static str, &Frame> {
        BTreeMap::from([
            ("cash", &self.cash),
            ("cashflow", &self.cashflow),
            ("order", &self.order),
            ("order_adjusted", &self.order_adjusted),
            ("pf_value", &self.pf_value),
            ("position", &self.position),
        ])
    }
}

impl Backtester {
    /// Create an engine over the given market data.
    pub fn new(config: SimConfig, market: MarketData) -> Self {
        let steps = market.steps();
        let securities = market.securities().len();

        let mut cash = Array1::zeros(steps);
        if steps > 0 {
            cash[0] = config.initial_cash;
        }

        Self {
            config,
            market,
            data: DataStore::new(),
            vars: VariableStore::new(),
            cash,
            pf_value: Array1::zeros(steps),
            order: Array2::zeros((steps, securities)),
            order_adjusted: Array2::zeros((steps, securities)),
            position: Array2::zeros((steps, securities)),
            cashflow: Array2::zeros((steps, securities)),
            completed_steps: 0,
        }
    }

    /// The market data this engine runs over.
    pub fn market(&self) -> &MarketData {
        &self.market
    }

    /// Post a named auxiliary series for strategies to read.
    ///
    /// The frame's labels must match the market grid exactly; a mismatch is
    /// rejected here, before any run, and nothing is stored.
    pub fn post_data(&mut self, name: impl Into<String>, frame: Frame) -> Result<()> {
        let values = self.market.conform(frame)?;
        self.data.insert(name, values);
        Ok(())
    }

    /// Steps whose account rows have been fully written.
    ///
    /// After an aborted run this marks how much of the grids is meaningful.
    pub fn completed_steps(&self) -> usize {
        self.completed_steps
    }

    /// Run the simulation from the first step to the last.
    ///
    /// A hook error aborts the run at the current step; rows already written
    /// remain readable through `result()`.
    pub fn run<S: Strategy>(&mut self, strategy: &mut S) -> Result<()> {
        let steps = self.market.steps();
        let securities = self.market.securities().len();

        let span = info_span!("backtest", name = %self.config.name);
        let _guard = span.enter();
        if steps > 0 {
            info!(
                steps,
                securities,
                start = %ts_to_datetime(self.market.index()[0]),
                end = %ts_to_datetime(self.market.index()[steps - 1]),
                "starting run"
            );
        }

        let mut signal = Array1::<f64>::zeros(securities);
        let mut deferred = Array1::<f64>::zeros(securities);

        for t in 0..steps {
            // Order assembly: last step's signal plus what execution deferred.
            let order = &signal + &deferred;
            self.order.row_mut(t).assign(&order);

            if order.iter().all(|&qty| qty == 0.0) {
                // Nothing to execute: carry the account forward untouched.
                // Row 0 always lands here, since the signal and the deferral
                // both start at zero; it keeps its seeded cash.
                if t > 0 {
                    self.cash[t] = self.cash[t - 1];
                    let prev = self.position.row(t - 1).to_owned();
                    self.position.row_mut(t).assign(&prev);
                }
                deferred.fill(0.0);
            } else {
                let outcome = fill_with_deferral(
                    self.market.bid_price_row(t),
                    self.market.ask_price_row(t),
                    self.market.bid_size_row(t),
                    self.market.ask_size_row(t),
                    self.cash[t - 1],
                    order.view(),
                    self.position.row(t - 1),
                );
                self.cash[t] = outcome.cash;
                self.order_adjusted.row_mut(t).assign(&outcome.filled);
                self.position.row_mut(t).assign(&outcome.position);
                self.cashflow.row_mut(t).assign(&outcome.cashflow);
                deferred = outcome.deferred;
            }

            self.pf_value[t] = portfolio_value(
                self.cash[t],
                self.position.row(t),
                self.market.bid_price_row(t),
                self.market.ask_price_row(t),
            );
            self.completed_steps = t + 1;

            let mut ctx = StepContext::new(
                t,
                self.market.index(),
                self.market.securities(),
                &self.data,
                &self.cash,
                &self.pf_value,
                &self.order,
                &self.order_adjusted,
                &self.position,
                &self.cashflow,
                &mut self.vars,
            );
            let packet = strategy.create_packet(&mut ctx)?;
            signal = strategy.create_signal(packet)?;
            if signal.len() != securities {
                return Err(Error::signal(format!(
                    "signal length {} does not match universe size {}",
                    signal.len(),
                    securities
                )));
            }
        }

        info!(steps = self.completed_steps, "run complete");
        Ok(())
    }

    /// Assemble the labeled result tables.
    ///
    /// Available at any point; after an aborted run, rows past
    /// `completed_steps()` are still zero-initialized.
    pub fn result(&self) -> BacktestResult {
        let index = self.market.index().to_vec();
        let columns = self.market.securities().labels().to_vec();
        let table = |values: &Array2<f64>| {
            Frame::new(index.clone(), columns.clone(), values.clone())
                .expect("account grids share the market grid's shape")
        };

        BacktestResult {
            cash: Frame::single(index.clone(), "cash", self.cash.clone())
                .expect("cash series shares the market grid's length"),
            cashflow: table(&self.cashflow),
            order: table(&self.order),
            order_adjusted: table(&self.order_adjusted),
            pf_value: Frame::single(index.clone(), "pf_value", self.pf_value.clone())
                .expect("value series shares the market grid's length"),
            position: table(&self.position),
        }
    }

    /// Summarize performance over the steps completed so far.
    pub fn performance(&self) -> PerformanceSummary {
        let done = self.completed_steps;
        summarize(
            self.config.initial_cash,
            &self.market.index()[..done],
            self.pf_value.slice(s![..done]),
        )
    }
}
