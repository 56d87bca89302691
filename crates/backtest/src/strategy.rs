//! Strategy hooks and the per-step view they observe.
//!
//! A strategy implements two hooks: `create_packet` reads history through a
//! `StepContext` and returns an opaque snapshot; `create_signal` turns that
//! snapshot into the order vector for the next step. The engine owns all
//! state; strategies only read it (plus a mutable scratch store) and steer
//! future steps through the returned signal.

use gridsim_core::{Result, TimestampMs, Universe};
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};

use crate::store::{DataStore, VariableStore};

/// Per-step account series (one value per step).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSeries {
    Cash,
    PfValue,
}

/// Per-security account grids (one value per step and security).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountGrid {
    Order,
    OrderAdjusted,
    Position,
    Cashflow,
}

/// Read-only view of engine state at one time step.
///
/// Windows never extend past the current step, so a strategy can only see
/// rows the engine has already produced.
pub struct StepContext<'a> {
    step: usize,
    index: &'a [TimestampMs],
    securities: &'a Universe,
    data: &'a DataStore,
    cash: &'a Array1<f64>,
    pf_value: &'a Array1<f64>,
    order: &'a Array2<f64>,
    order_adjusted: &'a Array2<f64>,
    position: &'a Array2<f64>,
    cashflow: &'a Array2<f64>,
    /// Scratch values persisting across steps.
    pub vars: &'a mut VariableStore,
}

impl<'a> StepContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        step: usize,
        index: &'a [TimestampMs],
        securities: &'a Universe,
        data: &'a DataStore,
        cash: &'a Array1<f64>,
        pf_value: &'a Array1<f64>,
        order: &'a Array2<f64>,
        order_adjusted: &'a Array2<f64>,
        position: &'a Array2<f64>,
        cashflow: &'a Array2<f64>,
        vars: &'a mut VariableStore,
    ) -> Self {
        Self {
            step,
            index,
            securities,
            data,
            cash,
            pf_value,
            order,
            order_adjusted,
            position,
            cashflow,
            vars,
        }
    }

    /// Current step number.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Time label of the current step.
    pub fn now(&self) -> TimestampMs {
        self.index[self.step]
    }

    /// Security universe (fixed order, label lookup).
    pub fn securities(&self) -> &Universe {
        self.securities
    }

    /// Trailing window of a posted auxiliary series.
    pub fn data_rolling(&self, name: &str, window: usize) -> Result<ArrayView2<'_, f64>> {
        self.data.rolling(name, self.step, window)
    }

    /// Full history of a posted auxiliary series up to now.
    pub fn data_expanding(&self, name: &str) -> Result<ArrayView2<'_, f64>> {
        self.data.expanding(name, self.step)
    }

    /// Trailing window of a per-step account series.
    pub fn series_rolling(&self, series: AccountSeries, window: usize) -> ArrayView1<'_, f64> {
        let start = (self.step + 1).saturating_sub(window);
        self.series_values(series).slice(s![start..=self.step])
    }

    /// Full history of a per-step account series up to now.
    pub fn series_expanding(&self, series: AccountSeries) -> ArrayView1<'_, f64> {
        self.series_values(series).slice(s![..=self.step])
    }

    /// Trailing window of a per-security account grid.
    pub fn grid_rolling(&self, grid: AccountGrid, window: usize) -> ArrayView2<'_, f64> {
        let start = (self.step + 1).saturating_sub(window);
        self.grid_values(grid).slice(s![start..=self.step, ..])
    }

    /// Full history of a per-security account grid up to now.
    pub fn grid_expanding(&self, grid: AccountGrid) -> ArrayView2<'_, f64> {
        self.grid_values(grid).slice(s![..=self.step, ..])
    }

    /// Current position vector.
    pub fn position_now(&self) -> ArrayView1<'_, f64> {
        self.position.row(self.step)
    }

    /// Current cash balance.
    pub fn cash_now(&self) -> f64 {
        self.cash[self.step]
    }

    fn series_values(&self, series: AccountSeries) -> &Array1<f64> {
        match series {
            AccountSeries::Cash => self.cash,
            AccountSeries::PfValue => self.pf_value,
        }
    }

    fn grid_values(&self, grid: AccountGrid) -> &Array2<f64> {
        match grid {
            AccountGrid::Order => self.order,
            AccountGrid::OrderAdjusted => self.order_adjusted,
            AccountGrid::Position => self.position,
            AccountGrid::Cashflow => self.cashflow,
        }
    }
}

/// Signal-generation hooks a caller plugs into the engine.
///
/// `create_packet` runs after each step's execution and valuation; the value
/// it returns is handed unchanged to `create_signal`, whose result becomes
/// the next step's signal. Errors from either hook abort the run.
pub trait Strategy {
    /// Opaque snapshot passed between the two hooks.
    type Packet;

    /// Observe state at the current step.
    fn create_packet(&mut self, ctx: &mut StepContext<'_>) -> Result<Self::Packet>;

    /// Produce the desired order vector for the next step.
    fn create_signal(&mut self, packet: Self::Packet) -> Result<Array1<f64>>;
}

/// No-trade baseline: signals zero for every security at every step.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hold;

impl Strategy for Hold {
    type Packet = usize;

    fn create_packet(&mut self, ctx: &mut StepContext<'_>) -> Result<usize> {
        Ok(ctx.securities().len())
    }

    fn create_signal(&mut self, securities: usize) -> Result<Array1<f64>> {
        Ok(Array1::zeros(securities))
    }
}
