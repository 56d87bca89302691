//! Discrete-time portfolio backtesting engine.
//!
//! This crate provides:
//! - Liquidity-capped order execution with one-step deferral
//! - Side-aware portfolio valuation (longs at bid, shorts at ask)
//! - A strictly sequential simulation engine over labeled [time, security] grids
//! - Strategy hooks for packet construction and signal generation
//! - Performance summaries over the marked-to-market value series

pub mod execution;
pub mod market;
pub mod metrics;
pub mod simulator;
pub mod store;
pub mod strategy;
pub mod valuation;

pub use execution::{fill_with_deferral, ExecutionOutcome};
pub use market::MarketData;
pub use metrics::{equity_curve, EquityPoint, PerformanceSummary};
pub use simulator::{BacktestResult, Backtester, SimConfig};
pub use store::{DataStore, VariableStore};
pub use strategy::{AccountGrid, AccountSeries, Hold, StepContext, Strategy};
pub use valuation::portfolio_value;
