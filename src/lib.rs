//! Statistical arbitrage: cointegration screening, spread trading
//! signals, and portfolio backtesting over aligned price panels.

pub mod cli;
pub mod commands;
pub mod config;
pub mod data;
pub mod metrics;
pub mod panel;
pub mod portfolio;
pub mod report;
pub mod returns;
pub mod screener;
pub mod signal;
