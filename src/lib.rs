//! Kelp Ledger - Seaweed-bed harvest reporting bot
//!
//! Tracks harvest operations reported as short chat messages, persists
//! each report as a row in an append-only spreadsheet ledger, and derives
//! all operational state - per-site cycle progress, revenue aggregates,
//! next-harvest forecasts - by replaying that ledger on every request.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
