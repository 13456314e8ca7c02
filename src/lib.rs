//! Payroll to General Ledger entry generation.
//!
//! This crate turns per-employee payroll records into general-ledger
//! entries. A configurable rule catalog maps each pay-code to accounting
//! treatment (accounts, sign, texts); values are prorated across cost
//! centers, third-party deductions fan out to their recipients, and the
//! resulting detailed lines are aggregated into a grouped ledger.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod intake;
pub mod models;
