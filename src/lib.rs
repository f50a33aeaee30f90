//! Reporting core for a storefront back office.
//!
//! This crate aggregates order line items into time-bucketed sales summaries
//! and time clock punches into per-staff attendance calendars. It also
//! enforces the time clock's merge policy (one clock-in per day,
//! last-write-wins clock-out).

#![warn(missing_docs)]

pub mod aggregation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
