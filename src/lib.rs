//! Working-Day Calendar Engine for school management
//!
//! This crate answers whether a date is a working day for an organization
//! (and optionally a single class), counts working days over a range, and
//! turns leave requests into chargeable leave days and balances.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
